//! Validation of client-submitted polygon boundaries.

use crate::error::LandCoverError;
use fcheck_kernel::domain::geometry::{CoordinateRing, MIN_RING_POINTS, Position};
use serde_json::Value;

/// Turns an untrusted `coordinates` value into a [`CoordinateRing`].
///
/// Accepts an array of at least [`MIN_RING_POINTS`] `[x, y]` pairs of finite numbers.
/// Nothing else is checked: the ring does not have to be closed and coordinate ranges are left
/// to the remote service.
pub fn validate_ring(candidate: Option<&Value>) -> Result<CoordinateRing, LandCoverError> {
    let Some(candidate) = candidate else {
        return Err(invalid("coordinates are missing"));
    };
    let Value::Array(points) = candidate else {
        return Err(invalid("coordinates must be an array of [x, y] pairs"));
    };
    if points.len() < MIN_RING_POINTS {
        return Err(invalid(format!(
            "a polygon needs at least {MIN_RING_POINTS} points, got {}",
            points.len()
        )));
    }

    let ring = points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            position(point).ok_or_else(|| {
                invalid(format!("point {index} is not a pair of finite numbers: {point}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    CoordinateRing::new(ring).ok_or_else(|| invalid("coordinates do not form a ring"))
}

fn position(point: &Value) -> Option<Position> {
    match point.as_array()?.as_slice() {
        [x, y] => {
            let (x, y) = (x.as_f64()?, y.as_f64()?);
            (x.is_finite() && y.is_finite()).then_some([x, y])
        },
        _ => None,
    }
}

fn invalid(message: impl Into<std::borrow::Cow<'static, str>>) -> LandCoverError {
    LandCoverError::InvalidGeometry { message: message.into(), context: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_open_rings() {
        let value = json!([[30.5, 50.4], [30.6, 50.4], [30.6, 50.5]]);
        let ring = validate_ring(Some(&value)).unwrap();
        assert_eq!(ring.points(), &[[30.5, 50.4], [30.6, 50.4], [30.6, 50.5]]);
    }

    #[test]
    fn accepts_integer_coordinates() {
        let value = json!([[0, 0], [1, 0], [1, 1], [0, 0]]);
        assert_eq!(validate_ring(Some(&value)).unwrap().len(), 4);
    }

    #[test]
    fn rejects_missing_and_non_array_input() {
        assert!(matches!(validate_ring(None), Err(LandCoverError::InvalidGeometry { .. })));
        for value in [json!(null), json!("[[0,0]]"), json!({ "x": 1 }), json!(12)] {
            assert!(validate_ring(Some(&value)).is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn rejects_malformed_points() {
        for point in [json!([1.0]), json!([1.0, 2.0, 3.0]), json!(["1", 2.0]), json!(null)] {
            let value = json!([[0.0, 0.0], [1.0, 0.0], point]);
            assert!(validate_ring(Some(&value)).is_err(), "{value} should be rejected");
        }
    }
}
