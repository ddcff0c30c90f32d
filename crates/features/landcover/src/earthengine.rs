//! [`RemoteReducer`] backed by the Earth Engine REST client.

use crate::reducer::{ReducerError, RemoteReducer};
use fcheck_earthengine::{EarthEngine, EarthEngineError, Polygon};
use fcheck_kernel::domain::geometry::CoordinateRing;
use fcheck_kernel::domain::landcover::LandCoverCode;

impl From<EarthEngineError> for ReducerError {
    fn from(err: EarthEngineError) -> Self {
        if err.is_not_ready() {
            Self::NotReady { message: err.to_string().into(), context: None }
        } else {
            Self::Service { message: err.to_string().into(), context: None }
        }
    }
}

impl RemoteReducer for EarthEngine {
    type Polygon = Polygon;

    fn ensure_ready(&self) -> Result<(), ReducerError> {
        Ok(Self::ensure_ready(self)?)
    }

    fn polygon(&self, ring: &CoordinateRing) -> Result<Polygon, ReducerError> {
        Ok(Polygon::from_ring(ring))
    }

    async fn majority_class(&self, polygon: &Polygon) -> Result<Option<LandCoverCode>, ReducerError> {
        self.majority_value(polygon).await?.map(class_code).transpose()
    }

    async fn area(&self, polygon: &Polygon) -> Result<f64, ReducerError> {
        Ok(Self::area(self, polygon).await?)
    }
}

/// Band values arrive as JSON numbers; a class code must be integral.
#[allow(clippy::cast_possible_truncation)]
fn class_code(value: f64) -> Result<LandCoverCode, ReducerError> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Ok(value as LandCoverCode)
    } else {
        Err(ReducerError::Service { message: format!("non-integral class value {value}").into(), context: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_become_codes() {
        assert_eq!(class_code(40.0).unwrap(), 40);
        assert_eq!(class_code(-0.0).unwrap(), 0);
    }

    #[test]
    fn fractional_values_are_service_errors() {
        for value in [40.5, f64::NAN, f64::INFINITY, 1.0e300] {
            assert!(matches!(class_code(value), Err(ReducerError::Service { .. })));
        }
    }
}
