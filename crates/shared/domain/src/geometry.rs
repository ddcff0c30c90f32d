//! Polygon boundaries as submitted by clients.

use serde::Serialize;

/// Smallest number of vertices that can enclose an area.
pub const MIN_RING_POINTS: usize = 3;

/// A coordinate pair, forwarded verbatim as GeoJSON `[x, y]`.
pub type Position = [f64; 2];

/// An ordered ring of at least [`MIN_RING_POINTS`] finite coordinate pairs.
///
/// The ring does not need to be closed; the remote service closes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoordinateRing(Vec<Position>);

impl CoordinateRing {
    /// Returns `None` unless the ring has enough points and every value is finite.
    #[must_use]
    pub fn new(points: Vec<Position>) -> Option<Self> {
        let finite = points.iter().flatten().all(|value| value.is_finite());
        (points.len() >= MIN_RING_POINTS && finite).then_some(Self(points))
    }

    #[must_use]
    pub fn points(&self) -> &[Position] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with [`Self::len`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_rings() {
        assert!(CoordinateRing::new(vec![[0.0, 0.0], [1.0, 1.0]]).is_none());
        assert!(CoordinateRing::new(Vec::new()).is_none());
    }

    #[test]
    fn rejects_non_finite_values() {
        let ring = vec![[0.0, 0.0], [f64::NAN, 1.0], [1.0, 0.0]];
        assert!(CoordinateRing::new(ring).is_none());
    }

    #[test]
    fn keeps_open_rings_as_given() {
        let points = vec![[30.1, 50.2], [30.2, 50.2], [30.2, 50.3]];
        let ring = CoordinateRing::new(points.clone()).unwrap();
        assert_eq!(ring.points(), points.as_slice());
        assert_eq!(ring.len(), 3);
    }
}
