use fcheck_kernel::domain::constants::ACRES_PER_SQUARE_METER;

/// Area of a polygon in square meters and acres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaMeasurement {
    square_meters: f64,
    acres: f64,
}

impl AreaMeasurement {
    /// `None` for negative or non-finite input.
    #[must_use]
    pub fn from_square_meters(square_meters: f64) -> Option<Self> {
        (square_meters.is_finite() && square_meters >= 0.0)
            .then(|| Self { square_meters, acres: square_meters * ACRES_PER_SQUARE_METER })
    }

    #[must_use]
    pub const fn square_meters(&self) -> f64 {
        self.square_meters
    }

    #[must_use]
    pub const fn acres(&self) -> f64 {
        self.acres
    }
}
