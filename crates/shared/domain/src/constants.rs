/// `OpenAPI` tag for operational endpoints (health, readiness).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the land-cover classification endpoint.
pub const LANDCOVER_TAG: &str = "Land cover";

/// ESA `WorldCover` 10 m, 2020 release.
pub const DEFAULT_DATASET: &str = "ESA/WorldCover/v100/2020";
/// Classification band of [`DEFAULT_DATASET`].
pub const DEFAULT_BAND: &str = "Map";
/// Ground resolution of a sampled pixel, in meters.
pub const DEFAULT_SCALE: f64 = 10.0;
/// Pixel budget for a single region reduction.
pub const DEFAULT_MAX_PIXELS: u64 = 1_000_000_000;

/// Square meters to acres.
pub const ACRES_PER_SQUARE_METER: f64 = 0.000_247_105;

/// Environment variable holding the service-account key JSON.
pub const DEFAULT_CREDENTIALS_ENV: &str = "GEE_KEY";
