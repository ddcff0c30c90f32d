//! Facade crate for FieldCheck features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates and holds no business logic.
//!
//! ## Usage
//! - Add `fcheck` with the `server` feature.
//! - Connect the remote service with [`connect`], then register the slices from [`init`].

pub use fcheck_domain as domain;
pub use fcheck_earthengine as earthengine;
pub use fcheck_kernel as kernel;

use fcheck_domain::config::ApiConfig;
use fcheck_domain::registry::InitializedSlice;
use fcheck_earthengine::{EarthEngine, EarthEngineError};
use fcheck_landcover::LandCoverError;
use std::borrow::Cow;

#[fcheck_derive::fcheck_error]
pub enum InitError {
    #[error("Earth Engine init error{}: {source}", format_context(.context))]
    EarthEngine { source: EarthEngineError, context: Option<Cow<'static, str>> },
    #[error("Land-cover init error{}: {source}", format_context(.context))]
    LandCover { source: LandCoverError, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use fcheck_kernel::server::ApiState;
        pub use fcheck_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// Business endpoints of every enabled slice.
        pub fn feature_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new().merge(fcheck_landcover::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use fcheck_landcover as landcover;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "landcover",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Configures the Earth Engine client and starts its background authentication.
///
/// Must run inside a Tokio runtime.
pub fn connect(config: &ApiConfig) -> Result<EarthEngine, InitError> {
    EarthEngine::connect(&config.earth_engine).context("Connecting to Earth Engine")
}

/// Initializes every feature slice.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig, engine: EarthEngine) -> Result<Vec<InitializedSlice>, InitError> {
    let slices = vec![features::landcover::init(config, engine)?];

    tracing::info!(slices = slices.len(), "Feature slices initialized");
    Ok(slices)
}
