//! # Land cover
//!
//! Feature slice answering "is this polygon a farm (or a forest)?".
//!
//! A check validates the submitted ring, asks the remote raster service for the majority
//! land-cover class inside it, maps the class through the [`taxonomy`] and, only when the class
//! qualifies, asks for the polygon's area. See [`pipeline`] for the flow and [`reducer`] for the
//! remote contract; [`EarthEngine`](fcheck_earthengine::EarthEngine) implements it.

mod earthengine;
mod error;
pub mod geometry;
#[cfg(feature = "server")]
mod handler;
pub mod measure;
pub mod model;
pub mod pipeline;
pub mod reducer;
pub mod taxonomy;

pub use crate::error::{
    INVALID_COORDINATES, LandCoverError, LandCoverErrorExt, PROCESSING_ERROR, SERVER_ERROR,
    SERVICE_NOT_READY,
};
pub use crate::pipeline::{Classifier, ClassificationResponse, Pipeline, QualifiedArea};
pub use crate::reducer::{ReducerError, RemoteReducer};
pub use crate::taxonomy::{LandCoverClass, Taxonomy, classify};

use fcheck_kernel::domain::config::ApiConfig;
use fcheck_kernel::domain::registry::InitializedSlice;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Land-cover feature state.
#[fcheck_derive::fcheck_slice(name = "landcover", readiness)]
pub struct LandCover {
    classifier: Arc<dyn Classifier>,
}

impl LandCoverInner {
    fn is_ready(&self) -> bool {
        self.classifier.is_ready()
    }

    #[must_use]
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

/// Builds the land-cover slice on top of `reducer`.
///
/// # Errors
/// Returns [`LandCoverError::Config`] when the remote call timeout is zero.
pub fn init<R>(config: &ApiConfig, reducer: R) -> Result<InitializedSlice, LandCoverError>
where
    R: RemoteReducer + Debug,
{
    let timeout_secs = config.earth_engine.timeout_secs;
    if timeout_secs == 0 {
        return Err(LandCoverError::Config {
            message: "earth_engine.timeout_secs must be greater than zero".into(),
            context: None,
        });
    }

    let taxonomy = Taxonomy::new(config.classification.qualifying);
    let pipeline = Pipeline::new(reducer, taxonomy, Duration::from_secs(timeout_secs));

    tracing::info!(
        qualifying = ?taxonomy.qualifying().labels().collect::<Vec<_>>(),
        timeout_secs,
        "Land-cover slice initialized"
    );

    let slice = LandCover::new(LandCoverInner { classifier: Arc::new(pipeline) });
    Ok(InitializedSlice::new(slice))
}

/// Routes of the slice.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<fcheck_kernel::server::ApiState> {
    utoipa_axum::router::OpenApiRouter::new().routes(utoipa_axum::routes!(handler::check_farm))
}
