//! Contract of the remote raster service.

use fcheck_kernel::domain::geometry::CoordinateRing;
use fcheck_kernel::domain::landcover::LandCoverCode;
use std::borrow::Cow;
use std::future::Future;

#[fcheck_derive::fcheck_error]
pub enum ReducerError {
    /// No authenticated session.
    #[error("Reducer not ready{}: {message}", format_context(.context))]
    NotReady { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Reducer service error{}: {message}", format_context(.context))]
    Service { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Region reductions over a land-cover raster.
///
/// Each call is a single remote round trip; implementations do not retry.
pub trait RemoteReducer: Send + Sync + 'static {
    /// Region handle, built once per request and reused by every reduction.
    type Polygon: Send + Sync;

    /// Fails with [`ReducerError::NotReady`] when calls would be refused for lack of a session.
    fn ensure_ready(&self) -> Result<(), ReducerError>;

    fn is_ready(&self) -> bool {
        self.ensure_ready().is_ok()
    }

    fn polygon(&self, ring: &CoordinateRing) -> Result<Self::Polygon, ReducerError>;

    /// Most frequent class code inside the polygon; `None` when no pixel intersects it.
    fn majority_class(
        &self,
        polygon: &Self::Polygon,
    ) -> impl Future<Output = Result<Option<LandCoverCode>, ReducerError>> + Send;

    /// Geodesic area of the polygon in square meters.
    fn area(&self, polygon: &Self::Polygon) -> impl Future<Output = Result<f64, ReducerError>> + Send;
}
