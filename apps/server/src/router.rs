use axum::Router;
use fcheck::domain::constants::{LANDCOVER_TAG, SYSTEM_TAG};
use fcheck::kernel::prelude::ApiState;
use fcheck::server::router::{feature_router, system_router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(
    info(title = "FieldCheck", description = "Land-cover checks for farm boundaries"),
    tags(
        (name = LANDCOVER_TAG, description = "Classify a polygon and measure qualifying areas"),
        (name = SYSTEM_TAG, description = "Liveness and readiness"),
    )
)]
struct ApiDoc;

pub(crate) fn init(state: ApiState) -> Router {
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(feature_router())
        .merge(system_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(api_routes).merge(Scalar::with_url("/api", api_doc))
}
