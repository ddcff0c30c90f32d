use crate::LandCover;
use crate::error::LandCoverError;
use crate::model::{CheckFarmRequest, CheckFarmResponse};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use fcheck_derive::api_handler;
use fcheck_kernel::domain::constants::LANDCOVER_TAG;
use fcheck_kernel::server::{ApiState, ErrorResponse};
use serde_json::Value;

#[api_handler(
    post,
    path = "/check-farm",
    request_body = CheckFarmRequest,
    responses(
        (status = OK, description = "Classification, with the area when the class qualifies", body = CheckFarmResponse),
        (status = BAD_REQUEST, description = "Missing or malformed coordinates", body = ErrorResponse),
        (status = SERVICE_UNAVAILABLE, description = "Earth Engine session not ready", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Remote processing or server error", body = ErrorResponse),
    ),
    tag = LANDCOVER_TAG,
)]
pub(crate) async fn check_farm(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CheckFarmResponse>, LandCoverError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Unreadable check-farm body");
        LandCoverError::InvalidGeometry { message: rejection.body_text().into(), context: None }
    })?;

    let slice = state.try_get_slice::<LandCover>().map_err(|e| {
        tracing::error!(error = %e, "Land-cover slice not registered");
        LandCoverError::Internal { message: e.to_string().into(), context: None }
    })?;

    let response = slice.classifier().check(body.get("coordinates")).await?;
    Ok(Json(response.into()))
}
