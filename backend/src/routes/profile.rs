//! Profile API routes

use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use fitness_rpg_shared::types::{ProfileSnapshotRequest, ProfileSnapshotResponse};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/derive", post(derive_profile))
}

/// POST /api/v1/profile/derive - Validate profile input and derive every metric
///
/// Stored XP, streak and unlocked achievement ids are echoed back with the
/// level, rank and streak tier they imply.
async fn derive_profile(
    payload: Result<Json<ProfileSnapshotRequest>, JsonRejection>,
) -> ApiResult<Json<ProfileSnapshotResponse>> {
    let Json(req) = payload?;
    Ok(Json(ProfileService::snapshot(req)?))
}
