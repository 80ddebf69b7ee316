//! XP API routes

use crate::error::ApiResult;
use crate::services::ProgressService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fitness_rpg_shared::health_metrics::FitnessGoal;
use fitness_rpg_shared::types::{
    ActivityLog, XpAwardRequest, XpAwardResponse, XpPotentialResponse, XpPreviewResponse,
};
use fitness_rpg_shared::xp::{daily_xp_potential, weekly_xp_potential};
use serde::Deserialize;

/// Create XP routes
pub fn xp_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(preview_activity))
        .route("/award", post(award_activities))
        .route("/potential", get(get_potential))
}

#[derive(Debug, Deserialize)]
struct GoalQuery {
    goal: Option<FitnessGoal>,
}

/// POST /api/v1/xp - Rewards for one activity
///
/// Workouts without a goal use `?goal=`; with neither they are rejected.
async fn preview_activity(
    query: Result<Query<GoalQuery>, QueryRejection>,
    payload: Result<Json<ActivityLog>, JsonRejection>,
) -> ApiResult<Json<XpPreviewResponse>> {
    let Query(query) = query?;
    let Json(log) = payload?;

    Ok(Json(ProgressService::preview(&log, query.goal, Utc::now())?))
}

/// POST /api/v1/xp/award - Apply a batch of activities to a running total
async fn award_activities(
    payload: Result<Json<XpAwardRequest>, JsonRejection>,
) -> ApiResult<Json<XpAwardResponse>> {
    let Json(req) = payload?;
    Ok(Json(ProgressService::award(&req, Utc::now())?))
}

/// GET /api/v1/xp/potential - Daily and weekly XP ceilings
async fn get_potential() -> Json<XpPotentialResponse> {
    Json(XpPotentialResponse {
        daily: daily_xp_potential(),
        weekly: weekly_xp_potential(),
    })
}
