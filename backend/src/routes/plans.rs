//! Daily plan API routes

use crate::error::ApiResult;
use crate::services::PlanService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use fitness_rpg_shared::plans::DailyPlan;
use fitness_rpg_shared::types::DailyPlanRequest;

/// Create plan routes
pub fn plan_routes() -> Router<AppState> {
    Router::new().route("/daily", post(daily_plan))
}

/// POST /api/v1/plans/daily - Workout, meals and timeline for a day
async fn daily_plan(
    State(state): State<AppState>,
    payload: Result<Json<DailyPlanRequest>, JsonRejection>,
) -> ApiResult<Json<DailyPlan>> {
    let Json(req) = payload?;
    Ok(Json(PlanService::daily_plan(&state.config().plans, &req)?))
}
