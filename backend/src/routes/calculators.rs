//! Calculator API routes

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use fitness_rpg_shared::calculator::{CalculatorRequest, CalculatorResult};
use tracing::debug;

/// Create calculator routes
pub fn calculator_routes() -> Router<AppState> {
    Router::new().route("/", post(run_calculator))
}

/// POST /api/v1/calculators - Evaluate one calculator
///
/// The body names the calculator in its `calculator` field.
async fn run_calculator(
    payload: Result<Json<CalculatorRequest>, JsonRejection>,
) -> ApiResult<Json<CalculatorResult>> {
    let Json(req) = payload?;
    debug!(calculator = req.kind(), "Evaluating calculator");
    Ok(Json(req.evaluate()?))
}
