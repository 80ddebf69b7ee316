//! Level, rank, class and achievement API routes
//!
//! Read-only views of the reference tables, evaluated against progress the
//! client supplies.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    routing::{get, post},
    Json, Router,
};
use fitness_rpg_shared::achievements::{self, AchievementDef, ACHIEVEMENTS};
use fitness_rpg_shared::progression::{
    calculate_attribute_growth, get_character_class, CharacterClass, Rank, CHARACTER_CLASSES, RANKS,
};
use fitness_rpg_shared::types::{
    AchievementProgressRequest, AchievementsResponse, AttributeGrowthRequest,
    AttributeGrowthResponse, LevelDetail, LevelProgressQuery, LevelSummary,
};

/// Create level routes
pub fn level_routes() -> Router<AppState> {
    Router::new()
        .route("/progress", get(get_level_progress))
        .route("/:level", get(get_level_detail))
}

/// Create rank routes
pub fn rank_routes() -> Router<AppState> {
    Router::new().route("/", get(list_ranks))
}

/// Create character class routes
pub fn class_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes))
        .route("/:id", get(get_class))
        .route("/:id/attributes", post(grow_attribute))
}

/// Create achievement routes
pub fn achievement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_achievements))
        .route("/evaluate", post(evaluate_achievements))
}

/// GET /api/v1/levels/progress?total_xp= - Level, rank and unlocks for an XP total
async fn get_level_progress(
    query: Result<Query<LevelProgressQuery>, QueryRejection>,
) -> ApiResult<Json<LevelSummary>> {
    let Query(query) = query?;
    Ok(Json(LevelSummary::for_xp(query.total_xp)))
}

/// GET /api/v1/levels/:level - Threshold and rewards for one level
async fn get_level_detail(Path(level): Path<u32>) -> ApiResult<Json<LevelDetail>> {
    Ok(Json(LevelDetail::for_level(level)?))
}

/// GET /api/v1/ranks
async fn list_ranks() -> Json<&'static [Rank]> {
    Json(RANKS)
}

/// GET /api/v1/classes
async fn list_classes() -> Json<&'static [CharacterClass]> {
    Json(CHARACTER_CLASSES)
}

fn find_class(id: &str) -> ApiResult<&'static CharacterClass> {
    get_character_class(id).ok_or_else(|| ApiError::NotFound(format!("Character class '{}' not found", id)))
}

/// GET /api/v1/classes/:id
async fn get_class(Path(id): Path<String>) -> ApiResult<Json<&'static CharacterClass>> {
    Ok(Json(find_class(&id)?))
}

/// POST /api/v1/classes/:id/attributes - Attribute value at a level
async fn grow_attribute(
    Path(id): Path<String>,
    payload: Result<Json<AttributeGrowthRequest>, JsonRejection>,
) -> ApiResult<Json<AttributeGrowthResponse>> {
    let Json(req) = payload?;
    let class = find_class(&id)?;
    let value = calculate_attribute_growth(req.base_value, req.level, class, &req.history);
    Ok(Json(AttributeGrowthResponse { value }))
}

/// GET /api/v1/achievements - The achievement catalogue
async fn list_achievements() -> Json<&'static [AchievementDef]> {
    Json(ACHIEVEMENTS)
}

/// POST /api/v1/achievements/evaluate - Unlock state for supplied progress
async fn evaluate_achievements(
    payload: Result<Json<AchievementProgressRequest>, JsonRejection>,
) -> ApiResult<Json<AchievementsResponse>> {
    let Json(req) = payload?;
    let (achievements, summary) = achievements::evaluate(|id| req.progress.get(id).copied());
    Ok(Json(AchievementsResponse {
        achievements,
        summary,
    }))
}
