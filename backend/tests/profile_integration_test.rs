//! Integration tests for profile, plan and class endpoints

mod common;

use axum::http::StatusCode;
use fitness_rpg_backend::config::AppConfig;
use serde_json::{json, Value};

fn profile_body() -> Value {
    json!({
        "profile": {
            "age": 28,
            "weight_kg": 70.0,
            "height_cm": 175.0,
            "sex": "male",
            "activity_level": "moderately_active",
            "goal": "muscle_gain",
            "target_weight_kg": 75.0,
            "weekly_change_kg": 0.5
        },
        "total_xp": 500,
        "streak_days": 8,
        "achievements": ["first_workout"]
    })
}

#[tokio::test]
async fn test_derive_profile() {
    let app = common::TestApp::new();

    let (status, response) = app.post_json("/api/v1/profile/derive", &profile_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["metrics"]["bmr"], 1658.75);
    assert_eq!(response["metrics"]["daily_calories"], 2871);
    assert_eq!(response["metrics"]["water_liters"], 3.0);
    assert_eq!(response["level"]["level"], 3);
    assert_eq!(response["rank"], "Novice");
    assert_eq!(response["streak_tier"], "on_fire");
    assert_eq!(response["achievement_summary"]["unlocked"], 1);
    assert_eq!(response["target_pace"]["weekly_change_kg"], 0.5);
    assert_eq!(response["target_pace"]["direction"], "surplus");
}

#[tokio::test]
async fn test_derive_profile_rejects_out_of_range_age() {
    let app = common::TestApp::new();
    let mut body = profile_body();
    body["profile"]["age"] = json!(12);

    let (status, response) = app.post_json("/api/v1/profile/derive", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(response["error"]["field"], "age");
}

#[tokio::test]
async fn test_derive_profile_rejects_unknown_activity_level() {
    let app = common::TestApp::new();
    let mut body = profile_body();
    body["profile"]["activity_level"] = json!("couch_potato");

    let (status, response) = app.post_json("/api/v1/profile/derive", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_daily_plan_uses_configured_defaults() {
    let mut config = AppConfig::default();
    config.plans.default_workout_minutes = 20;
    let app = common::TestApp::with_config(config);

    let (status, response) = app
        .post_json("/api/v1/plans/daily", &json!({"goal": "weight_loss"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["workout"]["total_minutes"], 20);
    // 2000 - 500
    assert_eq!(response["meals"]["target_calories"], 1500);
    assert_eq!(response["meals"]["breakfast"]["name"], "Protein Power Bowl");
    assert_eq!(response["timeline"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_attribute_growth() {
    let app = common::TestApp::new();

    let body = json!({
        "base_value": 10,
        "level": 12,
        "history": {"strength": 45, "endurance": 0, "agility": 0, "discipline": 0}
    });
    let (status, response) = app
        .post_json("/api/v1/classes/strength_warrior/attributes", &body)
        .await;

    assert_eq!(status, StatusCode::OK);
    // 10 + 6 + 4 + 4
    assert_eq!(response["value"], 24);
}
