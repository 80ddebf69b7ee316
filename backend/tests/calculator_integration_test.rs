//! Integration tests for calculator endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_bmr_calculator() {
    let app = common::TestApp::new();

    let body = json!({
        "calculator": "bmr",
        "age": 25,
        "weight_kg": 70.0,
        "height_cm": 175.0,
        "sex": "male"
    });
    let (status, response) = app.post_json("/api/v1/calculators", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["value"], 1674.0);
    assert_eq!(response["unit"], "kcal/day");
    assert_eq!(response["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_hydration_calculator_with_climate() {
    let app = common::TestApp::new();

    let body = json!({
        "calculator": "hydration",
        "weight_kg": 70.0,
        "activity_level": "moderately_active",
        "climate": "hot"
    });
    let (status, response) = app.post_json("/api/v1/calculators", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["value"], 3.7);
    assert_eq!(response["recommendations"][1], "Glasses (250ml): 15 glasses");
}

#[tokio::test]
async fn test_one_rep_max_calculator() {
    let app = common::TestApp::new();

    let body = json!({"calculator": "one_rep_max", "weight_kg": 80.0, "reps": 8});
    let (status, response) = app.post_json("/api/v1/calculators", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["value"], 101.0);
    assert_eq!(response["recommendations"][0], "90%: 91kg (1-2 reps)");
}

#[tokio::test]
async fn test_progress_with_zero_weeks_is_validation_error() {
    let app = common::TestApp::new();

    let body = json!({"calculator": "progress", "current_kg": 70.0, "target_kg": 65.0, "weeks": 0});
    let (status, response) = app.post_json("/api/v1/calculators", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(response["error"]["field"], "weeks");
}

#[tokio::test]
async fn test_body_fat_with_neck_above_waist_is_not_computable() {
    let app = common::TestApp::new();

    let body = json!({
        "calculator": "body_fat",
        "waist_cm": 36.0,
        "neck_cm": 38.0,
        "height_cm": 175.0,
        "sex": "male"
    });
    let (status, response) = app.post_json("/api/v1/calculators", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"]["code"], "NOT_COMPUTABLE");
}

#[tokio::test]
async fn test_endurance_macros_are_unrecognized() {
    let app = common::TestApp::new();

    let body = json!({"calculator": "macros", "calories": 2500, "goal": "endurance"});
    let (status, response) = app.post_json("/api/v1/calculators", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "UNRECOGNIZED_CATEGORY");
}

#[tokio::test]
async fn test_unknown_calculator_is_bad_request() {
    let app = common::TestApp::new();

    let body = json!({"calculator": "vo2max", "age": 30});
    let (status, response) = app.post_json("/api/v1/calculators", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "BAD_REQUEST");
}
