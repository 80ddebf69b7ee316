//! Fitness RPG WASM Module
//!
//! WebAssembly bindings for the calculations the client runs on every
//! render: level progress, BMR, workout XP and one-rep max. String keys are
//! parsed with the same rules as the HTTP API.

use chrono::Utc;
use fitness_rpg_shared::calculator::CalculatorRequest;
use fitness_rpg_shared::errors::CalcResult;
use fitness_rpg_shared::health_metrics::{self, BiologicalSex, FitnessGoal};
use fitness_rpg_shared::levels;
use fitness_rpg_shared::validation::{parse_activity_form_label, parse_category, user_message};
use fitness_rpg_shared::xp::{self, Intensity};
use wasm_bindgen::prelude::*;

/// JS numbers are doubles; negative and NaN totals count as zero
fn xp_from_js(total_xp: f64) -> u64 {
    total_xp as u64
}

/// Level reached with a cumulative XP total
#[wasm_bindgen]
pub fn calculate_level(total_xp: f64) -> u32 {
    levels::calculate_level(xp_from_js(total_xp))
}

/// Progress through the current level, within [0, 100]
#[wasm_bindgen]
pub fn level_progress_percentage(total_xp: f64) -> f64 {
    levels::level_progress(xp_from_js(total_xp)).percentage
}

/// XP still missing to reach the next level
#[wasm_bindgen]
pub fn xp_to_next_level(total_xp: f64) -> f64 {
    levels::level_progress(xp_from_js(total_xp)).xp_to_next_level as f64
}

/// Basal Metabolic Rate (Mifflin-St Jeor)
#[wasm_bindgen]
pub fn calculate_bmr(age_years: u32, weight_kg: f64, height_cm: f64, is_male: bool) -> f64 {
    let sex = if is_male {
        BiologicalSex::Male
    } else {
        BiologicalSex::Female
    };
    health_metrics::calculate_bmr(age_years, weight_kg, height_cm, sex)
}

fn tdee_inner(bmr: f64, activity_label: &str) -> CalcResult<f64> {
    let level = parse_activity_form_label(activity_label)?;
    Ok(health_metrics::calculate_tdee(bmr, level))
}

/// Daily energy expenditure for an activity label from the calculator form
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity_label: &str) -> Result<f64, JsValue> {
    tdee_inner(bmr, activity_label).map_err(|e| JsValue::from_str(&user_message(&e)))
}

/// Estimated one-rep max in kg (Epley)
#[wasm_bindgen]
pub fn calculate_one_rep_max(weight_kg: f64, reps: u32) -> f64 {
    health_metrics::calculate_one_rep_max(weight_kg, reps).max_kg
}

fn workout_xp_inner(duration_minutes: u32, intensity: &str, goal: &str) -> CalcResult<u32> {
    let intensity: Intensity = parse_category(intensity)?;
    let goal: FitnessGoal = parse_category(goal)?;
    Ok(xp::calculate_workout_xp(duration_minutes, intensity, "Workout", goal, Utc::now()).amount)
}

/// XP for a completed workout
#[wasm_bindgen]
pub fn calculate_workout_xp(duration_minutes: u32, intensity: &str, goal: &str) -> Result<u32, JsValue> {
    workout_xp_inner(duration_minutes, intensity, goal).map_err(|e| JsValue::from_str(&user_message(&e)))
}

fn evaluate_calculator_inner(request_json: &str) -> Result<String, String> {
    let request: CalculatorRequest = serde_json::from_str(request_json).map_err(|e| e.to_string())?;
    let result = request.evaluate().map_err(|e| user_message(&e))?;
    serde_json::to_string(&result).map_err(|e| e.to_string())
}

/// Run any calculator from its JSON request; returns the JSON result
#[wasm_bindgen]
pub fn evaluate_calculator(request_json: &str) -> Result<String, JsValue> {
    evaluate_calculator_inner(request_json).map_err(|e| JsValue::from_str(&e))
}
