//! Input validation functions
//!
//! Checks raw user input before it reaches the calculators. Calculators assume
//! valid numeric input; everything here returns `CalcError::Validation` with the
//! offending field name. Profile-level range rules live on
//! [`crate::profile::ProfileInput`] as `validator` derives.

use crate::errors::{CalcError, CalcResult};
use crate::health_metrics::ActivityLevel;
use std::str::FromStr;

/// Reject NaN and infinities
pub fn validate_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_nan() || value.is_infinite() {
        return Err(CalcError::validation(field, "must be a valid number"));
    }
    Ok(())
}

fn validate_range(field: &str, value: f64, min: f64, max: f64, unit: &str) -> CalcResult<()> {
    validate_finite(field, value)?;
    if value < min || value > max {
        return Err(CalcError::validation(
            field,
            format!("must be between {} and {}{}", min, max, unit),
        ));
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight_kg(field: &str, weight_kg: f64) -> CalcResult<()> {
    validate_range(field, weight_kg, 20.0, 500.0, " kg")
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> CalcResult<()> {
    validate_range("height_cm", height_cm, 50.0, 300.0, " cm")
}

/// Validate age in years
pub fn validate_age(age_years: u32) -> CalcResult<()> {
    if !(1..=120).contains(&age_years) {
        return Err(CalcError::validation("age", "must be between 1 and 120"));
    }
    Ok(())
}

/// Validate a body circumference (waist, neck) in cm
pub fn validate_circumference_cm(field: &str, value: f64) -> CalcResult<()> {
    validate_range(field, value, 10.0, 250.0, " cm")
}

/// Validate resting heart rate (bpm)
pub fn validate_heart_rate(bpm: u32) -> CalcResult<()> {
    if !(20..=300).contains(&bpm) {
        return Err(CalcError::validation("resting_hr", "must be between 20 and 300 bpm"));
    }
    Ok(())
}

/// Validate repetitions for a one-rep-max estimate
pub fn validate_reps(reps: u32) -> CalcResult<()> {
    if !(1..=50).contains(&reps) {
        return Err(CalcError::validation("reps", "must be between 1 and 50"));
    }
    Ok(())
}

/// Validate duration in minutes
pub fn validate_duration_minutes(minutes: u32) -> CalcResult<()> {
    // 24 hours
    if minutes > 1440 {
        return Err(CalcError::validation("duration_minutes", "cannot exceed 24 hours"));
    }
    Ok(())
}

/// Validate a timeline in weeks
pub fn validate_weeks(weeks: u32) -> CalcResult<()> {
    if weeks == 0 {
        return Err(CalcError::validation("weeks", "must be at least 1"));
    }
    if weeks > 520 {
        return Err(CalcError::validation("weeks", "cannot exceed 10 years"));
    }
    Ok(())
}

/// Validate calorie value
pub fn validate_calories(calories: i32) -> CalcResult<()> {
    if calories < 0 {
        return Err(CalcError::validation("calories", "cannot be negative"));
    }
    if calories > 50_000 {
        return Err(CalcError::validation("calories", "unreasonably high"));
    }
    Ok(())
}

/// Validate hours of sleep
pub fn validate_sleep_hours(field: &str, hours: f64) -> CalcResult<()> {
    validate_range(field, hours, 0.0, 24.0, " hours")
}

/// Validate a 1-10 sleep quality score
pub fn validate_sleep_quality(quality: u8) -> CalcResult<()> {
    if !(1..=10).contains(&quality) {
        return Err(CalcError::validation("quality", "must be between 1 and 10"));
    }
    Ok(())
}

// ============================================================================
// Form Parsing
// ============================================================================

/// Parse a numeric form field
pub fn parse_number(field: &str, raw: &str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::validation(field, "is required"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::validation(field, "must be a number"))?;
    validate_finite(field, value)?;
    Ok(value)
}

/// Parse a non-negative whole-number form field
pub fn parse_whole_number(field: &str, raw: &str) -> CalcResult<u32> {
    let value = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(CalcError::validation(field, "cannot be negative"));
    }
    if value.fract() != 0.0 {
        return Err(CalcError::validation(field, "must be a whole number"));
    }
    if value > u32::MAX as f64 {
        return Err(CalcError::validation(field, "is too large"));
    }
    Ok(value as u32)
}

/// Parse a category key such as an activity level or goal
pub fn parse_category<T>(raw: &str) -> CalcResult<T>
where
    T: FromStr<Err = CalcError>,
{
    raw.parse()
}

/// Parse an activity level picked on the calculator form
pub fn parse_activity_form_label(raw: &str) -> CalcResult<ActivityLevel> {
    ActivityLevel::from_form_label(raw)
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "weight_kg" | "current_kg" => "Current Weight",
        "target_weight_kg" | "target_kg" => "Target Weight",
        "height_cm" => "Height",
        "waist_cm" => "Waist",
        "neck_cm" => "Neck",
        "resting_hr" => "Resting Heart Rate",
        "reps" => "Reps",
        "weeks" => "Timeline",
        "duration_minutes" => "Workout Duration",
        "weekly_change_kg" => "Weekly Change",
        "calories" => "Calories",
        "quality" => "Sleep Quality",
        "hours" | "target_hours" => "Sleep Duration",
        "goal" => "Fitness Goal",
        _ => field_name,
    }
}

/// Format a validation error for display, e.g. "Height: must be between ..."
pub fn user_message(err: &CalcError) -> String {
    match err {
        CalcError::Validation { field, message } => {
            format!("{}: {}", get_field_display_label(field), message)
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_metrics::{ActivityLevel, FitnessGoal};
    use proptest::prelude::*;

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight_kg("weight_kg", 70.0).is_ok());
        assert!(validate_weight_kg("weight_kg", 20.0).is_ok());
        assert!(validate_weight_kg("weight_kg", 500.0).is_ok());
        assert!(validate_weight_kg("weight_kg", 10.0).is_err());
        assert!(validate_weight_kg("weight_kg", 600.0).is_err());
        assert!(validate_weight_kg("weight_kg", f64::NAN).is_err());
        assert!(validate_weight_kg("weight_kg", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(170.0).is_ok());
        assert!(validate_height_cm(50.0).is_ok());
        assert!(validate_height_cm(300.0).is_ok());
        assert!(validate_height_cm(49.9).is_err());
        assert!(validate_height_cm(-10.0).is_err());
        assert!(validate_height_cm(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_weeks_rejects_zero() {
        let err = validate_weeks(0).unwrap_err();
        assert_eq!(err, CalcError::validation("weeks", "must be at least 1"));
        assert!(validate_weeks(12).is_ok());
    }

    #[test]
    fn test_validate_counts() {
        assert!(validate_reps(0).is_err());
        assert!(validate_reps(8).is_ok());
        assert!(validate_heart_rate(60).is_ok());
        assert!(validate_heart_rate(10).is_err());
        assert!(validate_duration_minutes(1441).is_err());
        assert!(validate_sleep_quality(0).is_err());
        assert!(validate_sleep_quality(10).is_ok());
        assert!(validate_calories(-1).is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("weight_kg", " 72.5 ").unwrap(), 72.5);
        assert!(parse_number("weight_kg", "").is_err());
        assert!(parse_number("weight_kg", "seventy").is_err());
        assert!(parse_number("weight_kg", "NaN").is_err());
        assert!(parse_number("weight_kg", "inf").is_err());
    }

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(parse_whole_number("reps", "8").unwrap(), 8);
        assert_eq!(parse_whole_number("reps", "8.0").unwrap(), 8);
        assert!(parse_whole_number("reps", "8.5").is_err());
        assert!(parse_whole_number("duration_minutes", "-30").is_err());
    }

    #[test]
    fn test_parse_category() {
        let level: ActivityLevel = parse_category("moderately_active").unwrap();
        assert_eq!(level, ActivityLevel::ModeratelyActive);
        let goal: CalcResult<FitnessGoal> = parse_category("shredding");
        assert!(matches!(goal, Err(CalcError::UnrecognizedCategory { .. })));
    }

    #[test]
    fn test_parse_activity_form_label() {
        assert_eq!(
            parse_activity_form_label("Very Active").unwrap(),
            ActivityLevel::ExtremelyActive
        );
        assert_eq!(parse_activity_form_label("Moderate").unwrap(), ActivityLevel::ModeratelyActive);
        assert!(matches!(
            parse_activity_form_label("Couch"),
            Err(CalcError::UnrecognizedCategory { .. })
        ));
    }

    #[test]
    fn test_user_message() {
        let err = CalcError::validation("height_cm", "must be between 50 and 300 cm");
        assert_eq!(user_message(&err), "Height: must be between 50 and 300 cm");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_weight_range(weight in 20.0f64..=500.0) {
            prop_assert!(validate_weight_kg("weight_kg", weight).is_ok());
        }

        #[test]
        fn prop_invalid_weight_below_min(weight in 0.0f64..20.0) {
            prop_assert!(validate_weight_kg("weight_kg", weight).is_err());
        }

        #[test]
        fn prop_parse_number_accepts_formatted_floats(value in -1.0e6f64..1.0e6) {
            let parsed = parse_number("value", &value.to_string()).unwrap();
            prop_assert_eq!(parsed, value);
        }
    }
}
