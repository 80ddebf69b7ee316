//! Calculator dispatch
//!
//! One closed enum of calculator requests. Each request is validated, run
//! through the matching function in [`crate::health_metrics`] and rendered as
//! a display result with a headline value and recommendation lines.

use crate::errors::{CalcError, CalcResult};
use crate::health_metrics::{
    calculate_bmr, calculate_body_fat_percent, calculate_hydration, calculate_macros,
    calculate_one_rep_max, calculate_progress_pace, calculate_sleep_need,
    calculate_target_heart_rate, calculate_tdee, round_half_up, ActivityLevel, BiologicalSex,
    Climate, ExertionLevel, FitnessGoal, PaceDirection, StressLevel,
};
use crate::validation::{
    validate_age, validate_calories, validate_circumference_cm, validate_heart_rate,
    validate_height_cm, validate_reps, validate_weeks, validate_weight_kg,
};
use serde::{Deserialize, Serialize};

/// Calculator input, tagged by `calculator`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorRequest {
    /// Maintenance calories (TDEE)
    Calories {
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        sex: BiologicalSex,
        activity_level: ActivityLevel,
    },
    Hydration {
        weight_kg: f64,
        activity_level: ActivityLevel,
        climate: Option<Climate>,
    },
    Sleep {
        age: u32,
        exertion: ExertionLevel,
        stress: StressLevel,
    },
    Macros {
        calories: i32,
        goal: FitnessGoal,
    },
    OneRepMax {
        weight_kg: f64,
        reps: u32,
    },
    Bmr {
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        sex: BiologicalSex,
    },
    BodyFat {
        waist_cm: f64,
        neck_cm: f64,
        height_cm: f64,
        sex: BiologicalSex,
    },
    HeartRate {
        age: u32,
        resting_hr: u32,
    },
    Progress {
        current_kg: f64,
        target_kg: f64,
        weeks: u32,
    },
}

/// Display result of a calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub value: f64,
    pub unit: String,
    pub description: String,
    pub recommendations: Vec<String>,
}

impl CalculatorResult {
    fn new(value: f64, unit: &str, description: impl Into<String>, recommendations: Vec<String>) -> Self {
        Self {
            value,
            unit: unit.to_string(),
            description: description.into(),
            recommendations,
        }
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl CalculatorRequest {
    /// Stable calculator id
    pub fn kind(&self) -> &'static str {
        match self {
            CalculatorRequest::Calories { .. } => "calories",
            CalculatorRequest::Hydration { .. } => "hydration",
            CalculatorRequest::Sleep { .. } => "sleep",
            CalculatorRequest::Macros { .. } => "macros",
            CalculatorRequest::OneRepMax { .. } => "one_rep_max",
            CalculatorRequest::Bmr { .. } => "bmr",
            CalculatorRequest::BodyFat { .. } => "body_fat",
            CalculatorRequest::HeartRate { .. } => "heart_rate",
            CalculatorRequest::Progress { .. } => "progress",
        }
    }

    /// Range-check the inputs
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            CalculatorRequest::Calories {
                age,
                weight_kg,
                height_cm,
                ..
            }
            | CalculatorRequest::Bmr {
                age,
                weight_kg,
                height_cm,
                ..
            } => {
                validate_age(age)?;
                validate_weight_kg("weight_kg", weight_kg)?;
                validate_height_cm(height_cm)
            }
            CalculatorRequest::Hydration { weight_kg, .. } => validate_weight_kg("weight_kg", weight_kg),
            CalculatorRequest::Sleep { age, .. } => validate_age(age),
            CalculatorRequest::Macros { calories, .. } => validate_calories(calories),
            CalculatorRequest::OneRepMax { weight_kg, reps } => {
                validate_weight_kg("weight_kg", weight_kg)?;
                validate_reps(reps)
            }
            CalculatorRequest::BodyFat {
                waist_cm,
                neck_cm,
                height_cm,
                ..
            } => {
                validate_circumference_cm("waist_cm", waist_cm)?;
                validate_circumference_cm("neck_cm", neck_cm)?;
                validate_height_cm(height_cm)
            }
            CalculatorRequest::HeartRate { age, resting_hr } => {
                validate_age(age)?;
                validate_heart_rate(resting_hr)?;
                if resting_hr as i64 >= 220 - age as i64 {
                    return Err(CalcError::validation(
                        "resting_hr",
                        "must be below the maximum heart rate for this age",
                    ));
                }
                Ok(())
            }
            CalculatorRequest::Progress {
                current_kg,
                target_kg,
                weeks,
            } => {
                validate_weight_kg("current_kg", current_kg)?;
                validate_weight_kg("target_kg", target_kg)?;
                validate_weeks(weeks)
            }
        }
    }

    /// Validate, compute and render
    pub fn evaluate(&self) -> CalcResult<CalculatorResult> {
        self.validate()?;

        let result = match *self {
            CalculatorRequest::Calories {
                age,
                weight_kg,
                height_cm,
                sex,
                activity_level,
            } => {
                let bmr = calculate_bmr(age, weight_kg, height_cm, sex);
                let calories = round_half_up(calculate_tdee(bmr, activity_level));
                CalculatorResult::new(
                    calories,
                    "kcal/day",
                    "Daily caloric needs for maintenance",
                    vec![
                        format!("For weight loss: {} kcal/day", round_half_up(calories * 0.8)),
                        format!("For muscle gain: {} kcal/day", round_half_up(calories * 1.1)),
                        format!("BMR: {} kcal/day", round_half_up(bmr)),
                    ],
                )
            }
            CalculatorRequest::Hydration {
                weight_kg,
                activity_level,
                climate,
            } => {
                let target = calculate_hydration(weight_kg, activity_level, climate);
                CalculatorResult::new(
                    target.liters,
                    "liters/day",
                    "Recommended daily water intake",
                    vec![
                        format!("Minimum: {} L/day", target.minimum_liters),
                        format!("Glasses (250ml): {} glasses", target.glasses_250ml),
                        "Increase intake during exercise and hot weather".to_string(),
                    ],
                )
            }
            CalculatorRequest::Sleep { age, exertion, stress } => {
                let hours = calculate_sleep_need(age, exertion, stress);
                CalculatorResult::new(
                    hours,
                    "hours/night",
                    "Recommended sleep duration",
                    vec![
                        format!("Bedtime range: {}-{} hours", hours.floor(), hours.ceil()),
                        "Maintain consistent sleep schedule".to_string(),
                        "Avoid screens 1 hour before bed".to_string(),
                    ],
                )
            }
            CalculatorRequest::Macros { calories, goal } => {
                let split = calculate_macros(calories, goal)?;
                let ratios = goal
                    .macro_ratios()
                    .ok_or_else(|| CalcError::unrecognized("macro goal", goal.as_str()))?;
                let pct = |ratio: f64| round_half_up(ratio * 100.0);
                CalculatorResult::new(
                    split.protein_g as f64,
                    "g protein",
                    format!("Macronutrient breakdown for {}", goal.label().to_lowercase()),
                    vec![
                        format!("Protein: {}g ({}%)", split.protein_g, pct(ratios.protein)),
                        format!("Carbs: {}g ({}%)", split.carbs_g, pct(ratios.carbs)),
                        format!("Fats: {}g ({}%)", split.fats_g, pct(ratios.fats)),
                    ],
                )
            }
            CalculatorRequest::OneRepMax { weight_kg, reps } => {
                let estimate = calculate_one_rep_max(weight_kg, reps);
                CalculatorResult::new(
                    estimate.max_kg,
                    "kg",
                    "Estimated one-rep maximum",
                    estimate
                        .training_loads
                        .iter()
                        .map(|load| format!("{}%: {}kg ({})", load.percent, load.load_kg, load.rep_range))
                        .collect(),
                )
            }
            CalculatorRequest::Bmr {
                age,
                weight_kg,
                height_cm,
                sex,
            } => CalculatorResult::new(
                round_half_up(calculate_bmr(age, weight_kg, height_cm, sex)),
                "kcal/day",
                "Basal Metabolic Rate (calories at rest)",
                lines(&[
                    "This is your minimum daily caloric need",
                    "Add activity calories for total daily needs",
                    "Never eat below BMR for extended periods",
                ]),
            ),
            CalculatorRequest::BodyFat {
                waist_cm,
                neck_cm,
                height_cm,
                sex,
            } => {
                let body_fat = calculate_body_fat_percent(waist_cm, neck_cm, height_cm, sex)?;
                let (healthy, athletic) = match sex {
                    BiologicalSex::Male => ("Healthy range: 10-20%", "Athletic: 6-13%"),
                    BiologicalSex::Female | BiologicalSex::Other => {
                        ("Healthy range: 16-24%", "Athletic: 14-20%")
                    }
                };
                CalculatorResult::new(
                    body_fat,
                    "%",
                    "Estimated body fat percentage",
                    lines(&[healthy, athletic, "This is an estimate - DEXA scan for accuracy"]),
                )
            }
            CalculatorRequest::HeartRate { age, resting_hr } => {
                let zones = calculate_target_heart_rate(age, resting_hr);
                CalculatorResult::new(
                    zones.max as f64,
                    "bpm",
                    "Maximum heart rate",
                    vec![
                        format!("Fat burn zone: {} bpm (60-70%)", zones.fat_burn),
                        format!("Cardio zone: {} bpm (70-80%)", zones.cardio),
                        format!("Peak zone: {} bpm (85-95%)", zones.peak),
                    ],
                )
            }
            CalculatorRequest::Progress {
                current_kg,
                target_kg,
                weeks,
            } => {
                let pace = calculate_progress_pace(current_kg, target_kg, weeks)?;
                let focus = match pace.direction {
                    PaceDirection::Deficit => "Focus on caloric deficit",
                    PaceDirection::Surplus => "Focus on caloric surplus",
                    PaceDirection::Hold => "Maintain your current intake",
                };
                CalculatorResult::new(
                    pace.weekly_change_kg.abs(),
                    "kg/week",
                    "Required weekly progress",
                    vec![
                        format!("Total change needed: {}kg", pace.total_change_kg.abs()),
                        format!("Monthly target: {}kg", pace.monthly_change_kg.abs()),
                        focus.to_string(),
                    ],
                )
            }
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_is_tagged_by_calculator() {
        let request: CalculatorRequest = serde_json::from_value(json!({
            "calculator": "one_rep_max",
            "weight_kg": 80.0,
            "reps": 8
        }))
        .unwrap();
        assert_eq!(
            request,
            CalculatorRequest::OneRepMax {
                weight_kg: 80.0,
                reps: 8
            }
        );
        assert_eq!(request.kind(), "one_rep_max");
    }

    #[test]
    fn test_unknown_calculator_fails_to_parse() {
        let parsed = serde_json::from_value::<CalculatorRequest>(json!({
            "calculator": "vo2max",
            "age": 30
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_one_rep_max_result() {
        let result = CalculatorRequest::OneRepMax {
            weight_kg: 80.0,
            reps: 8,
        }
        .evaluate()
        .unwrap();
        assert_eq!(result.value, 101.0);
        assert_eq!(result.unit, "kg");
        assert_eq!(
            result.recommendations,
            vec!["90%: 91kg (1-2 reps)", "80%: 81kg (3-5 reps)", "70%: 71kg (6-8 reps)"]
        );
    }

    #[test]
    fn test_calories_result() {
        let result = CalculatorRequest::Calories {
            age: 25,
            weight_kg: 70.0,
            height_cm: 175.0,
            sex: BiologicalSex::Male,
            activity_level: ActivityLevel::Sedentary,
        }
        .evaluate()
        .unwrap();
        // 1673.75 * 1.2 = 2008.5
        assert_eq!(result.value, 2009.0);
        assert_eq!(result.recommendations[2], "BMR: 1674 kcal/day");
    }

    #[test]
    fn test_macros_result() {
        let result = CalculatorRequest::Macros {
            calories: 2000,
            goal: FitnessGoal::MuscleGain,
        }
        .evaluate()
        .unwrap();
        assert_eq!(result.value, 125.0);
        assert_eq!(result.description, "Macronutrient breakdown for muscle gain");
        assert_eq!(result.recommendations[2], "Fats: 67g (30%)");
    }

    #[test]
    fn test_heart_rate_result() {
        let result = CalculatorRequest::HeartRate { age: 25, resting_hr: 60 }
            .evaluate()
            .unwrap();
        assert_eq!(result.value, 195.0);
        assert_eq!(result.recommendations[0], "Fat burn zone: 141 bpm (60-70%)");
    }

    #[test]
    fn test_sleep_result() {
        let result = CalculatorRequest::Sleep {
            age: 40,
            exertion: ExertionLevel::High,
            stress: StressLevel::Low,
        }
        .evaluate()
        .unwrap();
        assert_eq!(result.value, 8.3);
        assert_eq!(result.recommendations[0], "Bedtime range: 8-9 hours");
    }

    #[test]
    fn test_progress_result() {
        let result = CalculatorRequest::Progress {
            current_kg: 70.0,
            target_kg: 65.0,
            weeks: 12,
        }
        .evaluate()
        .unwrap();
        assert_eq!(result.value, 0.42);
        assert_eq!(
            result.recommendations,
            vec!["Total change needed: 5kg", "Monthly target: 1.67kg", "Focus on caloric deficit"]
        );
    }

    #[test]
    fn test_body_fat_not_computable() {
        let err = CalculatorRequest::BodyFat {
            waist_cm: 36.0,
            neck_cm: 38.0,
            height_cm: 175.0,
            sex: BiologicalSex::Male,
        }
        .evaluate()
        .unwrap_err();
        assert!(matches!(err, CalcError::NotComputable { .. }));
    }

    #[test]
    fn test_validation_runs_before_calculation() {
        let err = CalculatorRequest::Progress {
            current_kg: 70.0,
            target_kg: 65.0,
            weeks: 0,
        }
        .evaluate()
        .unwrap_err();
        assert!(matches!(err, CalcError::Validation { ref field, .. } if field == "weeks"));

        let err = CalculatorRequest::HeartRate { age: 30, resting_hr: 195 }
            .evaluate()
            .unwrap_err();
        assert!(matches!(err, CalcError::Validation { .. }));
    }

    #[test]
    fn test_endurance_macros_are_unrecognized() {
        let err = CalculatorRequest::Macros {
            calories: 2500,
            goal: FitnessGoal::Endurance,
        }
        .evaluate()
        .unwrap_err();
        assert!(matches!(err, CalcError::UnrecognizedCategory { .. }));
    }
}
