//! Health metrics calculations module
//!
//! Provides the calculators behind the profile screen and the calculator
//! tab: BMR, TDEE, daily calories, hydration, macro split, one-rep max,
//! body fat, heart-rate zones, weight-change pacing and sleep need.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Closed Categories**: Activity levels, goals and climates are enums, and
//!    parsing an unknown key fails instead of falling back to a default
//! 3. **Explicit Failure**: Formulas that are undefined for some inputs return
//!    `CalcError::NotComputable` rather than NaN or infinity
//! 4. **Stable Rounding**: Every calculator rounds half-up to a fixed number of
//!    places so results match the published fixtures exactly

use crate::errors::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Energy density of protein and carbohydrate
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;
/// Energy density of fat
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

/// Base water need in liters per kg of body weight
const WATER_LITERS_PER_KG: f64 = 0.035;
/// Floor water need in liters per kg of body weight
const MIN_WATER_LITERS_PER_KG: f64 = 0.03;

// ============================================================================
// Rounding
// ============================================================================

/// Round half-up to the nearest integer
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round half-up to a fixed number of decimal places
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}

/// Lowercase a category key and unify separators so "Very Active",
/// "very-active" and "very_active" compare equal
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

// ============================================================================
// Categories
// ============================================================================

/// Biological sex for physiological calculations
///
/// `Other` uses the female constants in every formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
    Other,
}

impl FromStr for BiologicalSex {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            "other" => Ok(BiologicalSex::Other),
            _ => Err(CalcError::unrecognized("biological sex", s)),
        }
    }
}

/// Activity level for TDEE and hydration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Extra liters of water per day on top of the weight-based need
    pub fn hydration_adjustment_liters(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 0.0,
            ActivityLevel::LightlyActive => 0.3,
            ActivityLevel::ModeratelyActive => 0.5,
            ActivityLevel::VeryActive => 0.7,
            ActivityLevel::ExtremelyActive => 1.0,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little to no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtremelyActive => "Very hard exercise, physical job",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }

    /// Parse a calculator-form label
    ///
    /// The form offers Sedentary/Light/Moderate/Active/Very Active, one step
    /// off the profile keys: "Active" is `VeryActive` and "Very Active" is
    /// `ExtremelyActive`.
    pub fn from_form_label(label: &str) -> CalcResult<Self> {
        match normalize_key(label).as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::LightlyActive),
            "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "active" => Ok(ActivityLevel::VeryActive),
            "very_active" => Ok(ActivityLevel::ExtremelyActive),
            _ => Err(CalcError::unrecognized("activity level", label)),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = CalcError;

    /// Accepts the profile keys; form labels go through `from_form_label`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extremely_active" => Ok(ActivityLevel::ExtremelyActive),
            _ => Err(CalcError::unrecognized("activity level", s)),
        }
    }
}

/// Primary fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    Endurance,
}

/// Share of daily calories assigned to each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 4] = [
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Maintenance,
        FitnessGoal::Endurance,
    ];

    /// Daily calorie surplus (positive) or deficit (negative)
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            FitnessGoal::WeightLoss => -500.0,
            FitnessGoal::MuscleGain => 300.0,
            FitnessGoal::Maintenance => 0.0,
            FitnessGoal::Endurance => 200.0,
        }
    }

    /// Macro split for this goal; endurance has no macro table
    pub fn macro_ratios(&self) -> Option<MacroRatios> {
        match self {
            FitnessGoal::WeightLoss => Some(MacroRatios {
                protein: 0.30,
                carbs: 0.35,
                fats: 0.35,
            }),
            FitnessGoal::MuscleGain => Some(MacroRatios {
                protein: 0.25,
                carbs: 0.45,
                fats: 0.30,
            }),
            FitnessGoal::Maintenance => Some(MacroRatios {
                protein: 0.25,
                carbs: 0.40,
                fats: 0.35,
            }),
            FitnessGoal::Endurance => None,
        }
    }

    /// Recommended weekly weight change range in kg
    pub fn weekly_rate_range_kg(&self) -> (f64, f64) {
        match self {
            FitnessGoal::WeightLoss => (0.25, 1.0),
            FitnessGoal::MuscleGain => (0.25, 0.75),
            FitnessGoal::Maintenance => (0.0, 0.0),
            FitnessGoal::Endurance => (0.0, 0.25),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::Maintenance => "Maintenance",
            FitnessGoal::Endurance => "Endurance",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::Maintenance => "maintenance",
            FitnessGoal::Endurance => "endurance",
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessGoal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "weight_loss" => Ok(FitnessGoal::WeightLoss),
            "muscle_gain" => Ok(FitnessGoal::MuscleGain),
            "maintenance" => Ok(FitnessGoal::Maintenance),
            "endurance" => Ok(FitnessGoal::Endurance),
            _ => Err(CalcError::unrecognized("fitness goal", s)),
        }
    }
}

/// Ambient climate for hydration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Climate {
    Cool,
    Moderate,
    Hot,
    VeryHot,
}

impl Climate {
    pub fn multiplier(&self) -> f64 {
        match self {
            Climate::Cool => 1.0,
            Climate::Moderate => 1.1,
            Climate::Hot => 1.3,
            Climate::VeryHot => 1.5,
        }
    }
}

impl FromStr for Climate {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "cool" => Ok(Climate::Cool),
            "moderate" => Ok(Climate::Moderate),
            "hot" => Ok(Climate::Hot),
            "very_hot" => Ok(Climate::VeryHot),
            _ => Err(CalcError::unrecognized("climate", s)),
        }
    }
}

/// Training exertion scale used by the sleep calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExertionLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ExertionLevel {
    fn sleep_adjustment_hours(&self) -> f64 {
        match self {
            ExertionLevel::Low => -0.5,
            ExertionLevel::Moderate => 0.0,
            ExertionLevel::High => 0.5,
            ExertionLevel::VeryHigh => 1.0,
        }
    }
}

impl FromStr for ExertionLevel {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "low" => Ok(ExertionLevel::Low),
            "moderate" => Ok(ExertionLevel::Moderate),
            "high" => Ok(ExertionLevel::High),
            "very_high" => Ok(ExertionLevel::VeryHigh),
            _ => Err(CalcError::unrecognized("exertion level", s)),
        }
    }
}

/// Perceived stress level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

impl StressLevel {
    fn sleep_adjustment_hours(&self) -> f64 {
        match self {
            StressLevel::Low => -0.25,
            StressLevel::Moderate => 0.0,
            StressLevel::High => 0.5,
        }
    }
}

impl FromStr for StressLevel {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "low" => Ok(StressLevel::Low),
            "moderate" => Ok(StressLevel::Moderate),
            "high" => Ok(StressLevel::High),
            _ => Err(CalcError::unrecognized("stress level", s)),
        }
    }
}

// ============================================================================
// BMR, TDEE and Daily Calories
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(age_years: u32, weight_kg: f64, height_cm: f64, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female | BiologicalSex::Other => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Daily calorie target: TDEE plus the goal's surplus or deficit, rounded
pub fn calculate_daily_calories(bmr: f64, activity_level: ActivityLevel, goal: FitnessGoal) -> i32 {
    round_half_up(calculate_tdee(bmr, activity_level) + goal.calorie_adjustment()) as i32
}

// ============================================================================
// Hydration
// ============================================================================

/// Daily hydration recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydrationTarget {
    /// Recommended intake, one decimal
    pub liters: f64,
    /// Weight-based floor, one decimal
    pub minimum_liters: f64,
    /// 250 ml glasses needed to reach the recommendation
    pub glasses_250ml: u32,
}

/// Calculate recommended daily water intake
///
/// `(weight × 0.035 + activity adjustment) × climate multiplier`, where a
/// missing climate applies no adjustment.
pub fn calculate_hydration(
    weight_kg: f64,
    activity_level: ActivityLevel,
    climate: Option<Climate>,
) -> HydrationTarget {
    let base = weight_kg * WATER_LITERS_PER_KG + activity_level.hydration_adjustment_liters();
    let total = base * climate.map_or(1.0, |c| c.multiplier());

    HydrationTarget {
        liters: round_to(total, 1),
        minimum_liters: round_to(weight_kg * MIN_WATER_LITERS_PER_KG, 1),
        glasses_250ml: (total * 4.0).ceil().max(0.0) as u32,
    }
}

// ============================================================================
// Macros
// ============================================================================

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fats_g: u32,
}

/// Split a calorie target into macro grams for a goal
pub fn calculate_macros(calories: i32, goal: FitnessGoal) -> CalcResult<MacroSplit> {
    if calories < 0 {
        return Err(CalcError::validation("calories", "must not be negative"));
    }
    let ratios = goal
        .macro_ratios()
        .ok_or_else(|| CalcError::unrecognized("macro goal", goal.as_str()))?;
    let calories = f64::from(calories);

    let grams = |ratio: f64, kcal_per_gram: f64| round_half_up(calories * ratio / kcal_per_gram) as u32;

    Ok(MacroSplit {
        protein_g: grams(ratios.protein, PROTEIN_KCAL_PER_GRAM),
        carbs_g: grams(ratios.carbs, CARBS_KCAL_PER_GRAM),
        fats_g: grams(ratios.fats, FAT_KCAL_PER_GRAM),
    })
}

// ============================================================================
// Strength
// ============================================================================

/// Working load derived from a one-rep max
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoad {
    pub percent: u32,
    pub load_kg: f64,
    pub rep_range: String,
}

/// One-rep max estimate with rep-range guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneRepMax {
    /// Estimated max, rounded to whole kg
    pub max_kg: f64,
    /// 90/80/70% loads
    pub training_loads: Vec<TrainingLoad>,
}

const TRAINING_ZONES: [(u32, &str); 3] = [(90, "1-2 reps"), (80, "3-5 reps"), (70, "6-8 reps")];

/// Estimate one-rep max with the Epley formula
///
/// 1RM = weight × (1 + reps / 30)
pub fn calculate_one_rep_max(weight_kg: f64, reps: u32) -> OneRepMax {
    let estimate = weight_kg * (1.0 + reps as f64 / 30.0);

    OneRepMax {
        max_kg: round_half_up(estimate),
        training_loads: TRAINING_ZONES
            .iter()
            .map(|(percent, rep_range)| TrainingLoad {
                percent: *percent,
                load_kg: round_half_up(estimate * *percent as f64 / 100.0),
                rep_range: rep_range.to_string(),
            })
            .collect(),
    }
}

// ============================================================================
// Body Fat
// ============================================================================

/// Estimate body fat percentage with the US Navy circumference method
///
/// BF% = 495 / (a - b × log10(waist - neck) + c × log10(height)) - 450
pub fn calculate_body_fat_percent(
    waist_cm: f64,
    neck_cm: f64,
    height_cm: f64,
    sex: BiologicalSex,
) -> CalcResult<f64> {
    const METRIC: &str = "body fat";

    if waist_cm <= neck_cm {
        return Err(CalcError::not_computable(
            METRIC,
            "waist circumference must be greater than neck circumference",
        ));
    }
    if height_cm <= 0.0 {
        return Err(CalcError::not_computable(METRIC, "height must be positive"));
    }

    let (a, b, c) = match sex {
        BiologicalSex::Male => (1.0324, 0.19077, 0.15456),
        BiologicalSex::Female | BiologicalSex::Other => (1.29579, 0.35004, 0.22100),
    };

    let density = a - b * (waist_cm - neck_cm).log10() + c * height_cm.log10();
    let body_fat = 495.0 / density - 450.0;

    if !body_fat.is_finite() || body_fat <= 0.0 {
        return Err(CalcError::not_computable(
            METRIC,
            format!("measurements give an implausible estimate ({:.1}%)", body_fat),
        ));
    }

    Ok(round_to(body_fat, 1))
}

// ============================================================================
// Heart Rate
// ============================================================================

/// Heart-rate training zones (Karvonen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZones {
    pub max: i32,
    pub fat_burn: i32,
    pub cardio: i32,
    pub peak: i32,
}

/// Calculate target heart-rate zones from age and resting heart rate
///
/// max = 220 - age; zone = resting + (max - resting) × pct
pub fn calculate_target_heart_rate(age_years: u32, resting_hr: u32) -> HeartRateZones {
    let max = i32::try_from(220 - i64::from(age_years)).unwrap_or(i32::MIN);
    let resting = resting_hr as f64;
    let reserve = max as f64 - resting;
    let zone = |pct: f64| round_half_up(resting + reserve * pct) as i32;

    HeartRateZones {
        max,
        fat_burn: zone(0.6),
        cardio: zone(0.7),
        peak: zone(0.85),
    }
}

// ============================================================================
// Weight Change Pacing
// ============================================================================

/// Direction of the required weight change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceDirection {
    /// Lose weight through a caloric deficit
    Deficit,
    /// Gain weight through a caloric surplus
    Surplus,
    /// Already at target
    Hold,
}

/// Weekly pacing toward a target weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressPace {
    /// Signed kg per week, two decimals
    pub weekly_change_kg: f64,
    /// Signed kg per four weeks, two decimals
    pub monthly_change_kg: f64,
    /// Signed total change
    pub total_change_kg: f64,
    pub direction: PaceDirection,
}

/// Calculate the weekly change needed to reach a target weight
pub fn calculate_progress_pace(current_kg: f64, target_kg: f64, weeks: u32) -> CalcResult<ProgressPace> {
    if weeks == 0 {
        return Err(CalcError::not_computable(
            "progress pace",
            "timeline must be at least one week",
        ));
    }

    let total_change = target_kg - current_kg;
    let weekly = total_change / weeks as f64;
    if !weekly.is_finite() {
        return Err(CalcError::not_computable("progress pace", "weights must be finite"));
    }

    let direction = if total_change < 0.0 {
        PaceDirection::Deficit
    } else if total_change > 0.0 {
        PaceDirection::Surplus
    } else {
        PaceDirection::Hold
    };

    Ok(ProgressPace {
        weekly_change_kg: round_to(weekly, 2),
        monthly_change_kg: round_to(weekly * 4.0, 2),
        total_change_kg: total_change,
        direction,
    })
}

// ============================================================================
// Sleep
// ============================================================================

/// Recommended nightly sleep in hours
pub fn calculate_sleep_need(age_years: u32, exertion: ExertionLevel, stress: StressLevel) -> f64 {
    let base = if age_years < 18 {
        9.0
    } else if age_years > 65 {
        7.5
    } else {
        8.0
    };

    round_to(
        base + exertion.sleep_adjustment_hours() + stress.sleep_adjustment_hours(),
        1,
    )
}
