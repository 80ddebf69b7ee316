//! XP reward engine
//!
//! Converts completed activities into [`XpReward`] values. Every function is
//! pure: the reward timestamp is passed in by the caller.

use crate::errors::CalcError;
use crate::health_metrics::{normalize_key, round_half_up, FitnessGoal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Base Values
// ============================================================================

/// Light exercise, under 30 minutes
pub const WORKOUT_LIGHT_XP: u32 = 25;
/// Moderate exercise, 30-45 minutes
pub const WORKOUT_MODERATE_XP: u32 = 50;
/// Intense exercise, 45-60 minutes
pub const WORKOUT_INTENSE_XP: u32 = 75;
/// Extreme exercise, 60 minutes or more
pub const WORKOUT_EXTREME_XP: u32 = 100;

pub const LOG_MEAL_XP: u32 = 10;
pub const MEET_CALORIE_GOAL_XP: u32 = 25;
pub const MEET_MACRO_GOALS_XP: u32 = 35;
pub const HEALTHY_CHOICE_XP: u32 = 15;

pub const WATER_GLASS_XP: u32 = 5;
pub const DAILY_HYDRATION_XP: u32 = 20;
/// Per day of an ongoing hydration streak
pub const HYDRATION_STREAK_XP: u32 = 10;

pub const SLEEP_DURATION_XP: u32 = 20;
pub const SLEEP_QUALITY_XP: u32 = 15;
pub const SLEEP_CONSISTENCY_XP: u32 = 25;
/// Minimum quality score (1-10) that earns the quality bonus
pub const GOOD_SLEEP_QUALITY: u8 = 7;

/// Meals counted in the daily potential
const MEALS_PER_DAY: u32 = 4;

/// Streak lengths that pay a bonus, and the bonus paid
pub const STREAK_BONUSES: [(u32, u32); 4] = [(3, 50), (7, 150), (30, 500), (100, 2_000)];

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpCategory {
    Workout,
    Nutrition,
    Hydration,
    Sleep,
    Milestone,
    Streak,
}

/// Workout intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Moderate,
    High,
    Extreme,
}

impl Intensity {
    pub fn multiplier(&self) -> f64 {
        match self {
            Intensity::Low => 0.8,
            Intensity::Moderate => 1.0,
            Intensity::High => 1.3,
            Intensity::Extreme => 1.6,
        }
    }
}

impl FromStr for Intensity {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "low" => Ok(Intensity::Low),
            "moderate" => Ok(Intensity::Moderate),
            "high" => Ok(Intensity::High),
            "extreme" => Ok(Intensity::Extreme),
            _ => Err(CalcError::unrecognized("intensity", s)),
        }
    }
}

/// Multiplier applied to workout XP for the user's goal
pub fn goal_multiplier(goal: FitnessGoal) -> f64 {
    match goal {
        FitnessGoal::WeightLoss => 1.2,
        FitnessGoal::MuscleGain => 1.3,
        FitnessGoal::Maintenance => 1.0,
        FitnessGoal::Endurance => 1.1,
    }
}

/// What kind of daily habit a streak counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakType {
    Workout,
    Nutrition,
    Hydration,
    Overall,
}

impl fmt::Display for StreakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreakType::Workout => "workout",
            StreakType::Nutrition => "nutrition",
            StreakType::Hydration => "hydration",
            StreakType::Overall => "overall",
        })
    }
}

impl FromStr for StreakType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "workout" => Ok(StreakType::Workout),
            "nutrition" => Ok(StreakType::Nutrition),
            "hydration" => Ok(StreakType::Hydration),
            "overall" => Ok(StreakType::Overall),
            _ => Err(CalcError::unrecognized("streak type", s)),
        }
    }
}

/// One-off achievements that pay a fixed reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    FirstWorkout,
    WeekComplete,
    MonthComplete,
    GoalAchieved,
}

impl Milestone {
    pub fn xp(&self) -> u32 {
        match self {
            Milestone::FirstWorkout => 100,
            Milestone::WeekComplete => 200,
            Milestone::MonthComplete => 500,
            Milestone::GoalAchieved => 1_000,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Milestone::FirstWorkout => "Completed first workout",
            Milestone::WeekComplete => "Completed every workout this week",
            Milestone::MonthComplete => "Completed every goal this month",
            Milestone::GoalAchieved => "Achieved primary fitness goal",
        }
    }
}

// ============================================================================
// Rewards
// ============================================================================

/// A single XP grant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpReward {
    pub amount: u32,
    pub reason: String,
    pub category: XpCategory,
    pub timestamp: DateTime<Utc>,
}

impl XpReward {
    fn new(amount: u32, reason: impl Into<String>, category: XpCategory, at: DateTime<Utc>) -> Self {
        Self {
            amount,
            reason: reason.into(),
            category,
            timestamp: at,
        }
    }
}

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Base workout XP for a duration bracket
pub fn workout_base_xp(duration_minutes: u32) -> u32 {
    match duration_minutes {
        0..=29 => WORKOUT_LIGHT_XP,
        30..=44 => WORKOUT_MODERATE_XP,
        45..=59 => WORKOUT_INTENSE_XP,
        _ => WORKOUT_EXTREME_XP,
    }
}

/// Calculate XP for a completed workout
///
/// base(duration) × intensity × goal, rounded
pub fn calculate_workout_xp(
    duration_minutes: u32,
    intensity: Intensity,
    workout_type: &str,
    goal: FitnessGoal,
    at: DateTime<Utc>,
) -> XpReward {
    let raw = workout_base_xp(duration_minutes) as f64 * intensity.multiplier() * goal_multiplier(goal);

    XpReward::new(
        round_half_up(raw) as u32,
        format!("{} workout completed", workout_type),
        XpCategory::Workout,
        at,
    )
}

/// Calculate XP for a day of nutrition logging
///
/// Each satisfied condition produces its own entry.
pub fn calculate_nutrition_xp(
    meals_logged: u32,
    calorie_goal_met: bool,
    macro_goals_met: bool,
    healthy_choices: u32,
    at: DateTime<Utc>,
) -> Vec<XpReward> {
    let mut rewards = Vec::new();

    if meals_logged > 0 {
        rewards.push(XpReward::new(
            meals_logged.saturating_mul(LOG_MEAL_XP),
            format!("Logged {}", plural(meals_logged, "meal", "meals")),
            XpCategory::Nutrition,
            at,
        ));
    }
    if calorie_goal_met {
        rewards.push(XpReward::new(
            MEET_CALORIE_GOAL_XP,
            "Met daily calorie goal",
            XpCategory::Nutrition,
            at,
        ));
    }
    if macro_goals_met {
        rewards.push(XpReward::new(
            MEET_MACRO_GOALS_XP,
            "Met all macro targets",
            XpCategory::Nutrition,
            at,
        ));
    }
    if healthy_choices > 0 {
        rewards.push(XpReward::new(
            healthy_choices.saturating_mul(HEALTHY_CHOICE_XP),
            format!("Made {}", plural(healthy_choices, "healthy choice", "healthy choices")),
            XpCategory::Nutrition,
            at,
        ));
    }

    rewards
}

/// Calculate XP for water intake
pub fn calculate_hydration_xp(
    glasses_logged: u32,
    daily_goal_met: bool,
    current_streak: u32,
    at: DateTime<Utc>,
) -> Vec<XpReward> {
    let mut rewards = Vec::new();

    if glasses_logged > 0 {
        rewards.push(XpReward::new(
            glasses_logged.saturating_mul(WATER_GLASS_XP),
            format!("Logged {} of water", plural(glasses_logged, "glass", "glasses")),
            XpCategory::Hydration,
            at,
        ));
    }
    if daily_goal_met {
        rewards.push(XpReward::new(
            DAILY_HYDRATION_XP,
            "Met daily hydration goal",
            XpCategory::Hydration,
            at,
        ));
    }
    if current_streak > 0 {
        rewards.push(XpReward::new(
            current_streak.saturating_mul(HYDRATION_STREAK_XP),
            format!("{}-day hydration streak", current_streak),
            XpCategory::Hydration,
            at,
        ));
    }

    rewards
}

/// Calculate XP for a night of sleep
pub fn calculate_sleep_xp(
    hours: f64,
    quality: u8,
    target_hours: f64,
    consistent_schedule: bool,
    at: DateTime<Utc>,
) -> Vec<XpReward> {
    let mut rewards = Vec::new();

    if hours >= target_hours {
        rewards.push(XpReward::new(
            SLEEP_DURATION_XP,
            "Met sleep duration goal",
            XpCategory::Sleep,
            at,
        ));
    }
    if quality >= GOOD_SLEEP_QUALITY {
        rewards.push(XpReward::new(
            SLEEP_QUALITY_XP,
            "Good sleep quality",
            XpCategory::Sleep,
            at,
        ));
    }
    if consistent_schedule {
        rewards.push(XpReward::new(
            SLEEP_CONSISTENCY_XP,
            "Consistent sleep schedule",
            XpCategory::Sleep,
            at,
        ));
    }

    rewards
}

/// Bonus for reaching an exact streak length
///
/// Only 3, 7, 30 and 100 days pay out; lengths in between or beyond pay nothing.
pub fn calculate_streak_bonus(
    streak_length: u32,
    streak_type: StreakType,
    at: DateTime<Utc>,
) -> Option<XpReward> {
    STREAK_BONUSES
        .iter()
        .find(|(length, _)| *length == streak_length)
        .map(|(length, bonus)| {
            XpReward::new(
                *bonus,
                format!("{}-day {} streak bonus!", length, streak_type),
                XpCategory::Streak,
                at,
            )
        })
}

/// Fixed reward for a milestone
pub fn milestone_reward(milestone: Milestone, at: DateTime<Utc>) -> XpReward {
    XpReward::new(milestone.xp(), milestone.reason(), XpCategory::Milestone, at)
}

/// Best-case XP for one day: an intense workout, nutrition, hydration and
/// sleep goals, and every meal logged
pub fn daily_xp_potential() -> u32 {
    WORKOUT_INTENSE_XP
        + MEET_CALORIE_GOAL_XP
        + MEET_MACRO_GOALS_XP
        + DAILY_HYDRATION_XP
        + SLEEP_DURATION_XP
        + MEALS_PER_DAY * LOG_MEAL_XP
}

/// Best-case XP for a week including the week-complete milestone
pub fn weekly_xp_potential() -> u32 {
    daily_xp_potential() * 7 + Milestone::WeekComplete.xp()
}

/// Sum a batch of rewards
pub fn total_xp(rewards: &[XpReward]) -> u64 {
    rewards.iter().map(|r| u64::from(r.amount)).sum()
}

// ============================================================================
// Streak Tiers
// ============================================================================

/// Display tier of a running streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    Inactive,
    Started,
    Building,
    OnFire,
    Legendary,
    Master,
}

impl StreakTier {
    pub fn from_days(days: u32) -> Self {
        match days {
            0 => StreakTier::Inactive,
            1 => StreakTier::Started,
            2..=6 => StreakTier::Building,
            7..=29 => StreakTier::OnFire,
            30..=99 => StreakTier::Legendary,
            _ => StreakTier::Master,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StreakTier::Inactive => "Start your streak today!",
            StreakTier::Started => "Great start! Keep it up!",
            StreakTier::Building => "Building momentum!",
            StreakTier::OnFire => "You're on fire!",
            StreakTier::Legendary => "Legendary streak!",
            StreakTier::Master => "Streak Master!",
        }
    }
}
