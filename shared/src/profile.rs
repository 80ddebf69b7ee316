//! User profile with derived nutrition targets
//!
//! `UserProfile` owns the biometric input and the metrics derived from it.
//! The derived metrics are private and only ever produced by
//! [`DerivedMetrics::from_input`], on construction and on every update.

use crate::achievements::{self, AchievementSummary};
use crate::errors::{CalcError, CalcResult};
use crate::health_metrics::{
    calculate_bmr, calculate_daily_calories, calculate_hydration, calculate_macros,
    calculate_progress_pace, ActivityLevel, BiologicalSex, FitnessGoal, MacroSplit, ProgressPace,
};
use crate::levels::{calculate_level, level_progress, LevelProgress};
use crate::progression::{get_current_rank, get_next_rank, Rank};
use crate::validation::validate_finite;
use crate::xp::{total_xp, StreakTier, XpReward};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Biometric and goal input as entered on the profile form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(range(min = 18, max = 80, message = "must be between 18 and 80"))]
    pub age: u32,
    #[validate(range(min = 30.0, max = 300.0, message = "must be between 30 and 300 kg"))]
    pub weight_kg: f64,
    #[validate(range(min = 120.0, max = 250.0, message = "must be between 120 and 250 cm"))]
    pub height_cm: f64,
    pub sex: BiologicalSex,
    pub activity_level: ActivityLevel,
    pub goal: FitnessGoal,
    #[validate(range(min = 30.0, max = 300.0, message = "must be between 30 and 300 kg"))]
    pub target_weight_kg: Option<f64>,
    /// Planned kg per week toward the target weight
    #[validate(range(min = 0.1, max = 1.5, message = "must be between 0.1 and 1.5 kg per week"))]
    pub weekly_change_kg: Option<f64>,
}

impl ProfileInput {
    /// Range checks plus finiteness, which `range` does not cover for NaN
    pub fn check(&self) -> CalcResult<()> {
        self.validate()?;
        validate_finite("weight_kg", self.weight_kg)?;
        validate_finite("height_cm", self.height_cm)?;
        if let Some(target) = self.target_weight_kg {
            validate_finite("target_weight_kg", target)?;
        }
        if let Some(rate) = self.weekly_change_kg {
            validate_finite("weekly_change_kg", rate)?;
        }
        Ok(())
    }
}

/// Targets computed from a profile input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub bmr: f64,
    pub daily_calories: i32,
    pub water_liters: f64,
    pub macros: MacroSplit,
}

impl DerivedMetrics {
    pub fn from_input(input: &ProfileInput) -> CalcResult<Self> {
        let bmr = calculate_bmr(input.age, input.weight_kg, input.height_cm, input.sex);
        let daily_calories = calculate_daily_calories(bmr, input.activity_level, input.goal);
        let water_liters = calculate_hydration(input.weight_kg, input.activity_level, None).liters;
        let macros = calculate_macros(daily_calories, input.goal)?;

        Ok(Self {
            bmr,
            daily_calories,
            water_liters,
            macros,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    input: ProfileInput,
    metrics: DerivedMetrics,
    total_xp: u64,
    streak_days: u32,
    achievements: BTreeSet<String>,
}

impl UserProfile {
    /// Validate the input and derive every metric
    pub fn new(input: ProfileInput) -> CalcResult<Self> {
        input.check()?;
        let metrics = DerivedMetrics::from_input(&input)?;

        Ok(Self {
            input,
            metrics,
            total_xp: 0,
            streak_days: 0,
            achievements: BTreeSet::new(),
        })
    }

    /// Replace the biometric input wholesale
    ///
    /// On error the profile is left unchanged.
    pub fn update(&mut self, input: ProfileInput) -> CalcResult<()> {
        input.check()?;
        let metrics = DerivedMetrics::from_input(&input)?;
        self.input = input;
        self.metrics = metrics;
        Ok(())
    }

    pub fn input(&self) -> &ProfileInput {
        &self.input
    }

    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    /// Restore XP earned before this profile was loaded
    pub fn set_total_xp(&mut self, total_xp: u64) {
        self.total_xp = total_xp;
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.total_xp)
    }

    pub fn level_progress(&self) -> LevelProgress {
        level_progress(self.total_xp)
    }

    pub fn rank(&self) -> &'static Rank {
        get_current_rank(self.level())
    }

    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    pub fn set_streak(&mut self, days: u32) {
        self.streak_days = days;
    }

    /// Add rewards to total XP and return the number of levels gained
    pub fn apply_rewards(&mut self, rewards: &[XpReward]) -> u32 {
        let before = self.level();
        self.total_xp = self.total_xp.saturating_add(total_xp(rewards));
        self.level() - before
    }

    /// Record an achievement; returns false when already unlocked
    pub fn unlock_achievement(&mut self, id: &str) -> CalcResult<bool> {
        if achievements::get_achievement(id).is_none() {
            return Err(CalcError::unrecognized("achievement", id));
        }
        Ok(self.achievements.insert(id.to_string()))
    }

    pub fn achievements(&self) -> impl Iterator<Item = &str> {
        self.achievements.iter().map(String::as_str)
    }

    /// Weekly pace toward the target weight, if both target and rate are set
    pub fn target_pace(&self) -> Option<CalcResult<ProgressPace>> {
        let target = self.input.target_weight_kg?;
        let rate = self.input.weekly_change_kg?;
        let weeks = ((target - self.input.weight_kg).abs() / rate).ceil().max(1.0) as u32;
        Some(calculate_progress_pace(self.input.weight_kg, target, weeks))
    }

    /// Serializable snapshot of the profile for display
    pub fn summary(&self) -> ProfileSummary {
        let (_, achievement_summary) = achievements::evaluate(|id| {
            achievements::get_achievement(id)
                .filter(|_| self.achievements.contains(id))
                .map(|def| def.max_progress)
        });

        ProfileSummary {
            input: self.input.clone(),
            metrics: self.metrics,
            level: self.level_progress(),
            rank: self.rank().name,
            next_rank: get_next_rank(self.level()).map(|r| r.name),
            streak_days: self.streak_days,
            streak_tier: StreakTier::from_days(self.streak_days),
            achievements: self.achievements.iter().cloned().collect(),
            achievement_summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub input: ProfileInput,
    pub metrics: DerivedMetrics,
    pub level: LevelProgress,
    pub rank: &'static str,
    pub next_rank: Option<&'static str>,
    pub streak_days: u32,
    pub streak_tier: StreakTier,
    pub achievements: Vec<String>,
    pub achievement_summary: AchievementSummary,
}
