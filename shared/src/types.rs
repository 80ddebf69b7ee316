//! API request and response types

use crate::achievements::{Achievement, AchievementSummary};
use crate::errors::{CalcError, CalcResult};
use crate::health_metrics::{FitnessGoal, ProgressPace};
use crate::levels::{level_progress, xp_threshold_for_level, LevelProgress};
use crate::plans::FitnessLevel;
use crate::profile::{ProfileInput, ProfileSummary};
use crate::progression::{
    calculate_level_up_rewards, get_current_rank, get_level_reward, get_next_rank,
    get_unlocked_customizations, get_unlocked_features, ActivityHistory, LevelReward,
    LevelUpRewards, Rank,
};
use crate::validation::{
    validate_duration_minutes, validate_sleep_hours, validate_sleep_quality,
};
use crate::xp::{
    calculate_hydration_xp, calculate_nutrition_xp, calculate_sleep_xp, calculate_streak_bonus,
    calculate_workout_xp, milestone_reward, Intensity, Milestone, StreakType, XpReward,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Activity Logging
// ============================================================================

/// One logged activity, tagged by `activity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "activity", rename_all = "snake_case")]
pub enum ActivityLog {
    Workout {
        duration_minutes: u32,
        intensity: Intensity,
        workout_type: String,
        /// Falls back to the caller's goal when omitted
        #[serde(default)]
        goal: Option<FitnessGoal>,
    },
    Nutrition {
        #[serde(default)]
        meals_logged: u32,
        #[serde(default)]
        calorie_goal_met: bool,
        #[serde(default)]
        macro_goals_met: bool,
        #[serde(default)]
        healthy_choices: u32,
    },
    Hydration {
        #[serde(default)]
        glasses_logged: u32,
        #[serde(default)]
        daily_goal_met: bool,
        #[serde(default)]
        current_streak: u32,
    },
    Sleep {
        hours: f64,
        quality: u8,
        target_hours: f64,
        #[serde(default)]
        consistent_schedule: bool,
    },
    Streak {
        streak_length: u32,
        streak_type: StreakType,
    },
    Milestone {
        milestone: Milestone,
    },
}

impl ActivityLog {
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            ActivityLog::Workout {
                duration_minutes,
                workout_type,
                ..
            } => {
                validate_duration_minutes(*duration_minutes)?;
                if workout_type.trim().is_empty() {
                    return Err(CalcError::validation("workout_type", "is required"));
                }
                Ok(())
            }
            ActivityLog::Sleep {
                hours,
                quality,
                target_hours,
                ..
            } => {
                validate_sleep_hours("hours", *hours)?;
                validate_sleep_hours("target_hours", *target_hours)?;
                validate_sleep_quality(*quality)
            }
            ActivityLog::Nutrition { .. }
            | ActivityLog::Hydration { .. }
            | ActivityLog::Streak { .. }
            | ActivityLog::Milestone { .. } => Ok(()),
        }
    }

    /// Validate and turn the activity into XP rewards stamped with `at`
    ///
    /// A workout takes its own goal, else `default_goal`; with neither it is
    /// rejected.
    pub fn rewards(
        &self,
        default_goal: Option<FitnessGoal>,
        at: DateTime<Utc>,
    ) -> CalcResult<Vec<XpReward>> {
        self.validate()?;

        let rewards = match self {
            ActivityLog::Workout {
                duration_minutes,
                intensity,
                workout_type,
                goal,
            } => vec![calculate_workout_xp(
                *duration_minutes,
                *intensity,
                workout_type.trim(),
                goal.or(default_goal)
                    .ok_or_else(|| CalcError::validation("goal", "is required for workouts"))?,
                at,
            )],
            ActivityLog::Nutrition {
                meals_logged,
                calorie_goal_met,
                macro_goals_met,
                healthy_choices,
            } => calculate_nutrition_xp(
                *meals_logged,
                *calorie_goal_met,
                *macro_goals_met,
                *healthy_choices,
                at,
            ),
            ActivityLog::Hydration {
                glasses_logged,
                daily_goal_met,
                current_streak,
            } => calculate_hydration_xp(*glasses_logged, *daily_goal_met, *current_streak, at),
            ActivityLog::Sleep {
                hours,
                quality,
                target_hours,
                consistent_schedule,
            } => calculate_sleep_xp(*hours, *quality, *target_hours, *consistent_schedule, at),
            ActivityLog::Streak {
                streak_length,
                streak_type,
            } => calculate_streak_bonus(*streak_length, *streak_type, at)
                .into_iter()
                .collect(),
            ActivityLog::Milestone { milestone } => vec![milestone_reward(*milestone, at)],
        };

        Ok(rewards)
    }
}

/// Rewards computed for an activity, without touching any profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpPreviewResponse {
    pub rewards: Vec<XpReward>,
    pub xp_gained: u64,
}

/// Activities to apply on top of previously earned XP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpAwardRequest {
    #[serde(default)]
    pub total_xp: u64,
    /// Goal used for workouts that do not name one
    #[serde(default)]
    pub goal: Option<FitnessGoal>,
    pub activities: Vec<ActivityLog>,
}

/// Rewards applied to a running XP total
#[derive(Debug, Clone, Serialize)]
pub struct XpAwardResponse {
    pub rewards: Vec<XpReward>,
    pub xp_gained: u64,
    pub levels_gained: u32,
    pub level: LevelProgress,
    /// Unlocks of every level reached, when the award crossed a level boundary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_up: Option<LevelUpRewards>,
}

/// Daily and weekly XP ceilings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct XpPotentialResponse {
    pub daily: u32,
    pub weekly: u32,
}

// ============================================================================
// Levels and Progression
// ============================================================================

/// Level, rank and unlocks for a total XP value
#[derive(Debug, Clone, Serialize)]
pub struct LevelSummary {
    pub progress: LevelProgress,
    pub rank: &'static Rank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_rank: Option<&'static Rank>,
    pub unlocked_features: Vec<&'static str>,
    pub unlocked_customizations: Vec<&'static str>,
}

impl LevelSummary {
    pub fn for_xp(total_xp: u64) -> Self {
        let progress = level_progress(total_xp);
        Self {
            rank: get_current_rank(progress.level),
            next_rank: get_next_rank(progress.level),
            unlocked_features: get_unlocked_features(progress.level),
            unlocked_customizations: get_unlocked_customizations(progress.level),
            progress,
        }
    }
}

/// Everything about one level: threshold, rank and unlocks
#[derive(Debug, Clone, Serialize)]
pub struct LevelDetail {
    pub level: u32,
    /// Total XP at which the level starts
    pub xp_threshold: u64,
    pub rank: &'static Rank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<&'static LevelReward>,
    pub level_up: LevelUpRewards,
}

impl LevelDetail {
    pub fn for_level(level: u32) -> CalcResult<Self> {
        if level == 0 {
            return Err(CalcError::validation("level", "must be at least 1"));
        }
        Ok(Self {
            level,
            xp_threshold: xp_threshold_for_level(level),
            rank: get_current_rank(level),
            reward: get_level_reward(level),
            level_up: calculate_level_up_rewards(level),
        })
    }
}

/// Level progress query
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelProgressQuery {
    #[serde(default)]
    pub total_xp: u64,
}

/// Attribute growth query for a character class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeGrowthRequest {
    pub base_value: u32,
    pub level: u32,
    #[serde(default)]
    pub history: ActivityHistory,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttributeGrowthResponse {
    pub value: u32,
}

/// Achievement catalogue with progress
#[derive(Debug, Clone, Serialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<Achievement>,
    pub summary: AchievementSummary,
}

/// Progress per achievement id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementProgressRequest {
    #[serde(default)]
    pub progress: BTreeMap<String, u32>,
}

// ============================================================================
// Profile and Plans
// ============================================================================

/// Profile input plus the progress stored alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSnapshotRequest {
    pub profile: ProfileInput,
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub streak_days: u32,
    /// Unlocked achievement ids
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSnapshotResponse {
    #[serde(flatten)]
    pub summary: ProfileSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_pace: Option<ProgressPace>,
}

/// Daily plan request; omitted fields take configured defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyPlanRequest {
    pub goal: FitnessGoal,
    #[serde(default)]
    pub fitness_level: Option<FitnessLevel>,
    #[serde(default)]
    pub workout_minutes: Option<u32>,
    #[serde(default)]
    pub target_calories: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).unwrap()
    }

    #[test]
    fn test_workout_uses_fallback_goal_when_missing() {
        let log: ActivityLog = serde_json::from_value(json!({
            "activity": "workout",
            "duration_minutes": 45,
            "intensity": "high",
            "workout_type": "Strength"
        }))
        .unwrap();

        let rewards = log.rewards(Some(FitnessGoal::MuscleGain), at()).unwrap();
        assert_eq!(rewards.len(), 1);
        assert_eq!(rewards[0].amount, 127);
        assert_eq!(rewards[0].reason, "Strength workout completed");
    }

    #[test]
    fn test_workout_without_any_goal_is_rejected() {
        let log = ActivityLog::Workout {
            duration_minutes: 45,
            intensity: Intensity::High,
            workout_type: "Strength".to_string(),
            goal: None,
        };
        assert!(matches!(
            log.rewards(None, at()),
            Err(CalcError::Validation { ref field, .. }) if field == "goal"
        ));

        // the log's own goal wins over the fallback
        let log = ActivityLog::Workout {
            duration_minutes: 45,
            intensity: Intensity::High,
            workout_type: "Strength".to_string(),
            goal: Some(FitnessGoal::MuscleGain),
        };
        let rewards = log.rewards(Some(FitnessGoal::Maintenance), at()).unwrap();
        assert_eq!(rewards[0].amount, 127);
    }

    #[test]
    fn test_non_bonus_streak_yields_nothing() {
        let log = ActivityLog::Streak {
            streak_length: 5,
            streak_type: StreakType::Workout,
        };
        assert!(log.rewards(None, at()).unwrap().is_empty());
    }

    #[test]
    fn test_sleep_log_is_validated() {
        let log = ActivityLog::Sleep {
            hours: 8.0,
            quality: 11,
            target_hours: 8.0,
            consistent_schedule: true,
        };
        assert!(matches!(
            log.rewards(None, at()),
            Err(CalcError::Validation { ref field, .. }) if field == "quality"
        ));
    }

    #[test]
    fn test_blank_workout_type_is_rejected() {
        let log = ActivityLog::Workout {
            duration_minutes: 30,
            intensity: Intensity::Low,
            workout_type: "  ".to_string(),
            goal: None,
        };
        assert!(log.validate().is_err());
    }

    #[test]
    fn test_level_detail() {
        let detail = LevelDetail::for_level(5).unwrap();
        assert_eq!(detail.xp_threshold, 1_600);
        assert_eq!(detail.rank.id, "novice");
        assert_eq!(detail.level_up.xp_bonus, 50);
        assert!(detail.reward.is_some());

        assert!(LevelDetail::for_level(4).unwrap().reward.is_none());
        assert!(LevelDetail::for_level(0).is_err());
    }

    #[test]
    fn test_award_request_defaults() {
        let req: XpAwardRequest = serde_json::from_value(json!({
            "activities": [{"activity": "milestone", "milestone": "first_workout"}]
        }))
        .unwrap();
        assert_eq!(req.total_xp, 0);
        assert_eq!(req.goal, None);
        assert_eq!(req.activities.len(), 1);
    }

    #[test]
    fn test_level_summary_for_xp() {
        let summary = LevelSummary::for_xp(2_500);
        assert_eq!(summary.progress.level, 6);
        assert_eq!(summary.rank.id, "apprentice");
        assert_eq!(summary.next_rank.map(|r| r.id), Some("warrior"));
        assert!(summary.unlocked_features.contains(&"Goal setting"));
    }
}
