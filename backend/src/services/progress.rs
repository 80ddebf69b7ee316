//! XP and level progression service
//!
//! Turns activity logs into rewards and applies them to a running XP total.
//! Callers own the total; nothing is stored between requests.

use crate::error::ApiResult;
use chrono::{DateTime, Utc};
use fitness_rpg_shared::health_metrics::FitnessGoal;
use fitness_rpg_shared::levels::{calculate_level, level_progress};
use fitness_rpg_shared::progression::collect_level_up_rewards;
use fitness_rpg_shared::types::{
    ActivityLog, XpAwardRequest, XpAwardResponse, XpPreviewResponse,
};
use fitness_rpg_shared::xp::{total_xp, XpReward};
use tracing::{debug, info};

/// Progress service for XP awards
pub struct ProgressService;

impl ProgressService {
    /// Rewards for a single activity
    pub fn preview(
        log: &ActivityLog,
        goal: Option<FitnessGoal>,
        at: DateTime<Utc>,
    ) -> ApiResult<XpPreviewResponse> {
        let rewards = log.rewards(goal, at)?;
        let xp_gained = total_xp(&rewards);
        debug!(xp_gained, rewards = rewards.len(), "Computed activity rewards");

        Ok(XpPreviewResponse { rewards, xp_gained })
    }

    /// Apply every activity to `req.total_xp`
    ///
    /// All activities are validated before any reward is counted, so one bad
    /// entry rejects the whole batch.
    pub fn award(req: &XpAwardRequest, at: DateTime<Utc>) -> ApiResult<XpAwardResponse> {
        let mut rewards: Vec<XpReward> = Vec::new();
        for log in &req.activities {
            rewards.extend(log.rewards(req.goal, at)?);
        }

        let xp_gained = total_xp(&rewards);
        let before = calculate_level(req.total_xp);
        let progress = level_progress(req.total_xp.saturating_add(xp_gained));
        let levels_gained = progress.level - before;

        let level_up =
            (levels_gained > 0).then(|| collect_level_up_rewards(before, progress.level));
        if levels_gained > 0 {
            info!(from = before, to = progress.level, "Level up");
        }

        Ok(XpAwardResponse {
            rewards,
            xp_gained,
            levels_gained,
            level: progress,
            level_up,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fitness_rpg_shared::errors::CalcError;
    use fitness_rpg_shared::xp::{Intensity, Milestone, StreakType};
    use crate::error::ApiError;
    use proptest::prelude::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).unwrap()
    }

    fn request(total_xp: u64, activities: Vec<ActivityLog>) -> XpAwardRequest {
        XpAwardRequest {
            total_xp,
            goal: None,
            activities,
        }
    }

    #[test]
    fn test_award_crosses_level_boundary() {
        // 350 + 100 (first workout) = 450 -> level 3
        let req = request(
            350,
            vec![ActivityLog::Milestone {
                milestone: Milestone::FirstWorkout,
            }],
        );

        let response = ProgressService::award(&req, at()).unwrap();
        assert_eq!(response.xp_gained, 100);
        assert_eq!(response.level.level, 3);
        assert_eq!(response.levels_gained, 1);
        assert!(response.level_up.is_some());
    }

    #[test]
    fn test_award_across_several_levels_reports_skipped_unlocks() {
        // 1000 + 1800 = 2800: level 4 -> 6, passing level 5
        let req = request(
            1_000,
            vec![
                ActivityLog::Milestone {
                    milestone: Milestone::GoalAchieved,
                },
                ActivityLog::Milestone {
                    milestone: Milestone::MonthComplete,
                },
                ActivityLog::Milestone {
                    milestone: Milestone::WeekComplete,
                },
                ActivityLog::Milestone {
                    milestone: Milestone::FirstWorkout,
                },
            ],
        );

        let response = ProgressService::award(&req, at()).unwrap();
        assert_eq!(response.level.level, 6);
        assert_eq!(response.levels_gained, 2);

        let level_up = response.level_up.unwrap();
        assert_eq!(level_up.xp_bonus, 50);
        assert!(level_up.new_features.contains(&"Goal setting"));
    }

    #[test]
    fn test_workout_needs_a_goal() {
        let workout = ActivityLog::Workout {
            duration_minutes: 45,
            intensity: Intensity::High,
            workout_type: "Strength".to_string(),
            goal: None,
        };

        let err = ProgressService::award(&request(0, vec![workout.clone()]), at()).unwrap_err();
        assert!(matches!(err, ApiError::Calc(CalcError::Validation { ref field, .. }) if field == "goal"));

        let req = XpAwardRequest {
            total_xp: 0,
            goal: Some(FitnessGoal::MuscleGain),
            activities: vec![workout],
        };
        assert_eq!(ProgressService::award(&req, at()).unwrap().xp_gained, 127);
    }

    #[test]
    fn test_award_without_level_up() {
        let req = request(
            0,
            vec![ActivityLog::Hydration {
                glasses_logged: 4,
                daily_goal_met: false,
                current_streak: 0,
            }],
        );

        let response = ProgressService::award(&req, at()).unwrap();
        assert_eq!(response.xp_gained, 20);
        assert_eq!(response.levels_gained, 0);
        assert!(response.level_up.is_none());
    }

    #[test]
    fn test_one_invalid_activity_rejects_batch() {
        let req = request(
            0,
            vec![
                ActivityLog::Streak {
                    streak_length: 7,
                    streak_type: StreakType::Overall,
                },
                ActivityLog::Workout {
                    duration_minutes: 2_000,
                    intensity: Intensity::High,
                    workout_type: "Run".to_string(),
                    goal: None,
                },
            ],
        );

        let err = ProgressService::award(&req, at()).unwrap_err();
        assert!(matches!(err, ApiError::Calc(CalcError::Validation { .. })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: awarding never lowers the level and the gain matches the rewards
        #[test]
        fn prop_award_is_monotonic(total in 0u64..10_000_000, glasses in 0u32..40, streak in 0u32..400) {
            let req = request(total, vec![ActivityLog::Hydration {
                glasses_logged: glasses,
                daily_goal_met: true,
                current_streak: streak,
            }]);
            let response = ProgressService::award(&req, at()).unwrap();

            prop_assert!(response.level.level >= calculate_level(total));
            prop_assert_eq!(response.level.total_xp, total + response.xp_gained);
            prop_assert_eq!(response.xp_gained, total_xp(&response.rewards));
        }
    }
}
