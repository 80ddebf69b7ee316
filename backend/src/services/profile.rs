//! Profile service - derives a profile summary from submitted input

use crate::error::ApiResult;
use fitness_rpg_shared::profile::UserProfile;
use fitness_rpg_shared::types::{ProfileSnapshotRequest, ProfileSnapshotResponse};
use tracing::debug;

/// Profile service for profile derivation
pub struct ProfileService;

impl ProfileService {
    /// Validate the input, restore stored progress and summarize
    pub fn snapshot(req: ProfileSnapshotRequest) -> ApiResult<ProfileSnapshotResponse> {
        let mut profile = UserProfile::new(req.profile)?;
        profile.set_total_xp(req.total_xp);
        profile.set_streak(req.streak_days);
        for id in &req.achievements {
            profile.unlock_achievement(id)?;
        }

        let target_pace = profile.target_pace().transpose()?;
        debug!(
            level = profile.level(),
            daily_calories = profile.metrics().daily_calories,
            "Derived profile"
        );

        Ok(ProfileSnapshotResponse {
            summary: profile.summary(),
            target_pace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use fitness_rpg_shared::errors::CalcError;
    use fitness_rpg_shared::health_metrics::{ActivityLevel, BiologicalSex, FitnessGoal};
    use fitness_rpg_shared::profile::ProfileInput;

    fn request() -> ProfileSnapshotRequest {
        ProfileSnapshotRequest {
            profile: ProfileInput {
                age: 30,
                weight_kg: 80.0,
                height_cm: 180.0,
                sex: BiologicalSex::Female,
                activity_level: ActivityLevel::LightlyActive,
                goal: FitnessGoal::WeightLoss,
                target_weight_kg: Some(70.0),
                weekly_change_kg: Some(0.5),
            },
            total_xp: 2_500,
            streak_days: 3,
            achievements: vec!["first_workout".to_string(), "week_streak".to_string()],
        }
    }

    #[test]
    fn test_snapshot_restores_progress() {
        let response = ProfileService::snapshot(request()).unwrap();

        assert_eq!(response.summary.level.level, 6);
        assert_eq!(response.summary.rank, "Apprentice");
        assert_eq!(response.summary.achievement_summary.unlocked, 2);
        assert_eq!(response.summary.achievement_summary.xp_earned, 150);

        // 10 kg at 0.5 kg/week -> 20 weeks
        let pace = response.target_pace.unwrap();
        assert_eq!(pace.weekly_change_kg, -0.5);
    }

    #[test]
    fn test_unknown_achievement_is_rejected() {
        let mut req = request();
        req.achievements.push("dragon_slayer".to_string());

        let err = ProfileService::snapshot(req).unwrap_err();
        assert!(matches!(err, ApiError::Calc(CalcError::UnrecognizedCategory { .. })));
    }
}
