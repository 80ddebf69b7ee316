//! Daily plan service
//!
//! Fills omitted plan preferences from the `plans` config section before
//! generating the plan.

use crate::config::PlansConfig;
use crate::error::ApiResult;
use fitness_rpg_shared::errors::CalcError;
use fitness_rpg_shared::plans::{generate_daily_plan, DailyPlan, PlanPreferences};
use fitness_rpg_shared::types::DailyPlanRequest;
use fitness_rpg_shared::validation::{validate_calories, validate_duration_minutes};
use tracing::debug;

pub struct PlanService;

impl PlanService {
    /// Merge the request with configured defaults
    pub fn preferences(defaults: &PlansConfig, req: &DailyPlanRequest) -> ApiResult<PlanPreferences> {
        let workout_minutes = req.workout_minutes.unwrap_or(defaults.default_workout_minutes);
        validate_duration_minutes(workout_minutes)?;
        if workout_minutes == 0 {
            return Err(CalcError::validation("duration_minutes", "must be at least 1 minute").into());
        }

        let target_calories = req.target_calories.unwrap_or(defaults.default_target_calories);
        validate_calories(i32::try_from(target_calories).unwrap_or(i32::MAX))?;

        Ok(PlanPreferences {
            goal: req.goal,
            fitness_level: req.fitness_level.unwrap_or(defaults.default_fitness_level),
            workout_minutes,
            target_calories: Some(target_calories),
        })
    }

    pub fn daily_plan(defaults: &PlansConfig, req: &DailyPlanRequest) -> ApiResult<DailyPlan> {
        let prefs = Self::preferences(defaults, req)?;
        let plan = generate_daily_plan(&prefs);
        debug!(
            goal = prefs.goal.as_str(),
            total_calories = plan.total_calories,
            "Generated daily plan"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_rpg_shared::health_metrics::FitnessGoal;
    use fitness_rpg_shared::plans::FitnessLevel;

    fn bare_request(goal: FitnessGoal) -> DailyPlanRequest {
        DailyPlanRequest {
            goal,
            fitness_level: None,
            workout_minutes: None,
            target_calories: None,
        }
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let prefs = PlanService::preferences(&PlansConfig::default(), &bare_request(FitnessGoal::WeightLoss))
            .unwrap();
        assert_eq!(prefs.workout_minutes, 45);
        assert_eq!(prefs.target_calories, Some(2_000));
        assert_eq!(prefs.fitness_level, FitnessLevel::Intermediate);
    }

    #[test]
    fn test_request_overrides_defaults() {
        let mut req = bare_request(FitnessGoal::MuscleGain);
        req.fitness_level = Some(FitnessLevel::Advanced);
        req.workout_minutes = Some(20);

        let prefs = PlanService::preferences(&PlansConfig::default(), &req).unwrap();
        assert_eq!(prefs.fitness_level, FitnessLevel::Advanced);
        assert_eq!(prefs.workout_minutes, 20);
    }

    #[test]
    fn test_zero_minutes_rejected() {
        let mut req = bare_request(FitnessGoal::Maintenance);
        req.workout_minutes = Some(0);
        assert!(PlanService::daily_plan(&PlansConfig::default(), &req).is_err());
    }

    #[test]
    fn test_daily_plan_uses_goal_adjusted_calories() {
        let plan = PlanService::daily_plan(&PlansConfig::default(), &bare_request(FitnessGoal::MuscleGain))
            .unwrap();
        assert_eq!(plan.meals.target_calories, 2_300);
        assert_eq!(plan.timeline.len(), 12);
    }
}
