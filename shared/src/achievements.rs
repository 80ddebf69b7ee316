//! Achievement catalogue
//!
//! Progress is supplied by the caller; an achievement is unlocked exactly when
//! its progress reaches `max_progress`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Milestone,
    Streak,
    Habit,
    Strength,
    Cardio,
    Legendary,
}

/// Static catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub max_progress: u32,
    pub reward_xp: u32,
}

pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_workout",
        title: "First Steps",
        description: "Complete your first workout",
        category: AchievementCategory::Milestone,
        max_progress: 1,
        reward_xp: 50,
    },
    AchievementDef {
        id: "week_streak",
        title: "Week Warrior",
        description: "Maintain a 7-day workout streak",
        category: AchievementCategory::Streak,
        max_progress: 7,
        reward_xp: 100,
    },
    AchievementDef {
        id: "water_master",
        title: "Hydration Hero",
        description: "Drink your daily water goal for 30 days",
        category: AchievementCategory::Habit,
        max_progress: 30,
        reward_xp: 200,
    },
    AchievementDef {
        id: "strength_beast",
        title: "Strength Beast",
        description: "Increase your max lift by 50kg",
        category: AchievementCategory::Strength,
        max_progress: 50,
        reward_xp: 300,
    },
    AchievementDef {
        id: "marathon_runner",
        title: "Marathon Master",
        description: "Run a total of 100km",
        category: AchievementCategory::Cardio,
        max_progress: 100,
        reward_xp: 500,
    },
    AchievementDef {
        id: "perfect_month",
        title: "Perfect Month",
        description: "Complete all daily goals for 30 days",
        category: AchievementCategory::Legendary,
        max_progress: 30,
        reward_xp: 1_000,
    },
];

pub fn get_achievement(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Catalogue entry paired with the user's progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    #[serde(flatten)]
    pub def: &'static AchievementDef,
    pub progress: u32,
    pub unlocked: bool,
    pub progress_percentage: f64,
}

impl Achievement {
    pub fn with_progress(def: &'static AchievementDef, progress: u32) -> Self {
        Self {
            def,
            progress,
            unlocked: is_unlocked(def, progress),
            progress_percentage: progress_percentage(def, progress),
        }
    }
}

pub fn is_unlocked(def: &AchievementDef, progress: u32) -> bool {
    progress >= def.max_progress
}

/// Share of the way to unlocking, within [0, 100]
pub fn progress_percentage(def: &AchievementDef, progress: u32) -> f64 {
    if def.max_progress == 0 {
        return 100.0;
    }
    (progress as f64 / def.max_progress as f64 * 100.0).clamp(0.0, 100.0)
}

/// Unlock totals across the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementSummary {
    pub unlocked: usize,
    pub total: usize,
    pub xp_earned: u64,
}

/// Pair every catalogue entry with its progress
///
/// `progress_of` returns the progress for an achievement id; ids it does not
/// know count as zero.
pub fn evaluate<F>(progress_of: F) -> (Vec<Achievement>, AchievementSummary)
where
    F: Fn(&str) -> Option<u32>,
{
    let achievements: Vec<Achievement> = ACHIEVEMENTS
        .iter()
        .map(|def| Achievement::with_progress(def, progress_of(def.id).unwrap_or(0)))
        .collect();

    let summary = AchievementSummary {
        unlocked: achievements.iter().filter(|a| a.unlocked).count(),
        total: achievements.len(),
        xp_earned: achievements
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| u64::from(a.def.reward_xp))
            .sum(),
    };

    (achievements, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_unlock_boundary() {
        let week = get_achievement("week_streak").unwrap();
        assert!(!is_unlocked(week, 6));
        assert!(is_unlocked(week, 7));
        assert!(is_unlocked(week, 12));
    }

    #[test]
    fn test_progress_percentage_is_clamped() {
        let marathon = get_achievement("marathon_runner").unwrap();
        assert_eq!(progress_percentage(marathon, 25), 25.0);
        assert_eq!(progress_percentage(marathon, 250), 100.0);
        assert_eq!(progress_percentage(marathon, 0), 0.0);
    }

    #[test]
    fn test_evaluate_summary() {
        let progress: HashMap<&str, u32> =
            [("first_workout", 1), ("week_streak", 3), ("water_master", 30)].into_iter().collect();

        let (achievements, summary) = evaluate(|id| progress.get(id).copied());

        assert_eq!(achievements.len(), ACHIEVEMENTS.len());
        assert_eq!(summary.unlocked, 2);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.xp_earned, 250);
        assert_eq!(achievements[1].progress, 3);
        assert!(!achievements[1].unlocked);
    }

    #[test]
    fn test_catalogue_ids_are_unique() {
        for (i, a) in ACHIEVEMENTS.iter().enumerate() {
            assert!(ACHIEVEMENTS[i + 1..].iter().all(|b| b.id != a.id));
            assert!(a.max_progress > 0);
        }
    }
}
