//! Character classes, ranks and level rewards
//!
//! Static reference tables keyed by class id or level. Tables are immutable
//! slices; lookups return borrowed `'static` entries.

use serde::{Deserialize, Serialize};

// ============================================================================
// Types
// ============================================================================

/// Attribute a character class specialises in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Endurance,
    Agility,
    Discipline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterClass {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub primary_attribute: Attribute,
    pub xp_multiplier: f64,
    pub special_abilities: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rank {
    pub id: &'static str,
    pub name: &'static str,
    pub min_level: u32,
    pub max_level: u32,
    pub icon: &'static str,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
}

impl Rank {
    pub fn contains(&self, level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

/// Unlocks granted on reaching a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelReward {
    pub level: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub badges: &'static [&'static str],
    pub features: &'static [&'static str],
    pub customizations: &'static [&'static str],
    pub bonuses: &'static [&'static str],
    pub xp_required: u64,
}

// ============================================================================
// Tables
// ============================================================================

pub static CHARACTER_CLASSES: &[CharacterClass] = &[
    CharacterClass {
        id: "fitness_paladin",
        name: "Fitness Paladin",
        description: "Balanced warrior focused on overall health and consistency",
        icon: "🛡️",
        primary_attribute: Attribute::Discipline,
        xp_multiplier: 1.1,
        special_abilities: &[
            "Consistency Bonus: +20% XP for 7+ day streaks",
            "Recovery Boost: Faster rest timer regeneration",
            "Motivation Aura: Bonus XP for completing all daily goals",
        ],
    },
    CharacterClass {
        id: "strength_warrior",
        name: "Strength Warrior",
        description: "Mighty fighter specializing in power and muscle building",
        icon: "⚔️",
        primary_attribute: Attribute::Strength,
        xp_multiplier: 1.2,
        special_abilities: &[
            "Power Surge: +30% XP for strength training workouts",
            "Iron Will: Bonus XP for lifting heavier weights",
            "Muscle Memory: Reduced XP penalty for missed workouts",
        ],
    },
    CharacterClass {
        id: "endurance_runner",
        name: "Endurance Runner",
        description: "Swift athlete mastering cardio and stamina",
        icon: "🏃",
        primary_attribute: Attribute::Endurance,
        xp_multiplier: 1.15,
        special_abilities: &[
            "Cardio Master: +25% XP for cardio workouts",
            "Stamina Boost: Extended workout duration bonuses",
            "Runner's High: Bonus XP for outdoor activities",
        ],
    },
    CharacterClass {
        id: "agility_ninja",
        name: "Agility Ninja",
        description: "Flexible warrior focusing on mobility and coordination",
        icon: "🥷",
        primary_attribute: Attribute::Agility,
        xp_multiplier: 1.1,
        special_abilities: &[
            "Flexibility Focus: +25% XP for yoga and stretching",
            "Quick Recovery: Faster rest between exercises",
            "Balance Master: Bonus XP for balance and coordination exercises",
        ],
    },
];

/// Contiguous rank bands covering levels 1-100
pub static RANKS: &[Rank] = &[
    Rank {
        id: "novice",
        name: "Novice",
        min_level: 1,
        max_level: 5,
        icon: "🌱",
        description: "Just starting your fitness journey",
        benefits: &[
            "Basic workout tracking",
            "Simple meal logging",
            "Beginner achievement badges",
        ],
    },
    Rank {
        id: "apprentice",
        name: "Apprentice",
        min_level: 6,
        max_level: 10,
        icon: "⭐",
        description: "Building healthy habits and consistency",
        benefits: &[
            "Advanced workout metrics",
            "Nutrition goal tracking",
            "Weekly progress reports",
            "Custom workout plans",
        ],
    },
    Rank {
        id: "warrior",
        name: "Warrior",
        min_level: 11,
        max_level: 20,
        icon: "⚔️",
        description: "Dedicated fitness enthusiast with proven commitment",
        benefits: &[
            "Advanced analytics dashboard",
            "Social features and challenges",
            "Premium workout library",
            "Nutrition coaching tips",
        ],
    },
    Rank {
        id: "champion",
        name: "Champion",
        min_level: 21,
        max_level: 35,
        icon: "🏆",
        description: "Elite athlete with exceptional dedication",
        benefits: &[
            "AI-powered workout recommendations",
            "Advanced meal planning",
            "Priority customer support",
            "Exclusive champion badges",
        ],
    },
    Rank {
        id: "legend",
        name: "Legend",
        min_level: 36,
        max_level: 50,
        icon: "👑",
        description: "Legendary fitness master inspiring others",
        benefits: &[
            "Mentor status and coaching tools",
            "Exclusive legendary content",
            "Beta access to new features",
            "Hall of Fame recognition",
        ],
    },
    Rank {
        id: "mythic",
        name: "Mythic",
        min_level: 51,
        max_level: 100,
        icon: "🌟",
        description: "Transcendent being of ultimate fitness mastery",
        benefits: &[
            "Mythic avatar customizations",
            "Unlimited premium features",
            "Direct developer feedback channel",
            "Immortal hall of legends",
        ],
    },
];

/// Level rewards, sorted by level
pub static LEVEL_REWARDS: &[LevelReward] = &[
    LevelReward {
        level: 1,
        title: "Welcome, Warrior!",
        description: "Begin your epic fitness journey",
        badges: &["First Steps"],
        features: &["Basic workout tracking", "Meal logging"],
        customizations: &["Default avatar"],
        bonuses: &[],
        xp_required: 0,
    },
    LevelReward {
        level: 2,
        title: "Gaining Momentum",
        description: "Your dedication is showing",
        badges: &["Consistency Seeker"],
        features: &["Water tracking"],
        customizations: &["Avatar color variants"],
        bonuses: &[],
        xp_required: 100,
    },
    LevelReward {
        level: 3,
        title: "Building Habits",
        description: "Healthy routines are forming",
        badges: &["Habit Builder"],
        features: &["Sleep tracking"],
        customizations: &["Basic equipment accessories"],
        bonuses: &[],
        xp_required: 400,
    },
    LevelReward {
        level: 5,
        title: "Novice Graduate",
        description: "Ready for bigger challenges",
        badges: &["Novice Master"],
        features: &["Weekly progress reports", "Goal setting"],
        customizations: &["Class selection unlock"],
        bonuses: &["10% XP bonus for next level"],
        xp_required: 1_600,
    },
    LevelReward {
        level: 10,
        title: "Apprentice Warrior",
        description: "Proven dedication and growth",
        badges: &["Apprentice Champion", "Dedication Medal"],
        features: &["Advanced analytics", "Custom workouts"],
        customizations: &["Weapon accessories", "Armor variants"],
        bonuses: &["Streak protection (1 day forgiveness)"],
        xp_required: 8_100,
    },
    LevelReward {
        level: 15,
        title: "Rising Champion",
        description: "Your strength inspires others",
        badges: &["Rising Star", "Inspiration Badge"],
        features: &["Social challenges", "Friend system"],
        customizations: &["Elite armor sets", "Glowing effects"],
        bonuses: &["15% XP bonus", "Double streak rewards"],
        xp_required: 19_600,
    },
    LevelReward {
        level: 20,
        title: "True Warrior",
        description: "Battle-tested and victorious",
        badges: &["Warrior Elite", "Battle Veteran"],
        features: &["AI coaching", "Premium content"],
        customizations: &["Legendary weapons", "Aura effects"],
        bonuses: &["Weekly bonus XP events"],
        xp_required: 36_100,
    },
    LevelReward {
        level: 25,
        title: "Champion Rising",
        description: "Excellence in every endeavor",
        badges: &["Champion Candidate", "Excellence Medal"],
        features: &["Advanced meal planning", "Biometric integration"],
        customizations: &["Champion armor", "Victory animations"],
        bonuses: &["20% XP bonus", "Milestone celebrations"],
        xp_required: 57_600,
    },
    LevelReward {
        level: 30,
        title: "Elite Champion",
        description: "Among the fitness elite",
        badges: &["Elite Status", "Mastery Crown"],
        features: &["Personal coaching", "Exclusive content"],
        customizations: &["Elite champion gear", "Prestige effects"],
        bonuses: &["Monthly XP bonuses", "Priority support"],
        xp_required: 84_100,
    },
    LevelReward {
        level: 40,
        title: "Legendary Hero",
        description: "Your legend grows with each victory",
        badges: &["Legendary Status", "Hero Medal"],
        features: &["Mentor tools", "Beta features"],
        customizations: &["Legendary artifacts", "Divine auras"],
        bonuses: &["25% XP bonus", "Legendary events access"],
        xp_required: 152_100,
    },
    LevelReward {
        level: 50,
        title: "Fitness Legend",
        description: "A true master of the fitness realm",
        badges: &["Fitness Legend", "Master of All"],
        features: &["All premium features", "Developer access"],
        customizations: &["Mythic transformations", "Cosmic effects"],
        bonuses: &["30% XP bonus", "Immortal recognition"],
        xp_required: 240_100,
    },
];

/// Ceiling for any grown attribute score
pub const MAX_ATTRIBUTE: u32 = 100;

// ============================================================================
// Lookups
// ============================================================================

/// Rank containing `level`, or the first rank if none does
pub fn get_current_rank(level: u32) -> &'static Rank {
    RANKS
        .iter()
        .find(|rank| rank.contains(level))
        .unwrap_or(&RANKS[0])
}

/// Rank after the one containing `level`; `None` at the top
pub fn get_next_rank(level: u32) -> Option<&'static Rank> {
    let current = get_current_rank(level);
    RANKS
        .iter()
        .position(|rank| rank.id == current.id)
        .and_then(|idx| RANKS.get(idx + 1))
}

/// Reward entry for exactly `level`
pub fn get_level_reward(level: u32) -> Option<&'static LevelReward> {
    LEVEL_REWARDS.iter().find(|reward| reward.level == level)
}

pub fn get_character_class(id: &str) -> Option<&'static CharacterClass> {
    CHARACTER_CLASSES.iter().find(|class| class.id == id)
}

fn collect_unlocked<F>(level: u32, pick: F) -> Vec<&'static str>
where
    F: Fn(&'static LevelReward) -> &'static [&'static str],
{
    let mut unlocked: Vec<&'static str> = Vec::new();
    for reward in LEVEL_REWARDS.iter().filter(|r| r.level <= level) {
        for item in pick(reward) {
            if !unlocked.contains(item) {
                unlocked.push(*item);
            }
        }
    }
    unlocked
}

/// Every feature unlocked at or below `level`, first-seen order
pub fn get_unlocked_features(level: u32) -> Vec<&'static str> {
    collect_unlocked(level, |r| r.features)
}

/// Every customization unlocked at or below `level`, first-seen order
pub fn get_unlocked_customizations(level: u32) -> Vec<&'static str> {
    collect_unlocked(level, |r| r.customizations)
}

// ============================================================================
// Growth and Level-Up
// ============================================================================

/// Activity counts per attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHistory {
    #[serde(default)]
    pub strength: u32,
    #[serde(default)]
    pub endurance: u32,
    #[serde(default)]
    pub agility: u32,
    #[serde(default)]
    pub discipline: u32,
}

impl ActivityHistory {
    pub fn for_attribute(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Endurance => self.endurance,
            Attribute::Agility => self.agility,
            Attribute::Discipline => self.discipline,
        }
    }
}

/// Grow a class's primary attribute
///
/// base + level/2 + level/3 + activity/10 (integer division), capped at 100
pub fn calculate_attribute_growth(
    base: u32,
    level: u32,
    class: &CharacterClass,
    history: &ActivityHistory,
) -> u32 {
    let activity = history.for_attribute(class.primary_attribute);
    base.saturating_add(level / 2)
        .saturating_add(level / 3)
        .saturating_add(activity / 10)
        .min(MAX_ATTRIBUTE)
}

/// Rewards handed out when reaching a level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelUpRewards {
    pub xp_bonus: u32,
    pub new_features: Vec<&'static str>,
    pub new_customizations: Vec<&'static str>,
    pub badges: Vec<&'static str>,
}

/// Collect the rewards of a newly reached level
///
/// Levels with a bonus entry mentioning "XP bonus" (substring, any case) grant
/// `level * 10` bonus XP; an exact entry match would never fire against entries
/// like "15% XP bonus". Levels without a reward entry grant nothing.
pub fn calculate_level_up_rewards(level: u32) -> LevelUpRewards {
    let Some(reward) = get_level_reward(level) else {
        return LevelUpRewards::default();
    };

    let has_xp_bonus = reward
        .bonuses
        .iter()
        .any(|bonus| bonus.to_lowercase().contains("xp bonus"));

    LevelUpRewards {
        xp_bonus: if has_xp_bonus { level.saturating_mul(10) } else { 0 },
        new_features: reward.features.to_vec(),
        new_customizations: reward.customizations.to_vec(),
        badges: reward.badges.to_vec(),
    }
}

/// Merge the rewards of every level in `(from_level, to_level]`
///
/// XP bonuses add up; unlock lists keep table order without duplicates.
pub fn collect_level_up_rewards(from_level: u32, to_level: u32) -> LevelUpRewards {
    let mut merged = LevelUpRewards::default();

    for reward in LEVEL_REWARDS
        .iter()
        .filter(|r| r.level > from_level && r.level <= to_level)
    {
        let rewards = calculate_level_up_rewards(reward.level);
        merged.xp_bonus = merged.xp_bonus.saturating_add(rewards.xp_bonus);
        merge_unique(&mut merged.new_features, rewards.new_features);
        merge_unique(&mut merged.new_customizations, rewards.new_customizations);
        merge_unique(&mut merged.badges, rewards.badges);
    }

    merged
}

fn merge_unique(into: &mut Vec<&'static str>, items: Vec<&'static str>) {
    for item in items {
        if !into.contains(&item) {
            into.push(item);
        }
    }
}
