//! Level curve
//!
//! Level `n` begins at `(n - 1)^2 * 100` total XP, so each level costs
//! `(2n - 1) * 100` XP more than the one before.

use serde::{Deserialize, Serialize};

/// XP scale of the level curve
pub const XP_PER_LEVEL_UNIT: u64 = 100;

/// Exact integer square root (floor)
fn isqrt(n: u64) -> u64 {
    let n = n as u128;
    let mut root = (n as f64).sqrt() as u128;
    // The float estimate can be off by one in either direction for large n
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root as u64
}

/// Calculate level from total XP
///
/// `floor(sqrt(total_xp / 100)) + 1`
pub fn calculate_level(total_xp: u64) -> u32 {
    let root = isqrt(total_xp / XP_PER_LEVEL_UNIT);
    u32::try_from(root).map_or(u32::MAX, |r| r.saturating_add(1))
}

/// Total XP at which `level` begins
pub fn xp_threshold_for_level(level: u32) -> u64 {
    let n = u64::from(level.saturating_sub(1));
    n.saturating_mul(n).saturating_mul(XP_PER_LEVEL_UNIT)
}

/// Total XP at which the level after `level` begins
pub fn xp_threshold_for_next_level(level: u32) -> u64 {
    let n = u64::from(level);
    n.saturating_mul(n).saturating_mul(XP_PER_LEVEL_UNIT)
}

/// Decomposition of a total XP value into level and in-level progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub total_xp: u64,
    /// XP earned since the current level began
    pub current_xp_in_level: u64,
    /// XP span of the current level
    pub xp_needed_for_level: u64,
    /// XP still missing to reach the next level
    pub xp_to_next_level: u64,
    /// Progress through the current level, within [0, 100]
    pub percentage: f64,
}

/// Calculate level and progress within that level
pub fn level_progress(total_xp: u64) -> LevelProgress {
    let level = calculate_level(total_xp);
    let floor = xp_threshold_for_level(level);
    let ceiling = xp_threshold_for_next_level(level);

    let current_xp_in_level = total_xp.saturating_sub(floor);
    let xp_needed_for_level = ceiling.saturating_sub(floor);

    let percentage = if xp_needed_for_level == 0 {
        100.0
    } else {
        (current_xp_in_level as f64 / xp_needed_for_level as f64 * 100.0).clamp(0.0, 100.0)
    };

    LevelProgress {
        level,
        total_xp,
        current_xp_in_level,
        xp_needed_for_level,
        xp_to_next_level: ceiling.saturating_sub(total_xp),
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(99, 1)]
    #[case(100, 2)]
    #[case(399, 2)]
    #[case(400, 3)]
    #[case(2_500, 6)]
    #[case(1_000_000, 101)]
    fn test_level_calculation(#[case] total_xp: u64, #[case] expected: u32) {
        assert_eq!(calculate_level(total_xp), expected);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(xp_threshold_for_level(1), 0);
        assert_eq!(xp_threshold_for_level(2), 100);
        assert_eq!(xp_threshold_for_level(5), 1_600);
        assert_eq!(xp_threshold_for_next_level(1), 100);
        assert_eq!(xp_threshold_for_next_level(5), 2_500);
    }

    #[test]
    fn test_isqrt_near_perfect_squares() {
        for root in [1u64, 10, 4_294_967_295] {
            assert_eq!(isqrt(root * root), root);
            assert_eq!(isqrt(root * root - 1), root - 1);
        }
        assert_eq!(isqrt(u64::MAX), 4_294_967_295);
    }

    #[test]
    fn test_level_progress_midway() {
        let progress = level_progress(250);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_xp_in_level, 150);
        assert_eq!(progress.xp_needed_for_level, 300);
        assert_eq!(progress.xp_to_next_level, 150);
        assert_eq!(progress.percentage, 50.0);
    }

    #[test]
    fn test_level_progress_percentage_is_clamped_at_extremes() {
        // Regression: the percentage must stay inside [0, 100] even at the
        // top of the representable range
        let progress = level_progress(u64::MAX);
        assert!((0.0..=100.0).contains(&progress.percentage));

        let progress = level_progress(0);
        assert_eq!(progress.percentage, 0.0);
    }

    #[test]
    fn test_thresholds_strictly_increase() {
        for level in 1..200 {
            assert!(xp_threshold_for_level(level) < xp_threshold_for_level(level + 1));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: total XP lies inside the bracket of its level
        #[test]
        fn prop_level_brackets_total(total_xp in 0u64..10_000_000_000) {
            let level = calculate_level(total_xp);
            prop_assert!(xp_threshold_for_level(level) <= total_xp);
            prop_assert!(total_xp < xp_threshold_for_next_level(level));
        }

        /// Property: progress decomposes total XP exactly
        #[test]
        fn prop_progress_round_trip(total_xp in 0u64..10_000_000_000) {
            let progress = level_progress(total_xp);
            prop_assert_eq!(
                progress.current_xp_in_level + xp_threshold_for_level(progress.level),
                total_xp
            );
            prop_assert!(progress.percentage >= 0.0 && progress.percentage < 100.0);
        }

        /// Property: level never decreases as XP grows
        #[test]
        fn prop_level_monotonic(a in 0u64..1_000_000_000, delta in 0u64..1_000_000) {
            prop_assert!(calculate_level(a) <= calculate_level(a + delta));
        }
    }
}
