//! Scoring module - multiplier curve, level thresholds and gravity speed
//!
//! The level multiplier grows as `1.0 + 0.1 + 0.2 + ... + 0.1 * level`. It is
//! kept internally as an integer number of hundredths so that every derived
//! value (earned points, level thresholds) is computed exactly.

use crate::types::{
    BASE_POINTS_TO_LEVEL_UP, DROP_INTERVAL_REDUCTION_PER_LEVEL_MS, LINE_CLEAR_POINTS, MAX_LEVEL,
    MIN_DROP_INTERVAL_MS, ORIGINAL_DROP_INTERVAL_MS,
};

/// Result of a level-up check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    /// Total score needed to reach the level after `level`
    pub next_level_score: u32,
    pub changed: bool,
}

fn clamp_level(level: i32) -> u32 {
    level.clamp(0, MAX_LEVEL as i32) as u32
}

/// Multiplier for `level` in hundredths: `100 + 5 * n * (n + 1)`
pub fn multiplier_hundredths(level: i32) -> u32 {
    let n = clamp_level(level);
    100 + 5 * n * (n + 1)
}

/// Score multiplier for `level` (clamped to 0..=MAX_LEVEL)
///
/// ```
/// use falling_blocks_core::scoring::score_multiplier;
///
/// assert_eq!(score_multiplier(0), 1.0);
/// assert_eq!(score_multiplier(1), 1.1);
/// assert_eq!(score_multiplier(4), 2.0);
/// ```
pub fn score_multiplier(level: i32) -> f64 {
    multiplier_hundredths(level) as f64 / 100.0
}

/// `round(points * multiplier(level))`, exact
fn scale_points(points: u32, level: i32) -> u32 {
    let scaled = points as u64 * multiplier_hundredths(level) as u64;
    ((scaled + 50) / 100) as u32
}

/// Total score required to reach `target` level from level 0
pub fn total_score_for_level(target: i32) -> u32 {
    if target <= 0 {
        return 0;
    }
    (0..target)
        .map(|level| scale_points(BASE_POINTS_TO_LEVEL_UP, level))
        .fold(0u32, u32::saturating_add)
}

/// Gravity interval for `level`. Fixed at the original interval when dynamic
/// speed is off.
pub fn drop_interval_ms(level: u32, dynamic_speed: bool) -> u32 {
    if !dynamic_speed {
        return ORIGINAL_DROP_INTERVAL_MS;
    }
    let reduction = level.min(MAX_LEVEL) * DROP_INTERVAL_REDUCTION_PER_LEVEL_MS;
    ORIGINAL_DROP_INTERVAL_MS
        .saturating_sub(reduction)
        .max(MIN_DROP_INTERVAL_MS)
}

/// Points earned for clearing `lines` at `level`; 0 outside 1..=4
pub fn points_for_lines(lines: usize, level: u32) -> u32 {
    match lines {
        1..=4 => scale_points(LINE_CLEAR_POINTS[lines], level as i32),
        _ => 0,
    }
}

/// Advance the level while `score` has reached the threshold.
pub fn check_level_up(score: u32, level: u32, next_level_score: u32) -> LevelUp {
    let mut out = LevelUp {
        level,
        next_level_score,
        changed: false,
    };
    while out.level < MAX_LEVEL && score >= out.next_level_score {
        out.level += 1;
        out.next_level_score = total_score_for_level(out.level as i32 + 1);
        out.changed = true;
    }
    out
}
