//! Difficulty model
//!
//! Score maps to a scalar through a step function; every generation knob
//! (variant probabilities, spawn cooldowns, vertical spacing) derives from
//! that scalar through pure tables. Difficulty is never stored as independent
//! state - it is recomputed from the score each tick.

use serde::{Deserialize, Serialize};

/// Hard ceiling on the difficulty scalar
pub const MAX_DIFFICULTY: f32 = 20.0;
/// Score needed per difficulty step
pub const SCORE_PER_LEVEL: u64 = 1000;
/// Difficulty added per level
pub const DIFFICULTY_STEP: f32 = 0.1;

/// Platform count never drops below this, no matter the difficulty
const PLATFORM_COUNT_FLOOR: usize = 4;
/// Generated gaps never exceed this fraction of the player's jump reach
const MAX_GAP_FRACTION: f32 = 0.8;
/// Smallest vertical gap the spacing table will ever emit
const MIN_GAP_FLOOR: f32 = 10.0;

/// Difficulty scalar for a score: `floor(score / 1000) * 0.1`, capped.
///
/// Monotone non-decreasing in the score by construction.
pub fn difficulty_for_score(score: u64) -> f32 {
    let stepped = (score / SCORE_PER_LEVEL) as f32 * DIFFICULTY_STEP;
    stepped.min(MAX_DIFFICULTY)
}

/// Level counter shown to players (and kept on the leaderboard)
pub fn level_for_score(score: u64) -> u32 {
    ((score / SCORE_PER_LEVEL) as f32).min(MAX_DIFFICULTY / DIFFICULTY_STEP) as u32
}

/// Platform generation knobs for one difficulty value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Registry is replenished up to this count after every camera shift
    pub target_count: usize,
    /// Percent chance of a moving platform
    pub moving_pct: f32,
    /// Percent chance of a breakable platform
    pub breakable_pct: f32,
    /// Percent chance of a spring platform
    pub spring_pct: f32,
    /// Bonus percent chance of another breakable right after a breakable
    pub adjacent_breakable_pct: f32,
}

impl PlatformConfig {
    pub fn for_difficulty(difficulty: f32, base_count: usize) -> Self {
        // Fewer platforms as difficulty rises, floored so the world never
        // thins out completely
        let target_count = if difficulty >= 1.0 {
            (base_count as i64 - (difficulty / 2.0).floor() as i64)
                .max(PLATFORM_COUNT_FLOOR as i64) as usize
        } else {
            base_count
        };

        Self {
            target_count,
            moving_pct: (5.0 + difficulty * 2.0).min(30.0),
            breakable_pct: (3.0 + difficulty * 1.5).min(25.0),
            spring_pct: (2.0 + difficulty).min(15.0),
            adjacent_breakable_pct: if difficulty >= 1.0 {
                15.0 + difficulty * 0.5
            } else {
                0.0
            },
        }
    }
}

/// Power-up spawn knobs for one difficulty value
///
/// Only probability and cooldown scale with difficulty; force and duration
/// stay fixed in [`crate::tuning::Tuning`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpConfig {
    pub rocket_pct: f32,
    pub balloon_pct: f32,
    /// Minimum ticks between rocket spawns
    pub rocket_cooldown: u64,
    /// Minimum ticks between balloon spawns
    pub balloon_cooldown: u64,
}

impl PowerUpConfig {
    pub fn for_difficulty(difficulty: f32) -> Self {
        Self {
            rocket_pct: (2.0 + difficulty * 0.3).min(8.0),
            balloon_pct: (4.0 + difficulty * 0.4).min(12.0),
            rocket_cooldown: (450.0 - difficulty * 20.0).max(200.0) as u64,
            balloon_cooldown: (300.0 - difficulty * 15.0).max(150.0) as u64,
        }
    }
}

/// Vertical gap range between generated platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacingConfig {
    pub min_gap: f32,
    pub max_gap: f32,
}

impl SpacingConfig {
    /// Spacing for a difficulty, bounded by the player's jump reach.
    ///
    /// Gaps widen with difficulty but never exceed `MAX_GAP_FRACTION` of
    /// `max_jump_height`, so no generated layout is unreachable. The range is
    /// clamped to a positive floor and never inverted, even if the caller
    /// feeds in a degenerate jump height.
    pub fn for_difficulty(difficulty: f32, max_jump_height: f32) -> Self {
        let reachable = max_jump_height * MAX_GAP_FRACTION;

        let min_gap = (40.0 + difficulty * 1.5).min(reachable - 10.0).max(MIN_GAP_FLOOR);
        let max_gap = (60.0 + difficulty * 2.0).min(reachable).max(min_gap);

        Self { min_gap, max_gap }
    }
}
