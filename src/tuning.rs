//! Data-driven game balance
//!
//! Every gameplay constant lives in one immutable [`Tuning`] value built at
//! simulation start and passed by reference into each component. No component
//! reads balance numbers from anywhere else, so tests can run the whole sim
//! against alternate constants.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::state::PowerUpKind;

/// Immutable gameplay constants
///
/// Positions use screen-style coordinates: x grows rightward, y grows
/// downward, so gravity is positive and jump forces are negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Visible world width (px)
    pub world_width: f32,
    /// Visible world height (px)
    pub world_height: f32,

    /// Player bounding box (px)
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed while a direction is held (px/tick)
    pub player_speed: f32,

    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Vertical velocity set when bouncing off a normal platform (negative = up)
    pub jump_force: f32,
    /// Vertical velocity set when bouncing off a spring platform
    pub spring_force: f32,

    /// Platform bounding box (px)
    pub platform_width: f32,
    pub platform_height: f32,
    /// Platform count at difficulty zero
    pub base_platform_count: usize,
    /// Fall rate of a broken platform (px/tick)
    pub broken_fall_speed: f32,
    /// Moving-platform speed at difficulty zero (px/tick)
    pub moving_speed_base: f32,
    /// Added moving-platform speed per difficulty point (px/tick)
    pub moving_speed_per_difficulty: f32,

    /// Sustained upward velocity while a rocket is active
    pub rocket_force: f32,
    /// Rocket lifetime (ticks)
    pub rocket_duration: u32,
    /// Sustained upward velocity while a balloon is active
    pub balloon_force: f32,
    /// Balloon lifetime (ticks)
    pub balloon_duration: u32,

    /// Cap on world scroll per tick during a powered ascent (px)
    pub max_scroll_per_tick: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 320.0,
            world_height: 480.0,

            player_width: 40.0,
            player_height: 40.0,
            player_speed: 5.0,

            gravity: 0.25,
            jump_force: -10.0,
            spring_force: -15.0,

            platform_width: 60.0,
            platform_height: 10.0,
            base_platform_count: 7,
            broken_fall_speed: 5.0,
            moving_speed_base: 1.0,
            moving_speed_per_difficulty: 0.2,

            rocket_force: -20.0,
            rocket_duration: 150,
            balloon_force: -6.0,
            balloon_duration: 100,

            max_scroll_per_tick: 20.0,
        }
    }
}

impl Tuning {
    /// The horizontal line the camera keeps the player at while ascending
    #[inline]
    pub fn midline(&self) -> f32 {
        self.world_height / 2.0
    }

    /// Player spawn position (top-left corner)
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(self.world_width / 2.0 - self.player_width / 2.0, self.midline())
    }

    /// Peak height of an unassisted jump: v² / 2g
    ///
    /// Guarded so a misconfigured gravity or jump force can never feed a
    /// zero/negative reach into the spacing tables.
    pub fn max_jump_height(&self) -> f32 {
        let g = self.gravity.max(f32::EPSILON);
        let h = (self.jump_force * self.jump_force) / (2.0 * g);
        h.max(1.0)
    }

    /// Sustained upward velocity for an active power-up
    pub fn powerup_force(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::Rocket => self.rocket_force,
            PowerUpKind::Balloon => self.balloon_force,
        }
    }

    /// Lifetime in ticks for a freshly collected power-up
    pub fn powerup_duration(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Rocket => self.rocket_duration,
            PowerUpKind::Balloon => self.balloon_duration,
        }
    }

    /// Pickup bounding box per variant
    pub fn powerup_size(&self, kind: PowerUpKind) -> Vec2 {
        match kind {
            PowerUpKind::Rocket => Vec2::new(20.0, 30.0),
            PowerUpKind::Balloon => Vec2::new(20.0, 24.0),
        }
    }

    /// Horizontal speed of a moving platform at the given difficulty
    pub fn moving_platform_speed(&self, difficulty: f32) -> f32 {
        self.moving_speed_base + difficulty * self.moving_speed_per_difficulty
    }
}
