//! Game state and core simulation types
//!
//! Everything a collaborator can observe lives here. The snapshot handed out
//! by the controller is this module's [`GameState`]; external code reads it
//! and never mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::EntityRegistry;
use crate::tuning::Tuning;

/// Current phase of a run
///
/// The only valid transitions are `NotStarted -> Playing` (start) and
/// `Playing -> GameOver` (falling off the bottom). A restart rebuilds the
/// state from scratch rather than transitioning backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start()`
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended; only `restart()` leaves this phase
    GameOver,
}

/// Held movement direction (the input mailbox value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDir {
    Left,
    Right,
}

/// Platform variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    /// Slides horizontally, ping-ponging between the side walls
    Moving { dir: MoveDir },
    /// Gives one bounce, then breaks and falls out of the world
    Breakable { broken: bool },
    /// Bounces with the larger spring force
    Spring,
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub kind: PlatformKind,
}

impl Platform {
    /// Whether this is a breakable platform that has already broken
    #[inline]
    pub fn is_broken(&self) -> bool {
        matches!(self.kind, PlatformKind::Breakable { broken: true })
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Rocket,
    Balloon,
}

/// A collectible power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PowerUpKind,
    /// Cleared on collection; an inactive power-up never persists past the
    /// tick that collected it
    pub active: bool,
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    pub width: f32,
    pub height: f32,
    /// Set on the first bounce of the run
    pub jumping: bool,
    /// Currently riding power-up, if any
    pub active_powerup: Option<PowerUpKind>,
    /// Remaining ticks of the active power-up
    pub powerup_ticks: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.player_spawn(),
            vel_y: 0.0,
            width: tuning.player_width,
            height: tuning.player_height,
            jumping: false,
            active_powerup: None,
            powerup_ticks: 0,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Apply a collected power-up: last pickup wins, replacing any in-flight
    /// variant and its timer.
    pub fn collect(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        self.active_powerup = Some(kind);
        self.powerup_ticks = tuning.powerup_duration(kind);
        self.vel_y = tuning.powerup_force(kind);
    }
}

/// Tick of the most recent spawn per power-up variant, for cooldown gating
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub rocket: Option<u64>,
    pub balloon: Option<u64>,
}

impl SpawnTimers {
    /// Whether `kind` is off cooldown at tick `now`
    pub fn ready(&self, kind: PowerUpKind, now: u64, cooldown: u64) -> bool {
        let last = match kind {
            PowerUpKind::Rocket => self.rocket,
            PowerUpKind::Balloon => self.balloon,
        };
        match last {
            Some(t) => now.saturating_sub(t) >= cooldown,
            None => true,
        }
    }

    pub fn record(&mut self, kind: PowerUpKind, now: u64) {
        match kind {
            PowerUpKind::Rocket => self.rocket = Some(now),
            PowerUpKind::Balloon => self.balloon = Some(now),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter (also the cooldown clock)
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// The player sprite
    pub player: Player,
    /// Platforms and power-ups
    pub world: EntityRegistry,
    /// Score; monotone non-decreasing within a run
    pub score: u64,
    /// Difficulty scalar, recomputed from score every tick
    pub difficulty: f32,
    /// Power-up spawn cooldown clocks
    pub spawn_timers: SpawnTimers,
}

impl GameState {
    /// Fresh state in `NotStarted`, no terrain yet
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::NotStarted,
            player: Player::new(tuning),
            world: EntityRegistry::new(),
            score: 0,
            difficulty: 0.0,
            spawn_timers: SpawnTimers::default(),
        }
    }

    /// Whether a run has been started (and possibly ended)
    #[inline]
    pub fn started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    /// Whether the current run has ended
    #[inline]
    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
