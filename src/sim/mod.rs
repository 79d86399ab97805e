//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, injected into every generation site
//! - Single-threaded mutation; all writes happen inside a tick
//! - No rendering or platform dependencies
//!
//! External collaborators interact through [`Simulation`] and read the
//! [`GameState`] snapshot it hands out.

pub mod camera;
pub mod collision;
pub mod controller;
pub mod difficulty;
pub mod registry;
pub mod state;
pub mod terrain;
pub mod tick;

pub use controller::Simulation;
pub use difficulty::{
    MAX_DIFFICULTY, PlatformConfig, PowerUpConfig, SpacingConfig, difficulty_for_score,
    level_for_score,
};
pub use registry::EntityRegistry;
pub use state::{
    GamePhase, GameState, MoveDir, Platform, PlatformKind, Player, PowerUp, PowerUpKind,
};
pub use tick::tick;
