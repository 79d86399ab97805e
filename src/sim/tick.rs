//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one step: intent-driven horizontal
//! movement, vertical integration (gravity or powered ascent), platform and
//! pickup resolution, moving/broken platform updates, camera scroll, and the
//! game-over check. Deterministic given the state, the intent, and the RNG.

use glam::Vec2;
use rand::Rng;

use super::camera;
use super::collision;
use super::difficulty;
use super::state::{GamePhase, GameState, MoveDir, PlatformKind, PowerUpKind};
use crate::tuning::Tuning;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, intent: Option<MoveDir>, rng: &mut impl Rng, tuning: &Tuning) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.difficulty = difficulty::difficulty_for_score(state.score);

    // Horizontal movement with wraparound: leaving one side edge re-enters
    // from the other
    match intent {
        Some(MoveDir::Left) => state.player.pos.x -= tuning.player_speed,
        Some(MoveDir::Right) => state.player.pos.x += tuning.player_speed,
        None => {}
    }
    if state.player.pos.x < -state.player.width {
        state.player.pos.x = tuning.world_width;
    } else if state.player.pos.x > tuning.world_width {
        state.player.pos.x = -state.player.width;
    }

    // Bottom edge before vertical integration; the landing test needs it to
    // reject hits from below
    let prev_bottom = state.player.bottom();

    let powered = state.player.active_powerup.is_some();
    let mut just_broken: Option<u32> = None;

    if let Some(kind) = state.player.active_powerup {
        // Powered ascent: velocity is pinned to the variant's force, gravity
        // is suspended, and the climb drives the camera every tick instead of
        // waiting for a midline crossing
        state.player.vel_y = tuning.powerup_force(kind);
        state.player.powerup_ticks = state.player.powerup_ticks.saturating_sub(1);
        if state.player.powerup_ticks == 0 {
            state.player.active_powerup = None;
        }
        state.player.pos.y += state.player.vel_y;

        let delta = (tuning.midline() - state.player.pos.y).min(tuning.max_scroll_per_tick);
        if delta > 0.0 {
            camera::scroll(state, delta, rng, tuning);
        }
    } else {
        state.player.vel_y += tuning.gravity;
        state.player.pos.y += state.player.vel_y;

        // Landing, only while falling. Platforms are scanned in stored order
        // and the first qualifying one wins - even an already-broken one,
        // which simply gives no bounce.
        if state.player.vel_y > 0.0 {
            for platform in &mut state.world.platforms {
                if !collision::lands_on(&state.player, prev_bottom, platform, tuning.platform_height)
                {
                    continue;
                }
                match platform.kind {
                    PlatformKind::Normal | PlatformKind::Moving { .. } => {
                        state.player.pos.y = platform.pos.y - state.player.height;
                        state.player.vel_y = tuning.jump_force;
                        state.player.jumping = true;
                    }
                    PlatformKind::Spring => {
                        state.player.pos.y = platform.pos.y - state.player.height;
                        state.player.vel_y = tuning.spring_force;
                        state.player.jumping = true;
                    }
                    PlatformKind::Breakable { broken: false } => {
                        state.player.pos.y = platform.pos.y - state.player.height;
                        state.player.vel_y = tuning.jump_force;
                        state.player.jumping = true;
                        // One-way transition; this platform never bounces again
                        platform.kind = PlatformKind::Breakable { broken: true };
                        just_broken = Some(platform.id);
                    }
                    PlatformKind::Breakable { broken: true } => {}
                }
                break;
            }
        }
    }

    // Pickups: box overlap against live power-ups, removed the same tick they
    // are collected. When several overlap, the last in stored order wins.
    let player_pos = state.player.pos;
    let player_size = Vec2::new(state.player.width, state.player.height);
    let mut collected: Option<PowerUpKind> = None;
    state.world.powerups.retain(|p| {
        if p.active && collision::aabb_overlap(player_pos, player_size, p.pos, p.size) {
            collected = Some(p.kind);
            false
        } else {
            true
        }
    });
    if let Some(kind) = collected {
        state.player.collect(kind, tuning);
        log::debug!("collected {:?} at tick {}", kind, state.time_ticks);
    }

    // Moving platforms ping-pong between the walls; broken ones fall out of
    // the world (starting the tick after they break)
    let speed = tuning.moving_platform_speed(state.difficulty);
    for platform in &mut state.world.platforms {
        match platform.kind {
            PlatformKind::Moving { dir: MoveDir::Left } => {
                platform.pos.x -= speed;
                if platform.pos.x < 0.0 {
                    platform.pos.x = 0.0;
                    platform.kind = PlatformKind::Moving { dir: MoveDir::Right };
                }
            }
            PlatformKind::Moving { dir: MoveDir::Right } => {
                platform.pos.x += speed;
                let bound = tuning.world_width - platform.width;
                if platform.pos.x > bound {
                    platform.pos.x = bound;
                    platform.kind = PlatformKind::Moving { dir: MoveDir::Left };
                }
            }
            PlatformKind::Breakable { broken: true } if just_broken != Some(platform.id) => {
                platform.pos.y += tuning.broken_fall_speed;
            }
            _ => {}
        }
    }
    state.world.prune_offscreen(tuning.world_height);

    // Natural camera shift: crossing the midline while still rising
    if !powered && state.player.pos.y < tuning.midline() && state.player.vel_y < 0.0 {
        let delta = tuning.midline() - state.player.pos.y;
        camera::scroll(state, delta, rng, tuning);
    }

    // Fell below the visible world: terminal until an explicit restart
    if state.player.pos.y > tuning.world_height {
        state.phase = GamePhase::GameOver;
        log::info!("game over at score {} (tick {})", state.score, state.time_ticks);
    }
}
