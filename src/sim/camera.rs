//! Camera window
//!
//! The "scroll" that keeps the player inside the visible window. Both ascent
//! paths - the natural jump crossing the midline and the continuous
//! power-up climb - run through this single routine, so world recycling can
//! never diverge between them: shift everything down, prune what fell off,
//! refill platforms to the difficulty target, try one power-up spawn, and
//! bank the climbed distance as score.

use rand::Rng;

use super::difficulty::{PlatformConfig, SpacingConfig};
use super::state::GameState;
use super::terrain;
use crate::tuning::Tuning;

/// Scroll the world down by `delta` pixels (the player rises by the same
/// amount relative to it) and recycle content at the top edge.
pub fn scroll(state: &mut GameState, delta: f32, rng: &mut impl Rng, tuning: &Tuning) {
    debug_assert!(delta > 0.0);

    state.player.pos.y += delta;
    state.world.shift_down(delta);
    state.world.prune_offscreen(tuning.world_height);

    let platform_cfg = PlatformConfig::for_difficulty(state.difficulty, tuning.base_platform_count);
    let spacing = SpacingConfig::for_difficulty(state.difficulty, tuning.max_jump_height());
    state.world.refill_platforms(
        platform_cfg.target_count,
        state.difficulty,
        &spacing,
        rng,
        tuning,
    );

    if let Some(kind) = terrain::try_spawn_powerup(
        &mut state.world,
        &mut state.spawn_timers,
        state.difficulty,
        state.time_ticks,
        rng,
        tuning,
    ) {
        log::debug!("spawned {:?} at tick {}", kind, state.time_ticks);
    }

    state.score += delta.floor() as u64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::sim::state::GamePhase;
    use crate::sim::terrain::initial_layout;

    fn playing_state(seed: u64, tuning: &Tuning) -> (GameState, Pcg32) {
        let mut state = GameState::new(seed, tuning);
        let mut rng = Pcg32::seed_from_u64(seed);
        initial_layout(&mut state.world, &mut rng, tuning);
        state.phase = GamePhase::Playing;
        (state, rng)
    }

    #[test]
    fn test_scroll_accrues_floor_of_delta() {
        let tuning = Tuning::default();
        let (mut state, mut rng) = playing_state(11, &tuning);

        scroll(&mut state, 12.7, &mut rng, &tuning);
        assert_eq!(state.score, 12);
    }

    #[test]
    fn test_scroll_replenishes_to_target() {
        let tuning = Tuning::default();
        let (mut state, mut rng) = playing_state(5, &tuning);

        // A big enough shift pushes the bottom platforms off-screen
        scroll(&mut state, 200.0, &mut rng, &tuning);

        let target =
            PlatformConfig::for_difficulty(state.difficulty, tuning.base_platform_count).target_count;
        assert_eq!(state.world.platforms.len(), target);
        assert!(!state.world.platforms.is_empty());
    }

    #[test]
    fn test_scroll_moves_player_and_world_together() {
        let tuning = Tuning::default();
        let (mut state, mut rng) = playing_state(8, &tuning);

        let player_y = state.player.pos.y;
        let platform_y = state.world.platforms[0].pos.y;

        scroll(&mut state, 30.0, &mut rng, &tuning);
        assert_eq!(state.player.pos.y, player_y + 30.0);
        // The start platform survives a 30px shift and moved by exactly delta
        let moved = state
            .world
            .platforms
            .iter()
            .find(|p| p.id == 1)
            .expect("start platform still on screen");
        assert_eq!(moved.pos.y, platform_y + 30.0);
    }
}
