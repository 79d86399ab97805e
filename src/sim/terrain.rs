//! Procedural terrain generation
//!
//! Variant selection is one cumulative roll against the difficulty tables,
//! with a bonus roll that chains breakable platforms together. Randomness
//! comes in through `impl Rng` so tests can seed their own generator and
//! assert exact layouts.

use glam::Vec2;
use rand::Rng;

use super::difficulty::{PlatformConfig, PowerUpConfig};
use super::registry::EntityRegistry;
use super::state::{MoveDir, Platform, PlatformKind, PowerUp, PowerUpKind, SpawnTimers};
use crate::tuning::Tuning;

/// Build one platform at the given position, rolling its variant.
///
/// `preceding` is the variant of the most recently generated platform. A
/// breakable predecessor gets a bonus roll that can force another breakable,
/// deliberately clustering them into punishing runs at higher difficulty.
pub fn create_platform(
    id: u32,
    x: f32,
    y: f32,
    difficulty: f32,
    preceding: Option<PlatformKind>,
    rng: &mut impl Rng,
    tuning: &Tuning,
) -> Platform {
    let cfg = PlatformConfig::for_difficulty(difficulty, tuning.base_platform_count);
    Platform {
        id,
        pos: Vec2::new(x, y),
        width: tuning.platform_width,
        kind: roll_kind(&cfg, preceding, rng),
    }
}

fn roll_kind(cfg: &PlatformConfig, preceding: Option<PlatformKind>, rng: &mut impl Rng) -> PlatformKind {
    if matches!(preceding, Some(PlatformKind::Breakable { .. }))
        && rng.random_range(0.0..100.0) < cfg.adjacent_breakable_pct
    {
        return PlatformKind::Breakable { broken: false };
    }

    // One roll, compared cumulatively in priority order
    let roll = rng.random_range(0.0..100.0);
    if roll < cfg.moving_pct {
        let dir = if rng.random_bool(0.5) {
            MoveDir::Left
        } else {
            MoveDir::Right
        };
        PlatformKind::Moving { dir }
    } else if roll < cfg.moving_pct + cfg.breakable_pct {
        PlatformKind::Breakable { broken: false }
    } else if roll < cfg.moving_pct + cfg.breakable_pct + cfg.spring_pct {
        PlatformKind::Spring
    } else {
        PlatformKind::Normal
    }
}

/// Build the opening layout for a fresh run.
///
/// One guaranteed normal platform sits centered just below the player spawn;
/// the rest spread evenly down the screen with random x, rolled at
/// difficulty zero.
pub fn initial_layout(world: &mut EntityRegistry, rng: &mut impl Rng, tuning: &Tuning) {
    let id = world.alloc_id();
    world.platforms.push(Platform {
        id,
        pos: Vec2::new(
            tuning.world_width / 2.0 - tuning.platform_width / 2.0,
            tuning.midline() + 50.0,
        ),
        width: tuning.platform_width,
        kind: PlatformKind::Normal,
    });

    for i in 1..tuning.base_platform_count {
        let x = rng.random_range(0.0..tuning.world_width - tuning.platform_width);
        let y = (tuning.world_height / tuning.base_platform_count as f32) * i as f32;
        let id = world.alloc_id();
        let platform = create_platform(id, x, y, 0.0, None, rng, tuning);
        world.platforms.push(platform);
    }
}

/// Roll for at most one power-up, spawned above the visible top edge.
///
/// Each variant is gated by its cooldown since the last spawn of that
/// variant; one uniform roll is tested against rocket first, then balloon.
/// Records the spawn tick and pushes the entity on success.
pub fn try_spawn_powerup(
    world: &mut EntityRegistry,
    timers: &mut SpawnTimers,
    difficulty: f32,
    now: u64,
    rng: &mut impl Rng,
    tuning: &Tuning,
) -> Option<PowerUpKind> {
    let cfg = PowerUpConfig::for_difficulty(difficulty);
    let roll = rng.random_range(0.0..100.0);

    let kind = if timers.ready(PowerUpKind::Rocket, now, cfg.rocket_cooldown) && roll < cfg.rocket_pct
    {
        PowerUpKind::Rocket
    } else if timers.ready(PowerUpKind::Balloon, now, cfg.balloon_cooldown)
        && roll < cfg.balloon_pct
    {
        PowerUpKind::Balloon
    } else {
        return None;
    };

    let size = tuning.powerup_size(kind);
    let x = rng.random_range(0.0..tuning.world_width - size.x);
    let y = -30.0 - rng.random_range(0.0..50.0);

    timers.record(kind, now);
    let id = world.alloc_id();
    world.powerups.push(PowerUp {
        id,
        pos: Vec2::new(x, y),
        size,
        kind,
        active: true,
    });
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initial_layout_shape() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut world = EntityRegistry::new();

        initial_layout(&mut world, &mut rng, &tuning);

        assert_eq!(world.platforms.len(), tuning.base_platform_count);
        // The start platform is always a centered normal one below the spawn
        let start = &world.platforms[0];
        assert_eq!(start.kind, PlatformKind::Normal);
        assert_eq!(start.pos.y, tuning.midline() + 50.0);
        // Every platform fits inside the world horizontally
        assert!(world
            .platforms
            .iter()
            .all(|p| p.pos.x >= 0.0 && p.pos.x + p.width <= tuning.world_width));
    }

    #[test]
    fn test_powerup_respects_cooldown() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut world = EntityRegistry::new();
        let mut timers = SpawnTimers::default();

        // Both variants just spawned: nothing can spawn again immediately
        timers.record(PowerUpKind::Rocket, 100);
        timers.record(PowerUpKind::Balloon, 100);
        for _ in 0..200 {
            assert_eq!(
                try_spawn_powerup(&mut world, &mut timers, 0.0, 101, &mut rng, &tuning),
                None
            );
        }
        assert!(world.powerups.is_empty());
    }

    #[test]
    fn test_powerup_spawns_above_screen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut world = EntityRegistry::new();
        let mut timers = SpawnTimers::default();

        // With no cooldown pressure and enough attempts, spawns happen
        let mut spawned = 0;
        for now in 0..10_000u64 {
            if try_spawn_powerup(&mut world, &mut timers, 20.0, now, &mut rng, &tuning).is_some() {
                spawned += 1;
            }
        }
        assert!(spawned > 0);
        assert!(world.powerups.iter().all(|p| p.pos.y < 0.0));
        assert!(world.powerups.iter().all(|p| p.active));
    }

    #[test]
    fn test_exact_layout_is_reproducible() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(777);
        let mut b = Pcg32::seed_from_u64(777);

        let pa = create_platform(1, 10.0, 20.0, 5.0, None, &mut a, &tuning);
        let pb = create_platform(1, 10.0, 20.0, 5.0, None, &mut b, &tuning);
        assert_eq!(pa.kind, pb.kind);
        assert_eq!(pa.pos, pb.pos);
    }

    proptest! {
        /// Any seed and difficulty, with a breakable predecessor feeding the
        /// bonus path: generated platforms are always well-formed.
        #[test]
        fn prop_variant_rolls_always_valid(seed: u64, difficulty in 0.0f32..20.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let preceding = Some(PlatformKind::Breakable { broken: false });
            let platform = create_platform(1, 0.0, 0.0, difficulty, preceding, &mut rng, &tuning);
            // Whatever the variant, a generated breakable always starts intact
            if let PlatformKind::Breakable { broken } = platform.kind {
                prop_assert!(!broken);
            }
            prop_assert_eq!(platform.width, tuning.platform_width);
        }
    }
}
