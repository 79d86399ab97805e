//! Entity registry
//!
//! In-memory collections of platforms and power-ups plus the id allocator.
//! All mutation happens synchronously inside a tick; collaborators only ever
//! see read-only snapshots. Pruning keeps the collections bounded - an entry
//! below the bottom edge never survives the tick that put it there.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::SpacingConfig;
use super::state::{Platform, PowerUp};
use super::terrain;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// Insertion order; collision resolution depends on it (first match wins)
    pub platforms: Vec<Platform>,
    pub powerups: Vec<PowerUp>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            platforms: Vec::new(),
            powerups: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Translate every entity downward (camera scroll)
    pub fn shift_down(&mut self, delta: f32) {
        for platform in &mut self.platforms {
            platform.pos.y += delta;
        }
        for powerup in &mut self.powerups {
            powerup.pos.y += delta;
        }
    }

    /// Drop entities that have scrolled or fallen past the bottom bound
    pub fn prune_offscreen(&mut self, bottom: f32) {
        self.platforms.retain(|p| p.pos.y < bottom);
        self.powerups.retain(|p| p.pos.y < bottom);
    }

    /// Y of the highest (smallest-y) platform
    pub fn highest_platform_y(&self) -> Option<f32> {
        self.platforms
            .iter()
            .map(|p| p.pos.y)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Generate platforms above the current highest until the registry holds
    /// `target` of them.
    ///
    /// Gaps are drawn from the spacing table, so every new platform is
    /// reachable from the one below it. Variant selection chains: each new
    /// platform sees the previously generated one, which is how breakable
    /// clusters form at higher difficulty.
    pub fn refill_platforms(
        &mut self,
        target: usize,
        difficulty: f32,
        spacing: &SpacingConfig,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) {
        let mut preceding = self
            .platforms
            .iter()
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|p| p.kind);

        while self.platforms.len() < target {
            // Anchor on the highest platform; a fully emptied registry
            // restarts from the bottom of the world
            let anchor = self.highest_platform_y().unwrap_or(tuning.world_height);
            let gap = rng.random_range(spacing.min_gap..=spacing.max_gap);
            let x = rng.random_range(0.0..tuning.world_width - tuning.platform_width);

            let id = self.alloc_id();
            let platform =
                terrain::create_platform(id, x, anchor - gap, difficulty, preceding, rng, tuning);
            preceding = Some(platform.kind);
            self.platforms.push(platform);
        }
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::sim::state::PlatformKind;

    fn platform(id: u32, y: f32) -> Platform {
        Platform {
            id,
            pos: Vec2::new(100.0, y),
            width: 60.0,
            kind: PlatformKind::Normal,
        }
    }

    #[test]
    fn test_shift_and_prune() {
        let mut world = EntityRegistry::new();
        world.platforms.push(platform(1, 100.0));
        world.platforms.push(platform(2, 470.0));

        world.shift_down(20.0);
        assert_eq!(world.platforms[0].pos.y, 120.0);

        world.prune_offscreen(480.0);
        assert_eq!(world.platforms.len(), 1);
        assert_eq!(world.platforms[0].id, 1);
    }

    #[test]
    fn test_refill_reaches_target_with_reachable_gaps() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let spacing = SpacingConfig::for_difficulty(0.0, tuning.max_jump_height());

        let mut world = EntityRegistry::new();
        world.platforms.push(platform(1, 400.0));
        world.refill_platforms(7, 0.0, &spacing, &mut rng, &tuning);

        assert_eq!(world.platforms.len(), 7);

        let mut ys: Vec<f32> = world.platforms.iter().map(|p| p.pos.y).collect();
        ys.sort_by(|a, b| a.total_cmp(b));
        for pair in ys.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap <= tuning.max_jump_height() * 0.8 + 1e-3);
        }
    }

    #[test]
    fn test_refill_from_empty_registry() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let spacing = SpacingConfig::for_difficulty(2.0, tuning.max_jump_height());

        let mut world = EntityRegistry::new();
        world.refill_platforms(4, 2.0, &spacing, &mut rng, &tuning);
        assert_eq!(world.platforms.len(), 4);
        // Seeded from the world bottom, so everything sits above it
        assert!(world.platforms.iter().all(|p| p.pos.y < tuning.world_height));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut world = EntityRegistry::new();
        let a = world.alloc_id();
        let b = world.alloc_id();
        assert_ne!(a, b);
    }
}
