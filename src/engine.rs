//! Particle pool for Burst FX
//! One shared arena of live particles for every active burst. Bursts from
//! overlapping triggers interleave here; there is no per-burst isolation.

use egui::Vec2;
use rand::RngCore;
use tracing::{debug, warn};

use crate::particle::Particle;
use crate::style::BurstStyle;

const DEFAULT_MAX_POOL: usize = 10_000;

pub struct ParticleEngine {
    particles: Vec<Particle>,
    /// Safety cap: a trigger storm must not grow the pool without bound.
    max_pool: usize,
}

impl Default for ParticleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEngine {
    pub fn new() -> Self {
        Self::with_max_pool(DEFAULT_MAX_POOL)
    }

    pub fn with_max_pool(max_pool: usize) -> Self {
        Self {
            particles: Vec::with_capacity(256),
            max_pool,
        }
    }

    /// Spawn one burst at `origin`. `style` of `None` picks uniformly from the
    /// catalog. Returns the number of particles actually spawned.
    pub fn explode(
        &mut self,
        origin: Vec2,
        style: Option<BurstStyle>,
        rng: &mut dyn RngCore,
    ) -> usize {
        let style = style.unwrap_or_else(|| BurstStyle::random(rng));
        let count = style.particle_count();
        if self.particles.len() + count > self.max_pool {
            warn!(
                pool = self.particles.len(),
                cap = self.max_pool,
                "pool cap reached, burst skipped"
            );
            return 0;
        }
        for index in 0..count {
            self.particles
                .push(Particle::new(origin, style, index, count, rng));
        }
        debug!(style = style.name(), count, pool = self.particles.len(), "burst spawned");
        count
    }

    /// Advance every particle one tick and swap-remove the dead.
    pub fn tick(&mut self, rng: &mut dyn RngCore) {
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].update(rng) {
                i += 1;
            } else {
                self.particles.swap_remove(i);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_explode_spawns_bucket_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = ParticleEngine::new();
        let spawned = engine.explode(Vec2::new(100.0, 100.0), Some(BurstStyle::Confetti), &mut rng);
        assert_eq!(spawned, 40);
        assert_eq!(engine.len(), 40);
        for p in engine.particles() {
            assert_eq!(p.gravity, 0.2);
            assert_eq!(p.drag, 0.92);
        }
    }

    #[test]
    fn test_overlapping_bursts_share_one_pool() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut engine = ParticleEngine::new();
        engine.explode(Vec2::new(10.0, 10.0), Some(BurstStyle::Matrix), &mut rng);
        engine.explode(Vec2::new(900.0, 500.0), Some(BurstStyle::Heart), &mut rng);
        assert_eq!(engine.len(), 15 + 60);
    }

    #[test]
    fn test_random_style_when_unspecified() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = ParticleEngine::new();
        let spawned = engine.explode(Vec2::ZERO, None, &mut rng);
        assert!(spawned > 0);
        assert_eq!(engine.len(), spawned);
    }

    #[test]
    fn test_tick_drains_pool_to_empty() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut engine = ParticleEngine::new();
        engine.explode(Vec2::new(400.0, 300.0), Some(BurstStyle::Lightning), &mut rng);
        // decay 20 per tick from 255: dead within 13 ticks.
        for _ in 0..13 {
            engine.tick(&mut rng);
        }
        assert!(engine.is_empty());
    }

    #[test]
    fn test_pool_cap_skips_burst() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut engine = ParticleEngine::with_max_pool(60);
        assert_eq!(engine.explode(Vec2::ZERO, Some(BurstStyle::Neon), &mut rng), 40);
        assert_eq!(engine.explode(Vec2::ZERO, Some(BurstStyle::Neon), &mut rng), 0);
        assert_eq!(engine.len(), 40);
        // A smaller burst that still fits is accepted.
        assert_eq!(engine.explode(Vec2::ZERO, Some(BurstStyle::Matrix), &mut rng), 15);
        assert_eq!(engine.len(), 55);
    }

    #[test]
    fn test_every_burst_style_drains() {
        for style in crate::style::ALL_STYLES {
            let mut rng = StdRng::seed_from_u64(6);
            let mut engine = ParticleEngine::new();
            engine.explode(Vec2::new(640.0, 360.0), Some(style), &mut rng);
            let mut ticks = 0;
            while !engine.is_empty() {
                engine.tick(&mut rng);
                ticks += 1;
                assert!(ticks < 1000, "{} burst never drained", style.name());
            }
        }
    }
}
