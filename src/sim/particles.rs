//! Confetti burst pool
//!
//! Fixed capacity, allocated once. Slots are only ever flipped between
//! active and inactive; nothing is allocated after construction.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use crate::consts::*;

/// One confetti piece
#[derive(Debug, Clone, Copy, Default)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds left before the piece disappears
    pub life: f32,
    pub active: bool,
}

/// Fixed-size pool of reusable particles (visual only, never touches the ball)
#[derive(Debug, Clone)]
pub struct ConfettiPool {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ConfettiPool {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            particles: vec![Particle::default(); capacity],
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.active)
    }

    /// Activate up to `count` free slots around `origin`
    ///
    /// Returns how many were activated; a short pool silently truncates.
    pub fn spawn(&mut self, origin: Vec3, count: usize) -> usize {
        let rng = &mut self.rng;
        let mut spawned = 0;
        for p in self.particles.iter_mut().filter(|p| !p.active).take(count) {
            let jitter = Vec3::new(
                rng.random_range(-0.3..0.3),
                rng.random_range(0.0..0.2),
                rng.random_range(-0.3..0.3),
            );
            let angle = rng.random_range(0.0..TAU);
            let outward = rng.random_range(1.0..3.0);
            let upward = rng.random_range(3.0..6.0);

            p.pos = origin + jitter;
            p.vel = Vec3::new(angle.cos() * outward, upward, angle.sin() * outward);
            p.life = rng.random_range(CONFETTI_MIN_LIFE..CONFETTI_MAX_LIFE);
            p.active = true;
            spawned += 1;
        }
        spawned
    }

    /// Ballistic update of every active piece
    pub fn step(&mut self, dt: f32) {
        for p in self.particles.iter_mut().filter(|p| p.active) {
            p.vel.y -= CONFETTI_GRAVITY * dt;
            p.pos += p.vel * dt;
            p.life -= dt;
            if p.life <= 0.0 || p.pos.y < CONFETTI_FLOOR {
                p.active = false;
            }
        }
    }

    /// Deactivate everything (level reset)
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.active = false;
        }
    }
}

impl Default for ConfettiPool {
    fn default() -> Self {
        Self::new(CONFETTI_CAPACITY, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_truncates_when_full() {
        let mut pool = ConfettiPool::new(CONFETTI_CAPACITY, 7);
        assert_eq!(pool.spawn(Vec3::ZERO, 120), 120);
        assert_eq!(pool.spawn(Vec3::ZERO, 120), 40);
        assert_eq!(pool.spawn(Vec3::ZERO, 10), 0);
        assert_eq!(pool.active_count(), CONFETTI_CAPACITY);
    }

    #[test]
    fn test_particles_rise_then_retire() {
        let mut pool = ConfettiPool::new(8, 3);
        pool.spawn(Vec3::ZERO, 8);
        for p in pool.iter_active() {
            assert!(p.vel.y > 0.0);
            assert!(p.life >= CONFETTI_MIN_LIFE && p.life < CONFETTI_MAX_LIFE);
        }

        // Longer than the max lifetime at 60 fps
        for _ in 0..150 {
            pool.step(1.0 / 60.0);
        }
        assert_eq!(pool.active_count(), 0);
        // Slots are reused, not reallocated
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.spawn(Vec3::ZERO, 8), 8);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut pool = ConfettiPool::new(1, 11);
        pool.spawn(Vec3::ZERO, 1);
        let before = pool.iter_active().next().map(|p| p.vel.y).unwrap_or_default();
        pool.step(0.1);
        let after = pool.iter_active().next().map(|p| p.vel.y).unwrap_or_default();
        assert!((before - after - CONFETTI_GRAVITY * 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_same_seed_same_burst() {
        let mut a = ConfettiPool::new(16, 42);
        let mut b = ConfettiPool::new(16, 42);
        a.spawn(Vec3::ONE, 16);
        b.spawn(Vec3::ONE, 16);
        for (pa, pb) in a.iter_active().zip(b.iter_active()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
        }
    }

    proptest! {
        #[test]
        fn prop_partial_spawn_fills_free_slots(
            capacity in 1usize..64,
            used in 0usize..64,
            extra in 1usize..32,
        ) {
            let used = used.min(capacity);
            let mut pool = ConfettiPool::new(capacity, 1);
            pool.spawn(Vec3::ZERO, used);
            let free = capacity - used;

            let spawned = pool.spawn(Vec3::ZERO, free + extra);
            prop_assert_eq!(spawned, free);
            prop_assert_eq!(pool.active_count(), capacity);
        }
    }
}
