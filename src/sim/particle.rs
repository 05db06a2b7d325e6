//! Visual-feedback particles
//!
//! Particles never affect gameplay. They are pushed in bursts by deaths and
//! explosions and pruned once per tick after they have been updated.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Sprite;

/// Life a particle starts with (one unit lost per tick)
pub const PARTICLE_LIFE: f32 = 100.0;
/// Starting glyph size
pub const PARTICLE_SIZE: f32 = 20.0;
/// Size lost per tick
const SHRINK_PER_TICK: f32 = 0.2;
/// Particles feel a tenth of normal gravity
const GRAVITY_SCALE: f32 = 0.1;
/// Spawn speed range per axis is [-SPREAD/2, SPREAD/2)
const SPREAD: f32 = 8.0;

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Counts down from 100; alpha for rendering is life / 100
    pub life: f32,
    pub size: f32,
    /// The entity that emitted it
    pub sprite: Sprite,
}

impl Particle {
    pub fn new(pos: Vec2, sprite: Sprite, rng: &mut impl Rng) -> Self {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * SPREAD,
            (rng.random::<f32>() - 0.5) * SPREAD,
        );
        Self {
            pos,
            vel,
            life: PARTICLE_LIFE,
            size: PARTICLE_SIZE,
            sprite,
        }
    }

    pub fn update(&mut self, gravity: f32) {
        self.pos += self.vel;
        self.vel.y += gravity * GRAVITY_SCALE;
        self.life -= 1.0;
        if self.size > SHRINK_PER_TICK {
            self.size -= SHRINK_PER_TICK;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// The shared particle pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Particles {
    pub items: Vec<Particle>,
    /// Oldest particles are dropped beyond this
    pub cap: usize,
}

impl Particles {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            cap,
        }
    }

    /// Emit `count` particles from `pos`
    pub fn burst(&mut self, count: usize, pos: Vec2, sprite: Sprite, rng: &mut impl Rng) {
        for _ in 0..count {
            self.items.push(Particle::new(pos, sprite, rng));
        }
        if self.items.len() > self.cap {
            let excess = self.items.len() - self.cap;
            self.items.drain(..excess);
        }
    }

    pub fn update(&mut self, gravity: f32) {
        for particle in self.items.iter_mut() {
            particle.update(gravity);
        }
    }

    /// Remove dead particles
    pub fn prune(&mut self) {
        self.items.retain(Particle::is_alive);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_fades_out() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pool = Particles::with_cap(100);
        pool.burst(10, Vec2::new(100.0, 100.0), Sprite::Blast, &mut rng);
        assert_eq!(pool.len(), 10);

        for _ in 0..99 {
            pool.update(0.6);
            pool.prune();
        }
        assert_eq!(pool.len(), 10);

        pool.update(0.6);
        pool.prune();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pool = Particles::with_cap(30);
        pool.burst(20, Vec2::ZERO, Sprite::Robot, &mut rng);
        pool.burst(20, Vec2::new(50.0, 0.0), Sprite::Blast, &mut rng);
        assert_eq!(pool.len(), 30);
        // The ten oldest Robot particles were dropped
        assert_eq!(pool.items.iter().filter(|p| p.sprite == Sprite::Robot).count(), 10);
    }

    proptest! {
        #[test]
        fn particle_spawn_speed_is_bounded(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = Particle::new(Vec2::ZERO, Sprite::Invader, &mut rng);
            prop_assert!(p.vel.x >= -4.0 && p.vel.x < 4.0);
            prop_assert!(p.vel.y >= -4.0 && p.vel.y < 4.0);
        }

        #[test]
        fn particle_size_never_negative(ticks in 0usize..300) {
            let mut rng = Pcg32::seed_from_u64(1);
            let mut p = Particle::new(Vec2::ZERO, Sprite::Invader, &mut rng);
            for _ in 0..ticks {
                p.update(0.6);
            }
            prop_assert!(p.size > 0.0);
        }
    }
}
