//! Platforms and the explosive block

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::particle::Particles;
use super::state::Sprite;
use crate::Tuning;
use crate::consts::*;

/// A rectangle players and enemies can stand on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    /// The full-width ground; enemies standing on it are not carried
    pub is_floor: bool,
    /// Horizontal speed (0 = static)
    pub vx: f32,
    /// Left end of the oscillation
    pub start_x: f32,
    /// Oscillation width
    pub range: f32,
    pub is_frozen: bool,
    /// Remaining freeze time (ms)
    pub frozen_timer: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self::with_height(x, y, width, PLATFORM_HEIGHT)
    }

    pub fn with_height(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            is_floor: false,
            vx: 0.0,
            start_x: x,
            range: 0.0,
            is_frozen: false,
            frozen_timer: 0.0,
        }
    }

    /// The permanent full-width ground
    pub fn floor() -> Self {
        let mut floor = Self::with_height(0.0, GAME_HEIGHT - FLOOR_HEIGHT, GAME_WIDTH, FLOOR_HEIGHT);
        floor.is_floor = true;
        floor
    }

    /// Make the platform oscillate over `range` units
    ///
    /// A negative speed means the platform starts at the right end of its
    /// range, so the range is laid out to its left.
    pub fn make_mobile(mut self, speed: f32, range: f32) -> Self {
        self.vx = speed;
        self.range = range;
        if speed < 0.0 {
            self.start_x = self.pos.x - range;
        }
        self
    }

    pub fn is_mobile(&self) -> bool {
        self.vx != 0.0
    }

    pub fn update(&mut self) {
        if self.is_frozen {
            self.frozen_timer -= TICK_MS;
            if self.frozen_timer <= 0.0 {
                self.is_frozen = false;
            }
        }
        if self.is_mobile() {
            self.pos.x += self.vx;
            if self.pos.x <= self.start_x || self.pos.x >= self.start_x + self.range {
                self.vx = -self.vx;
            }
        }
    }

    /// Ice over the surface; re-freezing restarts the timer
    pub fn freeze(&mut self, duration_ms: f32) {
        self.is_frozen = true;
        self.frozen_timer = duration_ms;
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// The multi-use "B" block that flips every enemy when punched from below
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosiveBlock {
    pub pos: Vec2,
    pub size: Vec2,
    pub initial_height: f32,
    pub total_uses: u32,
    pub uses_left: u32,
    /// Remaining no-repeat window (ms)
    pub cooldown: f32,
}

impl ExplosiveBlock {
    pub fn new(total_uses: u32) -> Self {
        Self {
            pos: Vec2::new(GAME_WIDTH / 2.0 - BLOCK_SIZE / 2.0, Self::home_y()),
            size: Vec2::splat(BLOCK_SIZE),
            initial_height: BLOCK_SIZE,
            total_uses,
            uses_left: total_uses,
            cooldown: 0.0,
        }
    }

    fn home_y() -> f32 {
        GAME_HEIGHT - BLOCK_BOTTOM_GAP
    }

    /// Still interactive (and drawn)
    pub fn is_active(&self) -> bool {
        self.uses_left > 0
    }

    pub fn update(&mut self) {
        if self.cooldown > 0.0 {
            self.cooldown -= TICK_MS;
        }
    }

    /// Punch the block; returns true if the hit took effect
    ///
    /// Every enemy gets flipped and the block flattens by one step while the
    /// bottom edge stays where it is.
    pub fn hit(
        &mut self,
        enemies: &mut [Enemy],
        particles: &mut Particles,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) -> bool {
        if self.uses_left == 0 || self.cooldown > 0.0 {
            return false;
        }
        self.uses_left -= 1;
        self.cooldown = tuning.block_cooldown_ms;

        for enemy in enemies.iter_mut() {
            enemy.flip(tuning);
        }
        particles.burst(
            BLOCK_PARTICLES,
            Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y),
            Sprite::Blast,
            rng,
        );

        let flatten = self.initial_height / self.total_uses as f32;
        self.size.y -= flatten;
        self.pos.y += flatten;
        log::debug!("Explosive block hit, {} uses left", self.uses_left);
        true
    }

    /// Restore uses and height for a new level (x is unchanged)
    pub fn reset(&mut self) {
        self.uses_left = self.total_uses;
        self.size.y = self.initial_height;
        self.pos.y = Self::home_y();
    }
}
