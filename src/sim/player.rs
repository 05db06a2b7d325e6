//! Player characters

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::Particles;
use super::state::Sprite;
use crate::Tuning;
use crate::consts::*;
use crate::highscores::HighScore;

/// Ice velocity below this snaps to a stop
const SLIDE_STOP: f32 = 0.1;

/// Key names a player responds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: String,
    pub right: String,
    pub jump: String,
}

impl Controls {
    /// WASD layout
    pub fn player_one() -> Self {
        Self {
            left: "a".into(),
            right: "d".into(),
            jump: "w".into(),
        }
    }

    /// Arrow keys
    pub fn player_two() -> Self {
        Self {
            left: "arrowleft".into(),
            right: "arrowright".into(),
            jump: "arrowup".into(),
        }
    }

    /// Whether a pressed key is this player's jump key
    pub fn is_jump(&self, key: &str) -> bool {
        self.jump.eq_ignore_ascii_case(key)
    }
}

/// Snapshot of currently held keys (lower-case names)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_lowercase());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for InputState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut input = Self::new();
        for key in iter {
            input.press(key.as_ref());
        }
        input
    }
}

/// A player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// 1 or 2
    pub id: u8,
    pub controls: Controls,
    pub sprite: Sprite,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Standing on ice this tick
    pub on_frozen_platform: bool,
    pub is_dead: bool,
    pub score: u64,
    pub lives: u32,
    /// Score at which the next bonus life is granted
    pub next_extra_life_score: u64,
}

impl Player {
    pub fn new(id: u8, tuning: &Tuning) -> Self {
        let (controls, sprite, offset) = if id == 1 {
            (Controls::player_one(), Sprite::Robot, -PLAYER_START_OFFSET)
        } else {
            (Controls::player_two(), Sprite::Astronaut, PLAYER_START_OFFSET)
        };
        Self {
            id,
            controls,
            sprite,
            pos: Vec2::new(
                GAME_WIDTH / 2.0 - PLAYER_SIZE / 2.0 + offset,
                GAME_HEIGHT - PLAYER_SIZE - 50.0,
            ),
            size: Vec2::splat(PLAYER_SIZE),
            vel: Vec2::ZERO,
            on_ground: false,
            on_frozen_platform: false,
            is_dead: false,
            score: 0,
            lives: tuning.starting_lives,
            next_extra_life_score: tuning.extra_life_score,
        }
    }

    /// Where a player reappears after losing a life
    pub fn respawn_position() -> Vec2 {
        Vec2::new(GAME_WIDTH / 2.0 - PLAYER_SIZE / 2.0, GAME_HEIGHT - PLAYER_SIZE - 100.0)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn foot(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Move, wrap and fall; ground flags are left for collision to set
    pub fn update(&mut self, input: &InputState, tuning: &Tuning) {
        if self.is_dead {
            return;
        }

        let left = input.is_held(&self.controls.left);
        let right = input.is_held(&self.controls.right);

        if self.on_frozen_platform && !left && !right {
            self.vel.x *= tuning.ice_friction;
            if self.vel.x.abs() < SLIDE_STOP {
                self.vel.x = 0.0;
            }
        } else {
            self.vel.x = 0.0;
            if left {
                self.vel.x = -tuning.player_speed;
            }
            if right {
                self.vel.x = tuning.player_speed;
            }
        }

        self.pos.x += self.vel.x;
        if self.pos.x < -self.size.x {
            self.pos.x = GAME_WIDTH;
        }
        if self.pos.x > GAME_WIDTH {
            self.pos.x = -self.size.x;
        }

        self.vel.y += tuning.gravity;
        self.pos.y += self.vel.y;
        self.on_ground = false;
        self.on_frozen_platform = false;
    }

    /// Jump if standing on something
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.on_ground && !self.is_dead {
            self.vel.y = tuning.player_jump;
            true
        } else {
            false
        }
    }

    /// Lose a life; returns true when this was the last one
    pub fn die(&mut self, particles: &mut Particles, rng: &mut impl Rng) -> bool {
        if self.is_dead {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        particles.burst(PLAYER_DEATH_PARTICLES, self.center(), self.sprite, rng);

        if self.lives == 0 {
            self.is_dead = true;
            log::info!("Player {} is out of lives", self.id);
            true
        } else {
            self.pos = Self::respawn_position();
            self.vel = Vec2::ZERO;
            false
        }
    }

    /// Add points; returns true if a bonus life was granted
    pub fn add_score(&mut self, points: u64, high_score: &mut HighScore, tuning: &Tuning) -> bool {
        self.score += points;
        let mut extra_life = false;
        if self.score >= self.next_extra_life_score {
            self.lives += 1;
            self.next_extra_life_score += tuning.extra_life_score;
            extra_life = true;
            log::debug!("Player {} earned an extra life ({} left)", self.id, self.lives);
        }
        high_score.submit(self.score);
        extra_life
    }
}
