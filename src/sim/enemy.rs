//! Enemies
//!
//! Every enemy shares the same body (position, flip state, timers) and
//! carries a variant payload that decides how it patrols and how it reacts
//! to being flipped.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::platform::Platform;
use super::state::Sprite;
use crate::Tuning;
use crate::consts::*;
use crate::spans_overlap;

/// Upward pop when an enemy gets flipped
const FLIP_POP: f32 = -5.0;
/// Smaller pop when a tough enemy absorbs a hit
const TOUGH_HIT_POP: f32 = -3.0;
/// Jumping enemy impulse
const ENEMY_JUMP: f32 = -8.0;
/// A tough enemy needs this many hits before it flips
const TOUGH_HITS: u32 = 2;
/// Bombers flipped with more time left than this detonate after it
const BOMBER_FUSE_MS: f32 = 100.0;

/// Enemy type without state, used when picking the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    Basic,
    Fast,
    Jumping,
    IceBomber,
    Tough,
}

/// Variant-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks at base speed
    Basic,
    /// Walks at 1.8x base speed
    Fast,
    /// Hops whenever the cooldown (in ticks) runs out
    Jumping { jump_cooldown: i32 },
    /// Sits on a platform and detonates when the timer (ms) runs out
    IceBomber { timer: f32, platform: usize },
    /// Takes two hits to flip
    Tough { hits_left: u32 },
}

impl EnemyKind {
    pub fn enemy_type(&self) -> EnemyType {
        match self {
            EnemyKind::Basic => EnemyType::Basic,
            EnemyKind::Fast => EnemyType::Fast,
            EnemyKind::Jumping { .. } => EnemyType::Jumping,
            EnemyKind::IceBomber { .. } => EnemyType::IceBomber,
            EnemyKind::Tough { .. } => EnemyType::Tough,
        }
    }
}

/// What happened to an enemy during its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStep {
    Alive,
    /// A bomber blew up; the caller removes it and freezes its platform
    Detonated { platform: usize },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub sprite: Sprite,
    pub is_flipped: bool,
    /// Time until the enemy rights itself (ms)
    pub flip_timer: f32,
    /// Remaining hit flash (ms)
    pub hit_animation_timer: f32,
    pub on_ground: bool,
    pub kind: EnemyKind,
}

impl Enemy {
    fn with_body(pos: Vec2, size: f32, sprite: Sprite, vx: f32, kind: EnemyKind) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
            vel: Vec2::new(vx, 0.0),
            sprite,
            is_flipped: false,
            flip_timer: 0.0,
            hit_animation_timer: 0.0,
            on_ground: false,
            kind,
        }
    }

    /// Spawn a walking enemy facing a random direction
    ///
    /// Bombers need a platform and are built with [`Enemy::ice_bomber`];
    /// asking for one here yields a basic enemy.
    pub fn spawn(ty: EnemyType, pos: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let speed = tuning.enemy_speed * dir;
        match ty {
            EnemyType::Basic | EnemyType::IceBomber => {
                Self::with_body(pos, ENEMY_SIZE, Sprite::Invader, speed, EnemyKind::Basic)
            }
            EnemyType::Fast => {
                Self::with_body(pos, ENEMY_SIZE, Sprite::Ghost, speed * 1.8, EnemyKind::Fast)
            }
            EnemyType::Jumping => Self::with_body(
                pos,
                ENEMY_SIZE,
                Sprite::Alien,
                speed * 0.8,
                EnemyKind::Jumping {
                    jump_cooldown: rng.random_range(80..=200),
                },
            ),
            EnemyType::Tough => Self::with_body(
                pos,
                TOUGH_ENEMY_SIZE,
                Sprite::Ogre,
                speed * 0.7,
                EnemyKind::Tough {
                    hits_left: TOUGH_HITS,
                },
            ),
        }
    }

    /// A stationary bomber sitting on `platforms[index]`
    pub fn ice_bomber(index: usize, platform: &Platform, rng: &mut impl Rng) -> Self {
        let mut bomber = Self::with_body(
            Vec2::ZERO,
            ENEMY_SIZE,
            Sprite::Bomb,
            0.0,
            EnemyKind::IceBomber {
                timer: rng.random_range(3000..=5000) as f32,
                platform: index,
            },
        );
        bomber.pos = Vec2::new(
            platform.center_x() - bomber.size.x / 2.0,
            platform.pos.y - bomber.size.y,
        );
        bomber
    }

    pub fn enemy_type(&self) -> EnemyType {
        self.kind.enemy_type()
    }

    /// Platform a bomber is attached to
    pub fn bomber_platform(&self) -> Option<usize> {
        match self.kind {
            EnemyKind::IceBomber { platform, .. } => Some(platform),
            _ => None,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn foot(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Advance one tick
    pub fn update(&mut self, platforms: &[Platform], tuning: &Tuning, rng: &mut impl Rng) -> EnemyStep {
        self.update_body(platforms, tuning, rng);

        match &mut self.kind {
            EnemyKind::Basic | EnemyKind::Fast | EnemyKind::Tough { .. } => {}
            EnemyKind::Jumping { jump_cooldown } => {
                *jump_cooldown -= 1;
                if self.on_ground && *jump_cooldown <= 0 && !self.is_flipped {
                    self.vel.y = ENEMY_JUMP;
                    self.on_ground = false;
                    *jump_cooldown = rng.random_range(100..=300);
                }
            }
            EnemyKind::IceBomber { timer, platform } => {
                *timer -= TICK_MS;
                if *timer <= 0.0 && !self.is_flipped {
                    return EnemyStep::Detonated { platform: *platform };
                }
                if let Some(p) = platforms.get(*platform) {
                    self.pos.x = p.center_x() - self.size.x / 2.0;
                }
                return EnemyStep::Alive;
            }
        }

        if !self.is_flipped {
            self.pos.x += self.vel.x;
        }
        EnemyStep::Alive
    }

    /// Timers, off-screen respawn, gravity and landing shared by all variants
    fn update_body(&mut self, platforms: &[Platform], tuning: &Tuning, rng: &mut impl Rng) {
        if self.hit_animation_timer > 0.0 {
            self.hit_animation_timer -= TICK_MS;
        }

        if self.is_flipped {
            self.flip_timer -= TICK_MS;
            if self.flip_timer <= 0.0 {
                self.is_flipped = false;
                self.pos.y -= UNFLIP_POP;
            }
        }

        if self.pos.x + self.size.x < 0.0 || self.pos.x > GAME_WIDTH {
            self.respawn(rng);
        }

        self.vel.y += tuning.gravity;
        self.pos.y += self.vel.y;
        self.on_ground = false;

        for p in platforms {
            let foot = self.foot();
            if spans_overlap(self.pos.x, self.size.x, p.pos.x, p.size.x)
                && foot >= p.pos.y
                && foot <= p.pos.y + p.size.y + LANDING_TOLERANCE
                && self.vel.y >= 0.0
            {
                self.pos.y = p.pos.y - self.size.y;
                self.vel.y = 0.0;
                self.on_ground = true;
                if !p.is_floor {
                    self.pos.x += p.vx;
                }
            }
        }
    }

    /// Teleport to a random spawn point (horizontal velocity is kept)
    pub fn respawn(&mut self, rng: &mut impl Rng) {
        let spawn = SPAWN_POINTS[rng.random_range(0..SPAWN_POINTS.len())];
        self.pos = spawn;
        self.vel.y = 0.0;
    }

    /// React to a hit from below or the explosive block
    ///
    /// Returns true if the enemy ended up flipped by this call.
    pub fn flip(&mut self, tuning: &Tuning) -> bool {
        match &mut self.kind {
            EnemyKind::IceBomber { timer, .. } => {
                *timer = timer.min(BOMBER_FUSE_MS);
                false
            }
            EnemyKind::Tough { hits_left } => {
                if self.is_flipped {
                    return false;
                }
                *hits_left = hits_left.saturating_sub(1);
                self.vel.y = TOUGH_HIT_POP;
                if *hits_left == 0 {
                    self.flip_over(tuning.flip_duration_ms)
                } else {
                    self.hit_animation_timer = tuning.hit_flash_ms;
                    self.sprite = Sprite::OgreStunned;
                    false
                }
            }
            _ => self.flip_over(tuning.flip_duration_ms),
        }
    }

    fn flip_over(&mut self, duration_ms: f32) -> bool {
        if self.is_flipped {
            return false;
        }
        self.is_flipped = true;
        self.flip_timer = duration_ms;
        self.vel.y = FLIP_POP;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn ledge() -> Vec<Platform> {
        vec![Platform::floor(), Platform::new(300.0, 400.0, 360.0)]
    }

    #[test]
    fn test_tough_enemy_takes_two_hits() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut e = Enemy::spawn(EnemyType::Tough, Vec2::new(100.0, 100.0), &tuning, &mut rng);
        assert_eq!(e.size, Vec2::splat(40.0));

        assert!(!e.flip(&tuning));
        assert_eq!(e.kind, EnemyKind::Tough { hits_left: 1 });
        assert!(!e.is_flipped);
        assert_eq!(e.vel.y, -3.0);
        assert_eq!(e.hit_animation_timer, 300.0);
        assert_eq!(e.sprite, Sprite::OgreStunned);

        assert!(e.flip(&tuning));
        assert_eq!(e.kind, EnemyKind::Tough { hits_left: 0 });
        assert!(e.is_flipped);
        assert_eq!(e.flip_timer, 5000.0);

        // Already flipped: no further effect
        assert!(!e.flip(&tuning));
        assert_eq!(e.kind, EnemyKind::Tough { hits_left: 0 });
    }

    #[test]
    fn test_bomber_flip_shortens_fuse() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let platforms = ledge();
        let mut bomber = Enemy::ice_bomber(1, &platforms[1], &mut rng);

        bomber.kind = EnemyKind::IceBomber { timer: 4000.0, platform: 1 };
        assert!(!bomber.flip(&tuning));
        assert_eq!(bomber.kind, EnemyKind::IceBomber { timer: 100.0, platform: 1 });
        assert!(!bomber.is_flipped);

        bomber.kind = EnemyKind::IceBomber { timer: 50.0, platform: 1 };
        bomber.flip(&tuning);
        assert_eq!(bomber.kind, EnemyKind::IceBomber { timer: 50.0, platform: 1 });
    }

    #[test]
    fn test_bomber_sits_centered_and_detonates() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let platforms = ledge();
        let mut bomber = Enemy::ice_bomber(1, &platforms[1], &mut rng);
        assert_eq!(bomber.pos, Vec2::new(300.0 + 180.0 - 18.0, 400.0 - 36.0));
        match bomber.kind {
            EnemyKind::IceBomber { timer, .. } => assert!((3000.0..=5000.0).contains(&timer)),
            _ => panic!("expected a bomber"),
        }

        assert_eq!(bomber.update(&platforms, &tuning, &mut rng), EnemyStep::Alive);
        assert!(bomber.on_ground);
        assert_eq!(bomber.pos.x, 462.0);

        bomber.flip(&tuning);
        let mut step = EnemyStep::Alive;
        for _ in 0..7 {
            step = bomber.update(&platforms, &tuning, &mut rng);
            if step != EnemyStep::Alive {
                break;
            }
        }
        assert_eq!(step, EnemyStep::Detonated { platform: 1 });
    }

    #[test]
    fn test_unflip_after_duration() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let platforms = ledge();
        let mut e = Enemy::spawn(EnemyType::Basic, Vec2::new(400.0, 400.0 - 36.0), &tuning, &mut rng);
        e.flip(&tuning);
        let x = e.pos.x;

        for _ in 0..299 {
            e.update(&platforms, &tuning, &mut rng);
        }
        assert!(e.is_flipped);
        // Flipped enemies do not walk
        assert_eq!(e.pos.x, x);

        for _ in 0..2 {
            e.update(&platforms, &tuning, &mut rng);
        }
        assert!(!e.is_flipped);
    }

    #[test]
    fn test_lands_on_platform_and_rides_it() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let platforms = vec![Platform::new(300.0, 400.0, 360.0).make_mobile(1.0, 100.0)];
        let mut e = Enemy::spawn(EnemyType::Basic, Vec2::new(400.0, 364.0), &tuning, &mut rng);
        e.vel.x = 0.0;

        e.update(&platforms, &tuning, &mut rng);
        assert!(e.on_ground);
        assert_eq!(e.foot(), 400.0);
        assert_eq!(e.vel.y, 0.0);
        // Carried by the platform's speed
        assert_eq!(e.pos.x, 401.0);
    }

    #[test]
    fn test_offscreen_enemy_respawns_at_spawn_point() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut e = Enemy::spawn(EnemyType::Basic, Vec2::new(-50.0, 684.0), &tuning, &mut rng);
        e.on_ground = true;
        e.vel.y = 3.0;

        e.respawn(&mut rng);
        assert!(SPAWN_POINTS.contains(&e.pos));
        assert_eq!(e.vel.y, 0.0);

        // Through a full update: teleported, then one tick of fall and walk
        let mut e = Enemy::spawn(EnemyType::Basic, Vec2::new(-50.0, 684.0), &tuning, &mut rng);
        let vx = e.vel.x;
        e.update(&[], &tuning, &mut rng);
        assert!(SPAWN_POINTS.iter().any(|s| (s.x + vx - e.pos.x).abs() < 1e-4));
        assert!((e.pos.y - (60.0 + tuning.gravity)).abs() < 1e-4);
        assert_eq!(e.vel.y, tuning.gravity);
        assert_eq!(e.vel.x, vx);
    }

    #[test]
    fn test_jumping_enemy_hops_when_ready() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let platforms = ledge();
        let mut e = Enemy::spawn(EnemyType::Jumping, Vec2::new(400.0, 364.0), &tuning, &mut rng);
        match e.kind {
            EnemyKind::Jumping { jump_cooldown } => assert!((80..=200).contains(&jump_cooldown)),
            _ => panic!("expected a jumper"),
        }
        e.kind = EnemyKind::Jumping { jump_cooldown: 1 };

        e.update(&platforms, &tuning, &mut rng);
        assert_eq!(e.vel.y, -8.0);
        assert!(!e.on_ground);
        match e.kind {
            EnemyKind::Jumping { jump_cooldown } => assert!((100..=300).contains(&jump_cooldown)),
            _ => panic!("expected a jumper"),
        }
    }

    #[test]
    fn test_variant_speeds() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let cases = [
            (EnemyType::Basic, 1.5),
            (EnemyType::Fast, 2.7),
            (EnemyType::Jumping, 1.2),
            (EnemyType::Tough, 1.05),
        ];
        for (ty, speed) in cases {
            let e = Enemy::spawn(ty, Vec2::ZERO, &tuning, &mut rng);
            assert!((e.vel.x.abs() - speed).abs() < 1e-4, "{:?}", ty);
            assert_eq!(e.enemy_type(), ty);
        }
    }
}
