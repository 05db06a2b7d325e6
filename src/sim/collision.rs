//! Collision detection and response
//!
//! Runs once per tick after every entity has moved, so all decisions see
//! integrated positions. This is the only place entities act on each other.

use rand::Rng;

use super::enemy::Enemy;
use super::particle::Particles;
use super::platform::{ExplosiveBlock, Platform};
use super::player::Player;
use super::state::{GameEvent, World};
use crate::consts::*;
use crate::{HighScore, Tuning, rects_overlap, spans_overlap};

/// Resolve every interaction for this tick
pub fn resolve(world: &mut World) {
    let World {
        players,
        enemies,
        platforms,
        block,
        particles,
        high_score,
        tuning,
        rng,
        events,
        ..
    } = world;

    let mut someone_ran_out = false;
    for player in players.iter_mut() {
        if player.is_dead {
            continue;
        }
        let mut scores = Scoring {
            high_score: &mut *high_score,
            tuning: &*tuning,
            events: &mut *events,
        };
        resolve_surfaces(player, platforms, block, enemies, particles, &mut scores, rng);
        someone_ran_out |= resolve_enemy_contact(player, enemies, particles, &mut scores, rng);
    }

    resolve_enemy_pairs(enemies);

    if someone_ran_out {
        world.check_game_over();
    }
}

/// Everything needed to hand out points
struct Scoring<'a> {
    high_score: &'a mut HighScore,
    tuning: &'a Tuning,
    events: &'a mut Vec<GameEvent>,
}

impl Scoring<'_> {
    fn award(&mut self, player: &mut Player, points: u64) {
        let previous_best = self.high_score.best;
        if player.add_score(points, self.high_score, self.tuning) {
            self.events.push(GameEvent::ExtraLife { player: player.id });
        }
        if self.high_score.best > previous_best {
            self.events.push(GameEvent::NewHighScore {
                score: self.high_score.best,
            });
        }
    }
}

/// Standing on and bumping into platforms and the block
fn resolve_surfaces(
    player: &mut Player,
    platforms: &[Platform],
    block: &mut ExplosiveBlock,
    enemies: &mut [Enemy],
    particles: &mut Particles,
    scores: &mut Scoring,
    rng: &mut impl Rng,
) {
    // The block counts as ground only in a thin band at its top
    if block.is_active()
        && spans_overlap(player.pos.x, player.size.x, block.pos.x, block.size.x)
        && player.foot() >= block.pos.y
        && player.foot() <= block.pos.y + LANDING_TOLERANCE + player.vel.y
        && player.vel.y >= 0.0
    {
        player.pos.y = block.pos.y - player.size.y;
        player.vel.y = 0.0;
        player.on_ground = true;
    }

    let mut on_any_platform = player.on_ground;
    let mut on_ice = false;

    for platform in platforms {
        if spans_overlap(player.pos.x, player.size.x, platform.pos.x, platform.size.x)
            && player.foot() >= platform.pos.y
            && player.foot() <= platform.pos.y + platform.size.y + player.vel.y
            && player.vel.y >= 0.0
        {
            player.pos.y = platform.pos.y - player.size.y;
            player.vel.y = 0.0;
            on_any_platform = true;
            if platform.is_frozen {
                on_ice = true;
            }
            player.pos.x += platform.vx;
        }

        if spans_overlap(player.pos.x, player.size.x, platform.pos.x, platform.size.x)
            && player.pos.y > platform.pos.y
            && player.pos.y <= platform.pos.y + platform.size.y
            && player.vel.y < 0.0
        {
            player.pos.y = platform.pos.y + platform.size.y;
            player.vel.y = 0.0;
            bump_platform(player, platform, enemies, scores);
        }
    }

    player.on_ground = on_any_platform;
    player.on_frozen_platform = on_ice;

    if block.is_active()
        && spans_overlap(player.pos.x, player.size.x, block.pos.x, block.size.x)
        && player.pos.y > block.pos.y
        && player.pos.y <= block.pos.y + block.size.y
        && player.vel.y < 0.0
    {
        player.pos.y = block.pos.y + block.size.y;
        player.vel.y = 0.0;
        if block.hit(enemies, particles, rng, scores.tuning) {
            scores.events.push(GameEvent::BlockHit {
                uses_left: block.uses_left,
            });
        }
    }
}

/// A head bump flips enemies standing right above the impact
fn bump_platform(player: &mut Player, platform: &Platform, enemies: &mut [Enemy], scores: &mut Scoring) {
    let hit_center_x = player.center().x;
    for enemy in enemies.iter_mut() {
        let on_this_platform = (enemy.foot() - platform.pos.y).abs() < BUMP_TOLERANCE;
        let within_hit_range = enemy.pos.x < hit_center_x + BUMP_HALF_WIDTH
            && enemy.pos.x + enemy.size.x > hit_center_x - BUMP_HALF_WIDTH;

        if !enemy.is_flipped && on_this_platform && within_hit_range {
            let flipped = enemy.flip(scores.tuning);
            scores.events.push(GameEvent::EnemyHit {
                player: player.id,
                flipped,
            });
            scores.award(player, BUMP_POINTS);
        }
    }
}

/// Touching enemies: flipped ones die, upright ones kill
///
/// Returns true if the player lost their last life.
fn resolve_enemy_contact(
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    particles: &mut Particles,
    scores: &mut Scoring,
    rng: &mut impl Rng,
) -> bool {
    let mut ran_out = false;
    let mut killed: Vec<usize> = Vec::new();

    for (index, enemy) in enemies.iter().enumerate().rev() {
        if !rects_overlap(player.pos, player.size, enemy.pos, enemy.size) {
            continue;
        }
        if enemy.is_flipped {
            killed.push(index);
            particles.burst(ENEMY_KILL_PARTICLES, enemy.pos, enemy.sprite, rng);
            scores.events.push(GameEvent::EnemyKilled { player: player.id });
            scores.award(player, KILL_POINTS);
        } else if !player.is_dead {
            ran_out |= player.die(particles, rng);
            scores.events.push(GameEvent::PlayerDied {
                player: player.id,
                lives_left: player.lives,
            });
        }
    }

    // Indices were collected last-to-first, so removal keeps them valid
    for index in killed {
        enemies.remove(index);
    }
    ran_out
}

/// Grounded, upright enemies that bump into each other turn around
fn resolve_enemy_pairs(enemies: &mut [Enemy]) {
    for i in 0..enemies.len() {
        let (head, tail) = enemies.split_at_mut(i + 1);
        let e1 = &mut head[i];
        for e2 in tail.iter_mut() {
            if !rects_overlap(e1.pos, e1.size, e2.pos, e2.size) {
                continue;
            }
            if e1.is_flipped || e2.is_flipped || !e1.on_ground || !e2.on_ground {
                continue;
            }
            std::mem::swap(&mut e1.vel.x, &mut e2.vel.x);
            if e1.pos.x < e2.pos.x {
                e1.pos.x -= 1.0;
                e2.pos.x += 1.0;
            } else {
                e1.pos.x += 1.0;
                e2.pos.x -= 1.0;
            }
        }
    }
}
