//! Level layouts and enemy rosters

use glam::Vec2;
use rand::Rng;

use super::enemy::{Enemy, EnemyType};
use super::platform::Platform;
use super::state::{GameEvent, World};
use crate::Tuning;
use crate::consts::*;

/// Number of distinct platform arrangements
pub const LAYOUT_COUNT: u32 = 4;
/// Levels played on each arrangement before rotating
const LEVELS_PER_LAYOUT: u32 = 4;

/// Which arrangement a level uses
pub fn layout_index(level: u32) -> u32 {
    (level.saturating_sub(1) / LEVELS_PER_LAYOUT) % LAYOUT_COUNT
}

/// Platforms for a level, floor first
pub fn layout(level: u32) -> Vec<Platform> {
    let w = GAME_WIDTH;
    let mut platforms = vec![Platform::floor()];
    match layout_index(level) {
        0 => platforms.extend([
            Platform::new(0.0, 550.0, 250.0),
            Platform::new(w - 250.0, 550.0, 250.0),
            Platform::new(300.0, 400.0, 360.0),
            Platform::new(0.0, 250.0, 350.0),
            Platform::new(w - 350.0, 250.0, 350.0),
        ]),
        1 => platforms.extend([
            Platform::new(0.0, 580.0, 200.0),
            Platform::new(w - 200.0, 580.0, 200.0),
            Platform::new(250.0, 450.0, 150.0),
            Platform::new(w - 400.0, 450.0, 150.0),
            Platform::new(0.0, 300.0, 200.0),
            Platform::new(w - 200.0, 300.0, 200.0),
            Platform::new(300.0, 180.0, 360.0),
        ]),
        2 => platforms.extend([
            Platform::new(0.0, 550.0, 200.0),
            Platform::new(w - 200.0, 550.0, 200.0),
            Platform::new(380.0, 400.0, 200.0).make_mobile(1.0, 100.0),
            Platform::new(0.0, 250.0, 300.0),
            Platform::new(w - 300.0, 250.0, 300.0),
        ]),
        _ => platforms.extend([
            Platform::new(0.0, 580.0, 150.0).make_mobile(1.2, 80.0),
            Platform::new(w - 150.0, 580.0, 150.0).make_mobile(-1.2, 80.0),
            Platform::new(300.0, 420.0, 360.0),
            Platform::new(0.0, 250.0, 350.0).make_mobile(1.5, 150.0),
            Platform::new(w - 350.0, 250.0, 350.0).make_mobile(-1.5, 150.0),
        ]),
    }
    platforms
}

/// Enemies on a level (stops growing at the difficulty cap)
pub fn enemy_count(level: u32) -> usize {
    2 + (level.min(MAX_DIFFICULTY_LEVEL) / 2) as usize
}

/// Map a uniform roll in [0, 1) to an enemy type
///
/// Bands are cumulative and each one only opens at its level.
pub fn roll_enemy_type(level: u32, roll: f32) -> EnemyType {
    let level = level.min(MAX_DIFFICULTY_LEVEL);
    if level >= 25 && roll < 0.15 {
        EnemyType::Tough
    } else if level >= 20 && roll < 0.30 {
        EnemyType::IceBomber
    } else if level >= 10 && roll < 0.50 {
        EnemyType::Jumping
    } else if level >= 5 && roll < 0.75 {
        EnemyType::Fast
    } else {
        EnemyType::Basic
    }
}

/// Build one enemy of the rolled type
///
/// Bombers go on a random static, non-floor platform that has no bomber
/// yet; with none left a basic enemy takes the slot.
pub fn spawn_enemy(
    ty: EnemyType,
    spawn: Vec2,
    platforms: &[Platform],
    enemies: &[Enemy],
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Enemy {
    if ty != EnemyType::IceBomber {
        return Enemy::spawn(ty, spawn, tuning, rng);
    }

    let eligible: Vec<usize> = platforms
        .iter()
        .enumerate()
        .filter(|(i, p)| {
            !p.is_floor && !p.is_mobile() && !enemies.iter().any(|e| e.bomber_platform() == Some(*i))
        })
        .map(|(i, _)| i)
        .collect();

    if eligible.is_empty() {
        return Enemy::spawn(EnemyType::Basic, spawn, tuning, rng);
    }
    let index = eligible[rng.random_range(0..eligible.len())];
    Enemy::ice_bomber(index, &platforms[index], rng)
}

/// Replace platforms and enemies for `world.level`
pub fn setup_level(world: &mut World) {
    let level = world.level;
    world.platforms = layout(level);
    world.enemies.clear();
    world.block.reset();

    let count = enemy_count(level);
    for _ in 0..count {
        let spawn = SPAWN_POINTS[world.rng.random_range(0..SPAWN_POINTS.len())];
        let roll: f32 = world.rng.random();
        let ty = roll_enemy_type(level, roll);
        let enemy = spawn_enemy(ty, spawn, &world.platforms, &world.enemies, &world.tuning, &mut world.rng);
        world.enemies.push(enemy);
    }

    log::info!(
        "Level {}: layout {}, {} enemies",
        level,
        layout_index(level),
        world.enemies.len()
    );
    world.emit(GameEvent::LevelStarted { level });
}
