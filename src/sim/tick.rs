//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one 60 Hz frame. Countdown timers
//! lose [`TICK_MS`] per call no matter how much real time passed.

use super::collision;
use super::enemy::EnemyStep;
use super::level::setup_level;
use super::player::InputState;
use super::state::{GameEvent, GameMode, World};
use crate::consts::*;

/// One-shot actions from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start/confirm button: pause, resume, start a game, leave game over
    Start,
    /// Move the title-screen cursor to "1 PLAYER"
    SelectOnePlayer,
    /// Move the title-screen cursor to "2 PLAYERS"
    SelectTwoPlayers,
    /// Jump for the player with this id
    Jump(u8),
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys held down right now
    pub held: InputState,
    /// Presses since the previous tick, in order
    pub commands: Vec<Command>,
}

/// Translate a key press into the jump command of the player bound to it
pub fn jump_command(world: &World, key: &str) -> Option<Command> {
    world
        .players
        .iter()
        .find(|p| p.controls.is_jump(key))
        .map(|p| Command::Jump(p.id))
}

/// Advance the game by one tick
pub fn tick(world: &mut World, input: &TickInput) {
    for &command in &input.commands {
        apply_command(world, command);
    }

    match world.mode {
        GameMode::Playing => {
            world.time_ticks += 1;
            simulate(world, &input.held);
        }
        GameMode::LevelTransition => {
            world.time_ticks += 1;
            world.level_transition_timer -= TICK_MS;
            if world.level_transition_timer <= 0.0 {
                setup_level(world);
                world.mode = GameMode::Playing;
            }
        }
        GameMode::PlayerSelect | GameMode::Paused | GameMode::GameOver => {}
    }

    // Effects keep animating behind the pause and game over overlays
    if world.mode != GameMode::PlayerSelect {
        world.particles.update(world.tuning.gravity);
        world.particles.prune();
    }

    if world.mode == GameMode::Playing && world.enemies.is_empty() && world.any_player_alive() {
        log::info!("Level {} cleared", world.level);
        world.emit(GameEvent::LevelCleared { level: world.level });
        world.level += 1;
        world.level_transition_timer = world.tuning.level_transition_ms;
        world.mode = GameMode::LevelTransition;
    }
}

/// Handle a single button press according to the current mode
pub fn apply_command(world: &mut World, command: Command) {
    match (command, world.mode) {
        (Command::Start, GameMode::Playing) => {
            log::info!("Paused");
            world.mode = GameMode::Paused;
        }
        (Command::Start, GameMode::Paused) => {
            log::info!("Resumed");
            world.mode = GameMode::Playing;
        }
        (Command::Start, GameMode::PlayerSelect) => {
            let players = world.player_select;
            world.start_game(players);
        }
        (Command::Start, GameMode::GameOver) => {
            world.mode = GameMode::PlayerSelect;
        }
        (Command::SelectOnePlayer, GameMode::PlayerSelect) => world.player_select = 1,
        (Command::SelectTwoPlayers, GameMode::PlayerSelect) => world.player_select = 2,
        (Command::Jump(id), GameMode::Playing) => {
            let tuning = &world.tuning;
            if let Some(player) = world.players.iter_mut().find(|p| p.id == id) {
                player.jump(tuning);
            }
        }
        _ => {}
    }
}

/// Entity updates then collisions, in fixed order
fn simulate(world: &mut World, held: &InputState) {
    for player in world.players.iter_mut() {
        player.update(held, &world.tuning);
    }

    // Detonated bombers are removed after the scan so indices stay valid
    let mut detonated: Vec<(usize, usize)> = Vec::new();
    for (index, enemy) in world.enemies.iter_mut().enumerate() {
        if let EnemyStep::Detonated { platform } = enemy.update(&world.platforms, &world.tuning, &mut world.rng) {
            detonated.push((index, platform));
        }
    }
    for &(index, platform) in detonated.iter().rev() {
        let bomber = world.enemies.remove(index);
        world
            .particles
            .burst(BOMBER_PARTICLES, bomber.pos, bomber.sprite, &mut world.rng);
        if let Some(p) = world.platforms.get_mut(platform) {
            p.freeze(world.tuning.freeze_duration_ms);
        }
        log::debug!("Bomber detonated, platform {} frozen", platform);
        world.emit(GameEvent::BomberDetonated { platform });
    }

    for platform in world.platforms.iter_mut() {
        platform.update();
    }
    world.block.update();

    collision::resolve(world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Enemy, EnemyKind, EnemyType};
    use crate::sim::state::Sprite;
    use crate::{HighScore, Tuning};
    use glam::Vec2;

    fn world() -> World {
        World::new(12345, Tuning::default(), HighScore::in_memory(0))
    }

    fn press(command: Command) -> TickInput {
        TickInput {
            commands: vec![command],
            ..Default::default()
        }
    }

    #[test]
    fn test_title_to_playing() {
        let mut w = world();
        tick(&mut w, &TickInput::default());
        assert_eq!(w.mode, GameMode::PlayerSelect);

        tick(&mut w, &press(Command::SelectTwoPlayers));
        assert_eq!(w.player_select, 2);
        tick(&mut w, &press(Command::Start));
        assert_eq!(w.mode, GameMode::Playing);
        assert_eq!(w.players.len(), 2);
        assert_eq!(w.level, 1);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut w = world();
        w.start_game(1);
        tick(&mut w, &press(Command::Start));
        assert_eq!(w.mode, GameMode::Paused);

        let before: Vec<Vec2> = w.enemies.iter().map(|e| e.pos).collect();
        let player_before = w.players[0].pos;
        for _ in 0..30 {
            tick(&mut w, &TickInput::default());
        }
        let after: Vec<Vec2> = w.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(before, after);
        assert_eq!(w.players[0].pos, player_before);

        tick(&mut w, &press(Command::Start));
        assert_eq!(w.mode, GameMode::Playing);
    }

    #[test]
    fn test_particles_age_while_paused() {
        let mut w = world();
        w.start_game(1);
        w.particles.burst(5, Vec2::new(200.0, 200.0), Sprite::Blast, &mut w.rng);

        tick(&mut w, &press(Command::Start));
        assert_eq!(w.mode, GameMode::Paused);
        assert!(w.particles.items.iter().all(|p| p.life == 99.0));

        tick(&mut w, &TickInput::default());
        assert!(w.particles.items.iter().all(|p| p.life == 98.0));
    }

    #[test]
    fn test_particles_hold_on_title_screen() {
        let mut w = world();
        w.particles.burst(5, Vec2::new(200.0, 200.0), Sprite::Blast, &mut w.rng);
        let before: Vec<Vec2> = w.particles.items.iter().map(|p| p.pos).collect();

        for _ in 0..3 {
            tick(&mut w, &TickInput::default());
        }
        assert_eq!(w.mode, GameMode::PlayerSelect);
        assert!(w.particles.items.iter().all(|p| p.life == 100.0));
        let after: Vec<Vec2> = w.particles.items.iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_jump_key_maps_to_its_player() {
        let mut w = world();
        assert_eq!(jump_command(&w, "w"), None);

        w.start_game(2);
        assert_eq!(jump_command(&w, "w"), Some(Command::Jump(1)));
        assert_eq!(jump_command(&w, "ArrowUp"), Some(Command::Jump(2)));
        assert_eq!(jump_command(&w, "d"), None);
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut w = world();
        w.start_game(1);
        // Let the player settle on the floor
        for _ in 0..10 {
            tick(&mut w, &TickInput::default());
        }
        assert!(w.players[0].on_ground);

        // Pausing first swallows the jump
        let paused = TickInput {
            commands: vec![Command::Start, Command::Jump(1)],
            ..Default::default()
        };
        tick(&mut w, &paused);
        assert_eq!(w.mode, GameMode::Paused);
        assert_eq!(w.players[0].vel.y, 0.0);

        tick(&mut w, &press(Command::Start));
        tick(&mut w, &press(Command::Jump(1)));
        assert!(w.players[0].vel.y < 0.0);
        assert!(!w.players[0].on_ground);
    }

    #[test]
    fn test_clearing_level_runs_transition() {
        let mut w = world();
        w.start_game(1);
        w.enemies.clear();
        tick(&mut w, &TickInput::default());
        assert_eq!(w.mode, GameMode::LevelTransition);
        assert_eq!(w.level, 2);
        assert!(w.drain_events().contains(&GameEvent::LevelCleared { level: 1 }));

        // 1500 ms at 60 Hz is 90 ticks
        for _ in 0..89 {
            tick(&mut w, &TickInput::default());
        }
        assert_eq!(w.mode, GameMode::LevelTransition);
        for _ in 0..2 {
            tick(&mut w, &TickInput::default());
        }
        assert_eq!(w.mode, GameMode::Playing);
        assert_eq!(w.enemies.len(), 3);
    }

    #[test]
    fn test_transition_ignores_start() {
        let mut w = world();
        w.start_game(1);
        w.enemies.clear();
        tick(&mut w, &TickInput::default());
        tick(&mut w, &press(Command::Start));
        assert_eq!(w.mode, GameMode::LevelTransition);
    }

    #[test]
    fn test_game_over_back_to_title() {
        let mut w = world();
        w.start_game(1);
        w.players[0].lives = 1;
        let mut enemy = Enemy::spawn(EnemyType::Basic, w.players[0].pos, &w.tuning, &mut w.rng);
        enemy.vel.x = 0.0;
        w.enemies = vec![enemy];

        tick(&mut w, &TickInput::default());
        assert_eq!(w.mode, GameMode::GameOver);

        // Particles still animate under the overlay
        let life = w.particles.items[0].life;
        tick(&mut w, &TickInput::default());
        assert!(w.particles.items[0].life < life);

        tick(&mut w, &press(Command::Start));
        assert_eq!(w.mode, GameMode::PlayerSelect);
    }

    #[test]
    fn test_bomber_detonation_freezes_platform() {
        let mut w = world();
        w.start_game(1);
        let host = 3;
        let mut bomber = Enemy::ice_bomber(host, &w.platforms[host], &mut w.rng);
        bomber.kind = EnemyKind::IceBomber { timer: 10.0, platform: host };
        w.enemies = vec![bomber];
        // Keep the level from ending when the bomber goes
        let mut guard = Enemy::spawn(EnemyType::Basic, Vec2::new(40.0, 200.0), &w.tuning, &mut w.rng);
        guard.vel.x = 0.0;
        w.enemies.push(guard);
        w.drain_events();

        tick(&mut w, &TickInput::default());
        assert_eq!(w.enemies.len(), 1);
        assert!(w.platforms[host].is_frozen);
        assert!(w.particles.len() >= BOMBER_PARTICLES);
        assert!(w.drain_events().contains(&GameEvent::BomberDetonated { platform: host }));
    }

    #[test]
    fn test_determinism() {
        let mut w1 = world();
        let mut w2 = world();
        let mut input = TickInput::default();
        input.held.press("d");
        for w in [&mut w1, &mut w2] {
            w.start_game(1);
            for i in 0..600 {
                let mut frame = input.clone();
                if i % 45 == 0 {
                    frame.commands.push(Command::Jump(1));
                }
                tick(w, &frame);
            }
        }
        assert_eq!(w1.time_ticks, w2.time_ticks);
        assert_eq!(w1.players[0].pos, w2.players[0].pos);
        assert_eq!(w1.enemies.len(), w2.enemies.len());
    }
}
