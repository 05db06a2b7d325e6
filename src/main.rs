//! Draicor Bros entry point
//!
//! The native build has no window. It runs a short attract-mode session
//! through the same fixed-timestep loop a frontend would use and logs how
//! it went. Set `RUST_LOG=info` (or `debug`) to watch it.
//!
//! Environment:
//! - `DRAICOR_TUNING`: JSON file with game balance overrides
//! - `DRAICOR_HIGHSCORE`: JSON file the best score is kept in
//! - `DRAICOR_SEED`: RNG seed (defaults to the current time)

#[cfg(not(target_arch = "wasm32"))]
mod attract {
    use draicor_bros::sim::{Command, FixedStep, GameEvent, GameMode, SIM_DT, TickInput, World, jump_command, tick};
    use draicor_bros::{HighScore, Tuning};

    /// Rendered frames to simulate (about two minutes at 60 fps)
    const FRAMES: u32 = 60 * 120;
    /// Frames between attract-mode jumps
    const JUMP_EVERY: u32 = 40;

    fn seed() -> u64 {
        if let Some(seed) = std::env::var("DRAICOR_SEED").ok().and_then(|s| s.parse().ok()) {
            return seed;
        }
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        let tuning = match std::env::var("DRAICOR_TUNING") {
            Ok(path) => Tuning::load(path),
            Err(_) => Tuning::default(),
        };
        let high_score = match std::env::var("DRAICOR_HIGHSCORE") {
            Ok(path) => HighScore::load(path),
            Err(_) => HighScore::in_memory(0),
        };

        let seed = seed();
        log::info!("Attract mode, seed {}", seed);
        let mut world = World::new(seed, tuning, high_score);
        let mut clock = FixedStep::new();

        // Player one runs right and hops periodically
        let mut input = TickInput::default();
        input.held.press("d");
        input.commands.push(Command::SelectOnePlayer);
        input.commands.push(Command::Start);

        let mut kills = 0u32;
        for frame in 0..FRAMES {
            if frame % JUMP_EVERY == 0 {
                input.commands.extend(jump_command(&world, "w"));
            }

            // Jitter the frame time a little like a real display would
            let elapsed = if frame % 3 == 0 { SIM_DT * 1.5 } else { SIM_DT * 0.75 };
            for _ in 0..clock.advance(elapsed) {
                tick(&mut world, &input);
                // One-shot commands are consumed by the first tick
                input.commands.clear();
            }

            for event in world.drain_events() {
                match event {
                    GameEvent::EnemyKilled { .. } => kills += 1,
                    GameEvent::LevelStarted { level } => log::info!("Reached level {}", level),
                    GameEvent::GameOver => log::info!("Game over after {} frames", frame),
                    _ => {}
                }
            }

            if world.mode == GameMode::GameOver {
                break;
            }
        }

        let score = world.player(1).map(|p| p.score).unwrap_or(0);
        log::info!(
            "Session ended on level {} with score {} ({} kills, best {})",
            world.level,
            score,
            kills,
            world.high_score.best
        );
        println!(
            "level {} | score {} | kills {} | high score {}",
            world.level, score, kills, world.high_score.best
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Draicor Bros (native) starting...");
    attract::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web frontends drive the library directly
}
