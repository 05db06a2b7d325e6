//! Game state and core simulation types
//!
//! The [`World`] owns every entity collection. Only the tick mutates it;
//! frontends read it back for drawing and HUD text.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::particle::Particles;
use super::platform::{ExplosiveBlock, Platform};
use super::player::Player;
use crate::{HighScore, Tuning};

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, choosing one or two players
    PlayerSelect,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// "LEVEL N" card between levels
    LevelTransition,
    /// Everyone is out of lives
    GameOver,
}

/// What an entity looks like; glyph choice is up to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    /// Player 1
    Robot,
    /// Player 2
    Astronaut,
    /// Basic enemy
    Invader,
    /// Fast enemy
    Ghost,
    /// Jumping enemy
    Alien,
    /// Ice bomber
    Bomb,
    /// Tough enemy
    Ogre,
    /// Tough enemy after absorbing a hit
    OgreStunned,
    /// Explosive block debris
    Blast,
}

/// Something the audio/effects layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted { players: u8 },
    LevelStarted { level: u32 },
    /// A player bumped an enemy from below (Tough enemies may only be stunned)
    EnemyHit { player: u8, flipped: bool },
    EnemyKilled { player: u8 },
    BomberDetonated { platform: usize },
    BlockHit { uses_left: u32 },
    PlayerDied { player: u8, lives_left: u32 },
    ExtraLife { player: u8 },
    NewHighScore { score: u64 },
    LevelCleared { level: u32 },
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    pub mode: GameMode,
    /// Current level (1-based)
    pub level: u32,
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    /// Floor first, then the level layout
    pub platforms: Vec<Platform>,
    pub block: ExplosiveBlock,
    pub particles: Particles,
    /// Remaining "LEVEL N" display time (ms)
    pub level_transition_timer: f32,
    /// Highlighted option on the title screen (1 or 2)
    pub player_select: u8,
    pub high_score: HighScore,
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Simulation ticks run while a game was in progress
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl World {
    /// Create a world on the title screen
    pub fn new(seed: u64, tuning: Tuning, high_score: HighScore) -> Self {
        Self {
            mode: GameMode::PlayerSelect,
            level: 1,
            players: Vec::new(),
            enemies: Vec::new(),
            platforms: Vec::new(),
            block: ExplosiveBlock::new(tuning.block_uses),
            particles: Particles::with_cap(tuning.max_particles),
            level_transition_timer: 0.0,
            player_select: 1,
            high_score,
            tuning,
            seed,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Begin a fresh game with one or two players
    pub fn start_game(&mut self, num_players: u8) {
        let num_players = num_players.clamp(1, 2);
        self.level = 1;
        self.players = (1..=num_players).map(|id| Player::new(id, &self.tuning)).collect();
        self.block = ExplosiveBlock::new(self.tuning.block_uses);
        self.particles.clear();
        self.time_ticks = 0;
        log::info!("Starting {}-player game", num_players);
        self.emit(GameEvent::GameStarted { players: num_players });

        super::level::setup_level(self);
        self.mode = GameMode::Playing;
    }

    /// Switch to game over once nobody is left standing
    pub fn check_game_over(&mut self) {
        if self.mode != GameMode::GameOver && self.all_players_dead() {
            log::info!("Game over at level {}", self.level);
            self.mode = GameMode::GameOver;
            self.emit(GameEvent::GameOver);
        }
    }

    pub fn all_players_dead(&self) -> bool {
        self.players.iter().all(|p| p.is_dead)
    }

    pub fn any_player_alive(&self) -> bool {
        self.players.iter().any(|p| !p.is_dead)
    }

    pub fn player(&self, id: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: u8) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
