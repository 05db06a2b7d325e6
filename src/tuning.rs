//! Data-driven game balance
//!
//! Every value that shapes how the game plays lives here so it can be
//! tweaked from a JSON file without touching the simulation. Geometry that
//! levels are built around stays in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance knobs read by the simulation each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration added to vertical velocity every tick
    pub gravity: f32,

    // === Player ===
    /// Horizontal speed while a direction is held
    pub player_speed: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub player_jump: f32,
    /// Lives at the start of a game
    pub starting_lives: u32,
    /// Score step between bonus lives
    pub extra_life_score: u64,
    /// Velocity kept per tick when sliding on ice with no input
    pub ice_friction: f32,

    // === Enemies ===
    /// Base patrol speed (variants scale this)
    pub enemy_speed: f32,
    /// How long a flipped enemy stays vulnerable (ms)
    pub flip_duration_ms: f32,
    /// Flash time after a tough enemy absorbs a hit (ms)
    pub hit_flash_ms: f32,

    // === Hazards ===
    /// Hits the explosive block takes before disappearing
    pub block_uses: u32,
    /// Dead time after each block hit (ms)
    pub block_cooldown_ms: f32,
    /// How long a bomber leaves its platform frozen (ms)
    pub freeze_duration_ms: f32,

    // === Flow ===
    /// Length of the "LEVEL N" card between levels (ms)
    pub level_transition_ms: f32,

    // === Effects ===
    /// Oldest particles are dropped past this count
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,

            player_speed: 5.0,
            player_jump: -15.0,
            starting_lives: 3,
            extra_life_score: 20_000,
            ice_friction: 0.97,

            enemy_speed: 1.5,
            flip_duration_ms: 5000.0,
            hit_flash_ms: 300.0,

            block_uses: 3,
            block_cooldown_ms: 500.0,
            freeze_duration_ms: 7000.0,

            level_transition_ms: 1500.0,

            max_particles: 1024,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults
    ///
    /// Keys missing from the file keep their default value.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("No tuning file at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }

    /// Write tuning as pretty JSON (errors are logged, not returned)
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Could not write tuning to {}: {}", path.display(), e);
                } else {
                    log::info!("Tuning saved to {}", path.display());
                }
            }
            Err(e) => log::warn!("Could not serialize tuning: {}", e),
        }
    }
}
