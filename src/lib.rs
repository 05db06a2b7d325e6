//! Draicor Bros - a single-screen platformer for one or two players
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted best score
//!
//! Drawing and input wiring live outside this crate. A frontend feeds
//! [`sim::TickInput`] into [`sim::tick`] once per frame and reads the
//! [`sim::World`] back for rendering.

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Logical playfield size
    pub const GAME_WIDTH: f32 = 960.0;
    pub const GAME_HEIGHT: f32 = 720.0;

    /// The simulation assumes exactly 60 ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Milliseconds every countdown timer loses per tick
    pub const TICK_MS: f32 = 1000.0 / 60.0;
    /// Maximum ticks run for one rendered frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Where enemies enter (and re-enter after leaving the screen)
    pub const SPAWN_POINTS: [Vec2; 2] = [Vec2::new(150.0, 60.0), Vec2::new(GAME_WIDTH - 150.0, 60.0)];

    /// Player box
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Offset of each player's start position from the center
    pub const PLAYER_START_OFFSET: f32 = 50.0;

    /// Enemy boxes
    pub const ENEMY_SIZE: f32 = 36.0;
    pub const TOUGH_ENEMY_SIZE: f32 = 40.0;

    /// Platforms
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const FLOOR_HEIGHT: f32 = 40.0;

    /// Explosive block
    pub const BLOCK_SIZE: f32 = 50.0;
    pub const BLOCK_BOTTOM_GAP: f32 = 180.0;

    /// Slack below a platform top that still counts as landing on it
    pub const LANDING_TOLERANCE: f32 = 10.0;
    /// How close an enemy's feet must be to a bumped platform's top
    pub const BUMP_TOLERANCE: f32 = 10.0;
    /// Half-width of the strike zone above a player's head bump
    pub const BUMP_HALF_WIDTH: f32 = 20.0;

    /// Un-flip hop
    pub const UNFLIP_POP: f32 = 5.0;

    /// Particle bursts
    pub const PLAYER_DEATH_PARTICLES: usize = 50;
    pub const ENEMY_KILL_PARTICLES: usize = 20;
    pub const BOMBER_PARTICLES: usize = 40;
    pub const BLOCK_PARTICLES: usize = 50;

    /// Points
    pub const BUMP_POINTS: u64 = 50;
    pub const KILL_POINTS: u64 = 200;

    /// Enemy roster stops growing past this level
    pub const MAX_DIFFICULTY_LEVEL: u32 = 50;
}

/// Axis-aligned rectangle overlap (strict, touching edges do not count)
#[inline]
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Horizontal extent overlap only
#[inline]
pub fn spans_overlap(a_x: f32, a_width: f32, b_x: f32, b_width: f32) -> bool {
    a_x < b_x + b_width && a_x + a_width > b_x
}
