//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod enemy;
pub mod level;
pub mod particle;
pub mod platform;
pub mod player;
pub mod state;
pub mod tick;

pub use clock::{FixedStep, SIM_DT};
pub use enemy::{Enemy, EnemyKind, EnemyStep, EnemyType};
pub use level::setup_level;
pub use particle::{Particle, Particles};
pub use platform::{ExplosiveBlock, Platform};
pub use player::{Controls, InputState, Player};
pub use state::{GameEvent, GameMode, Sprite, World};
pub use tick::{Command, TickInput, apply_command, jump_command, tick};
