//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Timing is left to a [`Scheduler`] supplied by the caller.

pub mod action;
pub mod config;
pub mod engine;
pub mod placement;
pub mod progression;
pub mod session;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Command, Direction};
pub use config::{ConfigError, GameConfig, MAX_TILE_COUNT, MIN_TILE_COUNT};
pub use engine::{GameEngine, TickInfo, TickOutcome};
pub use progression::{LevelUp, Progression};
pub use session::{GameSession, Scheduler};
pub use snapshot::GameSnapshot;
pub use state::{CollisionType, Food, GameState, GameStatus, Marker, Position, Segment, Snake};
