//! Level Snake - a grid snake game with levels, obstacles and a terminal UI
//!
//! This library provides:
//! - Core game logic and the scheduler seam (game module)
//! - Keyboard and mouse input mapping (input module)
//! - TUI rendering (render module)
//! - Per-session play clock (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
