use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Smallest grid that leaves room for the starting snake and obstacles
pub const MIN_TILE_COUNT: usize = 8;

/// Largest grid a terminal board can show
pub const MAX_TILE_COUNT: usize = 255;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the square grid, in cells
    pub tile_count: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Speed
    /// Tick interval at level 1, in milliseconds
    pub initial_tick_ms: u64,
    /// Amount the tick interval shrinks on every level-up
    pub tick_step_ms: u64,
    /// Floor for the tick interval
    pub min_tick_ms: u64,

    // Progression
    /// Score needed to leave level 1
    pub first_level_score: u32,
    /// Amount the level target grows after each level-up
    pub level_score_increment: u32,
    /// Obstacles never spawn within this Manhattan distance of the head
    pub obstacle_safe_distance: u32,

    // Placement
    /// Random draws tried before falling back to enumerating free cells
    pub placement_attempts: usize,
    /// Number of distinct food markers handed to the renderer
    pub food_markers: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: 20,
            initial_snake_length: 3,
            initial_tick_ms: 120,
            tick_step_ms: 10,
            min_tick_ms: 50,
            first_level_score: 5,
            level_score_increment: 5,
            obstacle_safe_distance: 4,
            placement_attempts: 64,
            food_markers: 4,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(tile_count: usize) -> Self {
        Self {
            tile_count,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_count < MIN_TILE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "tile_count must be at least {MIN_TILE_COUNT}, got {}",
                self.tile_count
            )));
        }
        if self.tile_count > MAX_TILE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "tile_count must be at most {MAX_TILE_COUNT}, got {}",
                self.tile_count
            )));
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::Invalid(
                "initial_snake_length must be at least 1".to_string(),
            ));
        }
        let head_x = self.tile_count.saturating_mul(3) / 5;
        if self.initial_snake_length > head_x + 1 {
            return Err(ConfigError::Invalid(format!(
                "a snake of length {} does not fit a {} grid",
                self.initial_snake_length, self.tile_count
            )));
        }
        if self.min_tick_ms == 0 {
            return Err(ConfigError::Invalid("min_tick_ms must be positive".to_string()));
        }
        if self.min_tick_ms > self.initial_tick_ms {
            return Err(ConfigError::Invalid(format!(
                "min_tick_ms ({}) exceeds initial_tick_ms ({})",
                self.min_tick_ms, self.initial_tick_ms
            )));
        }
        if self.first_level_score == 0 || self.level_score_increment == 0 {
            return Err(ConfigError::Invalid(
                "level score thresholds must be positive".to_string(),
            ));
        }
        if self.food_markers == 0 {
            return Err(ConfigError::Invalid("food_markers must be positive".to_string()));
        }
        Ok(())
    }

    /// Head cell of the starting snake; the body extends to its left
    pub fn start_head(&self) -> (i32, i32) {
        let x = i32::try_from(self.tile_count.saturating_mul(3) / 5).unwrap_or(i32::MAX);
        let y = i32::try_from(self.tile_count / 2).unwrap_or(i32::MAX);
        (x, y)
    }

    pub fn initial_tick(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }
}
