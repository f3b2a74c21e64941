use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    config::{ConfigError, GameConfig},
    placement::pick_free_cell,
    progression::Progression,
    snapshot::GameSnapshot,
    state::{CollisionType, Food, GameState, GameStatus, Marker, Position, Segment, Snake},
};

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// The level reached this tick, if the score crossed a threshold
    pub level_up: Option<u32>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Status after the tick
    pub status: GameStatus,
    /// Additional information about the tick
    pub info: TickInfo,
}

impl TickOutcome {
    /// Whether the loop driving the game should schedule another tick
    pub fn should_continue(&self) -> bool {
        self.status == GameStatus::Running
    }
}

/// The game engine that owns a game and applies its rules
pub struct GameEngine {
    config: GameConfig,
    progression: Progression,
    rng: StdRng,
    state: GameState,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose placements are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = Self::initial_state(&config);
        let mut engine = Self {
            progression: Progression::new(&config),
            config,
            rng,
            state,
        };
        engine.reset();
        Ok(engine)
    }

    fn initial_state(config: &GameConfig) -> GameState {
        let (x, y) = config.start_head();
        let snake = Snake::new(
            Position::new(x, y),
            Direction::Right,
            config.initial_snake_length,
        );

        GameState::new(
            snake,
            config.tile_count,
            config.first_level_score,
            config.initial_tick(),
        )
    }

    /// Reset the game to its idle starting state
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
        self.generate_food();
        info!(tile_count = self.config.tile_count, "game reset");
    }

    /// Request a new heading. Returns whether the request was applied.
    ///
    /// Turning along the current axis is ignored, which covers both repeating
    /// the current direction and reversing it. The first accepted turn of an
    /// idle game starts it.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.state.status == GameStatus::GameOver {
            return false;
        }

        if let Some(current) = self.state.direction {
            if current.axis() == requested.axis() {
                return false;
            }
        }

        self.state.direction = Some(requested);

        if self.state.status == GameStatus::Idle {
            self.state.status = GameStatus::Running;
            info!(direction = ?requested, "game started");
        }

        true
    }

    /// Advance a running game by one cell
    pub fn tick(&mut self) -> TickOutcome {
        let mut info = TickInfo::default();

        let direction = match (self.state.status, self.state.direction) {
            (GameStatus::Running, Some(direction)) => direction,
            (status, _) => return TickOutcome { status, info },
        };

        // The new head carries the previous head's marker forward
        let old_head = self.state.snake.head_segment();
        let new_head = Segment {
            position: old_head.position.moved_in_direction(direction),
            marker: old_head.marker,
        };
        self.state.snake.push_head(new_head);

        match self.state.food {
            Some(food) if food.position == new_head.position => {
                info.ate_food = true;
                self.state.snake.body[0].marker = food.marker;
                self.state.score += 1;
                info.level_up = self.advance_level();
                self.generate_food();
            }
            _ => {
                self.state.snake.pop_tail();
            }
        }

        if let Some(collision_type) = self.check_collision(new_head.position) {
            self.state.status = GameStatus::GameOver;
            info.collision_type = Some(collision_type);
            info!(
                score = self.state.score,
                level = self.state.level,
                collision = ?collision_type,
                "game over"
            );
        }

        TickOutcome {
            status: self.state.status,
            info,
        }
    }

    /// Apply a level-up if the current score reached the target
    fn advance_level(&mut self) -> Option<u32> {
        let level_up = self.progression.check(
            self.state.score,
            self.state.level,
            self.state.next_level_score,
            self.state.tick_interval,
        )?;

        self.state.level = level_up.level;
        self.state.next_level_score = level_up.next_level_score;
        self.state.tick_interval = level_up.tick_interval;

        for _ in 0..level_up.new_obstacles {
            if self.generate_obstacle().is_none() {
                break;
            }
        }

        info!(
            level = level_up.level,
            next_level_score = level_up.next_level_score,
            tick_ms = level_up.tick_interval.as_millis() as u64,
            obstacles = self.state.obstacles.len(),
            "level up"
        );

        Some(level_up.level)
    }

    /// Check if the head position causes a collision
    fn check_collision(&self, head: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if self.state.is_obstacle(head) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    /// Place new food on a cell free of snake and obstacles.
    ///
    /// Leaves the board without food and returns `None` when no free cell is left.
    pub fn generate_food(&mut self) -> Option<Food> {
        let state = &self.state;
        let position = pick_free_cell(
            &mut self.rng,
            self.config.tile_count,
            self.config.placement_attempts,
            |pos| !state.is_occupied_by_snake(pos) && !state.is_obstacle(pos),
        );

        let food = position.map(|position| Food {
            position,
            marker: Marker(self.rng.gen_range(0..self.config.food_markers.max(1))),
        });

        match food {
            Some(food) => debug!(x = food.position.x, y = food.position.y, "food placed"),
            None => warn!("no free cell left for food"),
        }

        self.state.food = food;
        food
    }

    /// Add one obstacle away from the snake head, food and existing obstacles
    pub fn generate_obstacle(&mut self) -> Option<Position> {
        let state = &self.state;
        let head = state.snake.head();
        let safe_distance = self.config.obstacle_safe_distance;

        let position = pick_free_cell(
            &mut self.rng,
            self.config.tile_count,
            self.config.placement_attempts,
            |pos| {
                pos.manhattan_distance(head) > safe_distance
                    && !state.is_occupied_by_snake(pos)
                    && !state.is_obstacle(pos)
                    && !state.is_food(pos)
            },
        );

        match position {
            Some(pos) => {
                self.state.obstacles.insert(pos);
                debug!(x = pos.x, y = pos.y, "obstacle placed");
            }
            None => warn!("no free cell left for an obstacle"),
        }

        position
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(&self.state)
    }

    /// Interval until the next tick, read fresh on every reschedule
    pub fn tick_interval(&self) -> Duration {
        self.state.tick_interval
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the food, e.g. to set up a known board
    pub fn place_food(&mut self, food: Option<Food>) {
        self.state.food = food;
    }

    /// Replace the snake. An empty snake is refused and leaves the board unchanged.
    pub fn load_snake(&mut self, snake: Snake) -> bool {
        if snake.is_empty() {
            return false;
        }
        self.state.snake = snake;
        true
    }

    /// Add an obstacle at a fixed cell. Cells outside the grid are refused.
    pub fn add_obstacle(&mut self, pos: Position) -> bool {
        if !self.state.is_in_bounds(pos) {
            return false;
        }
        self.state.obstacles.insert(pos)
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
