use std::collections::HashSet;
use std::time::Duration;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Opaque per-cell payload. The game only copies it around; renderers pick a colour from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Marker(pub u8);

/// One cell of the snake body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: Position,
    pub marker: Marker,
}

/// The food item currently on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub marker: Marker,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Segment>,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `facing`
    pub fn new(head: Position, facing: Direction, length: usize) -> Self {
        let (dx, dy) = facing.delta();
        let body = (0..length as i32)
            .map(|i| Segment {
                position: head.moved_by(-dx * i, -dy * i),
                marker: Marker::default(),
            })
            .collect();

        Self { body }
    }

    /// Create a snake from explicit cells, head first
    pub fn from_positions(positions: &[Position]) -> Self {
        Self {
            body: positions
                .iter()
                .map(|&position| Segment {
                    position,
                    marker: Marker::default(),
                })
                .collect(),
        }
    }

    /// Get the head segment
    pub fn head_segment(&self) -> Segment {
        self.body[0]
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0].position
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Option<Position> {
        self.body.last().map(|segment| segment.position)
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Segment] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().iter().any(|s| s.position == pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.iter().any(|s| s.position == pos)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().map(|s| s.position)
    }

    /// Push a new head. The caller decides whether the tail is dropped.
    pub fn push_head(&mut self, segment: Segment) {
        self.body.insert(0, segment);
    }

    pub fn pop_tail(&mut self) -> Option<Segment> {
        self.body.pop()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake ran into an obstacle
    Obstacle,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Waiting for the first direction input
    Idle,
    Running,
    /// Terminal until the next reset
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub obstacles: HashSet<Position>,
    pub direction: Option<Direction>,
    pub tile_count: usize,
    pub score: u32,
    pub level: u32,
    /// Score at which the next level-up happens
    pub next_level_score: u32,
    pub tick_interval: Duration,
    pub status: GameStatus,
}

impl GameState {
    /// Create an idle game state with no food and no obstacles
    pub fn new(
        snake: Snake,
        tile_count: usize,
        next_level_score: u32,
        tick_interval: Duration,
    ) -> Self {
        Self {
            snake,
            food: None,
            obstacles: HashSet::new(),
            direction: None,
            tile_count,
            score: 0,
            level: 1,
            next_level_score,
            tick_interval,
            status: GameStatus::Idle,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let side = self.tile_count as i32;
        pos.x >= 0 && pos.x < side && pos.y >= 0 && pos.y < side
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn is_food(&self, pos: Position) -> bool {
        self.food.is_some_and(|food| food.position == pos)
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_manhattan_distance() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.manhattan_distance(Position::new(5, 5)), 0);
        assert_eq!(pos.manhattan_distance(Position::new(8, 4)), 4);
        assert_eq!(pos.manhattan_distance(Position::new(-1, 5)), 6);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1].position, Position::new(4, 5));
        assert_eq!(snake.tail(), Some(Position::new(3, 5)));
    }

    #[test]
    fn test_snake_head_and_tail_updates() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.push_head(Segment {
            position: Position::new(6, 5),
            marker: Marker(2),
        });
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head_segment().marker, Marker(2));

        let dropped = snake.pop_tail().unwrap();
        assert_eq!(dropped.position, Position::new(3, 5));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            20,
            5,
            Duration::from_millis(120),
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            10,
            5,
            Duration::from_millis(120),
        );
        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.direction, None);
        assert_eq!(state.level, 1);
        assert!(state.food.is_none());
    }
}
