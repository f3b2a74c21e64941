use std::time::Duration;

use super::state::{Food, GameState, GameStatus, Position, Segment};

/// Read-only view of a game handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub tile_count: usize,
    /// Head first
    pub snake: Vec<Segment>,
    pub food: Option<Food>,
    /// Sorted row-major so snapshots of equal states compare equal
    pub obstacles: Vec<Position>,
    pub score: u32,
    pub level: u32,
    pub next_level_score: u32,
    pub tick_interval: Duration,
    pub status: GameStatus,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        let mut obstacles: Vec<Position> = state.obstacles.iter().copied().collect();
        obstacles.sort_by_key(|p| (p.y, p.x));

        Self {
            tile_count: state.tile_count,
            snake: state.snake.body.clone(),
            food: state.food,
            obstacles,
            score: state.score,
            level: state.level,
            next_level_score: state.next_level_score,
            tick_interval: state.tick_interval,
            status: state.status,
        }
    }
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().map(|s| s.position)
    }

    pub fn is_playable(&self) -> bool {
        self.status != GameStatus::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Marker, Snake};

    #[test]
    fn test_snapshot_copies_state() {
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            10,
            5,
            Duration::from_millis(120),
        );
        state.food = Some(Food {
            position: Position::new(1, 1),
            marker: Marker(3),
        });
        state.obstacles.insert(Position::new(7, 2));
        state.obstacles.insert(Position::new(2, 7));
        state.obstacles.insert(Position::new(3, 2));

        let snapshot = GameSnapshot::from(&state);

        assert_eq!(snapshot.head(), Some(Position::new(5, 5)));
        assert_eq!(snapshot.snake.len(), 3);
        assert_eq!(snapshot.food.map(|f| f.marker), Some(Marker(3)));
        assert_eq!(
            snapshot.obstacles,
            vec![Position::new(3, 2), Position::new(7, 2), Position::new(2, 7)]
        );
        assert!(snapshot.is_playable());
    }
}
