use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameSnapshot, GameStatus, Marker};
use crate::metrics::GameMetrics;

/// Colours picked by segment and food markers
const MARKER_COLORS: [Color; 6] = [
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::LightBlue,
    Color::LightRed,
];

const IDLE_HINT: &str = "press an arrow to start";

fn marker_color(marker: Marker) -> Color {
    MARKER_COLORS[marker.0 as usize % MARKER_COLORS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Head(Marker),
    Body(Marker),
    Food(Marker),
    Obstacle,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw a frame and return the area the board occupies, for mapping clicks
    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
    ) -> Rect {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = board_rect(chunks[1], snapshot.tile_count);

        if !snapshot.is_playable() {
            let game_over = self.render_game_over(snapshot);
            frame.render_widget(game_over, board_area);
        } else {
            let grid = self.render_grid(snapshot);
            frame.render_widget(grid, board_area);

            if snapshot.status == GameStatus::Idle {
                let hint_area = overlay_rect(chunks[1], board_area, IDLE_HINT);
                frame.render_widget(Clear, hint_area);
                frame.render_widget(self.render_idle_hint(), hint_area);
            }
        }

        let controls = self.render_controls(snapshot.status);
        frame.render_widget(controls, chunks[2]);

        board_area
    }

    fn tiles(&self, snapshot: &GameSnapshot) -> Vec<Tile> {
        let side = snapshot.tile_count;
        let mut tiles = vec![Tile::Empty; side * side];
        let mut put = |x: i32, y: i32, tile: Tile| {
            if x >= 0 && y >= 0 && (x as usize) < side && (y as usize) < side {
                tiles[y as usize * side + x as usize] = tile;
            }
        };

        for obstacle in &snapshot.obstacles {
            put(obstacle.x, obstacle.y, Tile::Obstacle);
        }
        if let Some(food) = snapshot.food {
            put(food.position.x, food.position.y, Tile::Food(food.marker));
        }
        // Tail first so the head wins when cells overlap
        for (i, segment) in snapshot.snake.iter().enumerate().rev() {
            let tile = if i == 0 {
                Tile::Head(segment.marker)
            } else {
                Tile::Body(segment.marker)
            };
            put(segment.position.x, segment.position.y, tile);
        }

        tiles
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'static> {
        let side = snapshot.tile_count;
        let tiles = self.tiles(snapshot);

        let lines: Vec<Line> = tiles
            .chunks(side.max(1))
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|tile| match *tile {
                        Tile::Head(marker) => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(marker_color(marker))
                                .add_modifier(Modifier::BOLD),
                        ),
                        Tile::Body(marker) => {
                            Span::styled("□ ", Style::default().fg(marker_color(marker)))
                        }
                        Tile::Food(marker) => Span::styled(
                            "O ",
                            Style::default()
                                .fg(marker_color(marker))
                                .add_modifier(Modifier::BOLD),
                        ),
                        Tile::Obstacle => {
                            Span::styled("▓▓", Style::default().fg(Color::Gray))
                        }
                        Tile::Empty => {
                            Span::styled(". ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(snapshot.level.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Next: ", label),
            Span::styled(snapshot.next_level_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.tick_interval.as_millis()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &GameSnapshot) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Level: ", Style::default().fg(Color::Yellow)),
                Span::styled(snapshot.level.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_idle_hint(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            IDLE_HINT,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("click", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ];
        if status == GameStatus::Idle {
            spans.push(Span::styled(
                "  (waiting for first move)",
                Style::default().fg(Color::DarkGray),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

/// One padded line across the middle row of `board`, kept inside `area`
fn overlay_rect(area: Rect, board: Rect, text: &str) -> Rect {
    let width = (text.chars().count() + 2).min(area.width as usize) as u16;
    let centre_x = board.x + board.width / 2;
    let x = centre_x
        .saturating_sub(width / 2)
        .clamp(area.x, area.x + area.width - width);

    Rect {
        x,
        y: board.y + board.height / 2,
        width,
        height: board.height.min(1),
    }
}

/// Centre a bordered board of `tile_count` two-column cells inside `area`
fn board_rect(area: Rect, tile_count: usize) -> Rect {
    let width = (tile_count * 2 + 2).min(area.width as usize) as u16;
    let height = (tile_count + 2).min(area.height as usize) as u16;

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction as Heading, GameConfig, GameEngine, Position};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(snapshot: &GameSnapshot) -> (String, Rect) {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        let mut board = Rect::default();

        terminal
            .draw(|frame| {
                board = renderer.render(frame, snapshot, &metrics);
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        (text, board)
    }

    #[test]
    fn test_board_rect_centred() {
        let rect = board_rect(Rect::new(0, 3, 80, 24), 10);
        assert_eq!(rect, Rect::new(29, 9, 22, 12));
    }

    #[test]
    fn test_board_rect_clamped_to_area() {
        let rect = board_rect(Rect::new(0, 0, 20, 10), 20);
        assert_eq!(rect, Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn test_tiles_place_every_entity() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3).unwrap();
        assert!(engine.add_obstacle(Position::new(0, 0)));
        engine.generate_food();
        let snapshot = engine.snapshot();
        let tiles = Renderer::new().tiles(&snapshot);

        let head = snapshot.head().unwrap();
        assert!(matches!(tiles[head.y as usize * 10 + head.x as usize], Tile::Head(_)));
        assert_eq!(tiles[0], Tile::Obstacle);
        let food = snapshot.food.unwrap().position;
        assert!(matches!(tiles[food.y as usize * 10 + food.x as usize], Tile::Food(_)));
        assert_eq!(
            tiles.iter().filter(|t| matches!(t, Tile::Body(_))).count(),
            snapshot.snake.len() - 1
        );
    }

    #[test]
    fn test_renders_idle_board() {
        let engine = GameEngine::with_seed(GameConfig::small(), 3).unwrap();
        let (text, board) = draw(&engine.snapshot());

        assert!(text.contains("Score: 0"));
        assert!(text.contains("Level: 1"));
        assert!(text.contains("press an arrow to start"));
        assert!(text.contains("waiting for first move"));
        assert_eq!(board.width, 22);
        assert_eq!(board.height, 12);
    }

    #[test]
    fn test_idle_hint_sits_on_board_middle_row() {
        let board = Rect::new(29, 9, 22, 12);
        let hint = overlay_rect(Rect::new(0, 3, 80, 24), board, IDLE_HINT);

        assert_eq!(hint, Rect::new(28, 15, 25, 1));
    }

    #[test]
    fn test_idle_hint_clamped_to_narrow_area() {
        let area = Rect::new(0, 0, 20, 10);
        let hint = overlay_rect(area, board_rect(area, 20), IDLE_HINT);

        assert_eq!(hint.width, 20);
        assert_eq!(hint.x, 0);
    }

    #[test]
    fn test_running_board_has_no_idle_hint() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3).unwrap();
        engine.set_direction(Heading::Up);
        let (text, _) = draw(&engine.snapshot());

        assert!(!text.contains("press an arrow to start"));
        assert!(!text.contains("waiting for first move"));
    }

    #[test]
    fn test_renders_game_over_panel() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3).unwrap();
        engine.state_mut().status = GameStatus::GameOver;
        engine.state_mut().score = 7;

        let (text, _) = draw(&engine.snapshot());

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 7"));
    }
}
