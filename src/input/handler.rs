use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameCommand(Command),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => turn(Direction::Up),
            KeyCode::Down => turn(Direction::Down),
            KeyCode::Left => turn(Direction::Left),
            KeyCode::Right => turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => turn(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::GameCommand(Command::Reset),

            _ => KeyAction::None,
        }
    }

    /// Map a left click to a turn toward the clicked side of the board.
    ///
    /// Board cells are two columns wide, so the vertical offset is doubled
    /// before the axes are compared.
    pub fn handle_mouse_event(&self, mouse: MouseEvent, board: Rect) -> KeyAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || board.area() == 0 {
            return KeyAction::None;
        }

        let center_x = board.x as i32 + board.width as i32 / 2;
        let center_y = board.y as i32 + board.height as i32 / 2;
        let dx = mouse.column as i32 - center_x;
        let dy = (mouse.row as i32 - center_y) * 2;

        turn(Direction::from_offset(dx, dy))
    }
}

fn turn(direction: Direction) -> KeyAction {
    KeyAction::GameCommand(Command::Turn(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
