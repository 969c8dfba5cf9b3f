use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use macroquad::input::KeyCode as WindowKey;

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyAction {
    /// Buffer a direction change for the snake
    Steer(Direction),
    Quit,
    None,
}

/// Maps key presses from either front-end onto game actions. Reversal is not
/// filtered here; the snake rejects it against its current direction.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Terminal key events
    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Window key presses
    pub fn handle_window_key(&self, key: WindowKey) -> KeyAction {
        match key {
            WindowKey::Up | WindowKey::W => KeyAction::Steer(Direction::Up),
            WindowKey::Down | WindowKey::S => KeyAction::Steer(Direction::Down),
            WindowKey::Left | WindowKey::A => KeyAction::Steer(Direction::Left),
            WindowKey::Right | WindowKey::D => KeyAction::Steer(Direction::Right),
            WindowKey::Escape | WindowKey::Q => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    /// Keys pressed during one window frame arrive unordered, so their
    /// actions come back in a fixed order: steering Up, Down, Left, Right,
    /// then Quit. Unmapped keys are dropped.
    pub fn handle_window_keys(&self, keys: impl IntoIterator<Item = WindowKey>) -> Vec<KeyAction> {
        let mut actions: Vec<KeyAction> = keys
            .into_iter()
            .map(|key| self.handle_window_key(key))
            .filter(|action| *action != KeyAction::None)
            .collect();
        actions.sort();
        actions.dedup();
        actions
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
