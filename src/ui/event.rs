use crate::session::Command;
use anyhow::Result;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use std::time::Duration;

/// TUI event
#[derive(Debug, Clone)]
pub enum Event {
    /// Key input
    Key(KeyEvent),
    /// Tick (periodic update)
    Tick,
    /// Resize
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick interval (ms)
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Get next event. Waits at most one tick interval, so the loop never stalls on input.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(Event::Resize(w, h)),
                _ => Ok(Event::Tick),
            }
        } else {
            // Timeout -> Tick event
            Ok(Event::Tick)
        }
    }
}

/// Key event helper
pub fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn is_next_key(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('d') | KeyCode::Char('l') | KeyCode::Right
    )
}

pub fn is_previous_key(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('a') | KeyCode::Char('h') | KeyCode::Left
    )
}

/// Translate a key press into a session command.
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if is_quit_key(key) {
        Some(Command::Terminate)
    } else if is_next_key(key) {
        Some(Command::Advance)
    } else if is_previous_key(key) {
        Some(Command::Retreat)
    } else {
        match key.code {
            KeyCode::Char('w') => Some(Command::Pause),
            KeyCode::Char('e') => Some(Command::Resume),
            KeyCode::Char(' ') => Some(Command::TogglePause),
            _ => None,
        }
    }
}
