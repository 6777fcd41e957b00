use crate::config::Config;
use crate::outline::{Outline, Section};
use crate::session::{SessionEngine, Tick};
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::io;
use std::time::Instant;

use super::event::{command_for_key, Event, EventHandler};
use super::render::{render_footer, render_header, render_progress, render_sections};

/// What is on screen, to skip redraws that would change nothing
#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    cursor: usize,
    paused: bool,
    remaining_seconds: Option<i64>,
    /// Progress in permille, finer than the bar can show
    progress: Option<u32>,
}

/// Puts the terminal into raw mode on the alternate screen and restores it
/// when dropped, also while unwinding from a panic.
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = Self {
            restore: restore_terminal,
        };
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            tracing::warn!("failed to restore terminal: {}", err);
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen, Show)
}

/// TUI application
pub struct App {
    /// Document title
    title: String,
    engine: SessionEngine,
    /// (warn, danger) progress thresholds
    thresholds: (f64, f64),
    tick_rate_ms: u64,
    /// Last rendered state
    last_drawn: Option<Snapshot>,
}

impl App {
    pub fn new(outline: Outline, config: &Config) -> Self {
        Self {
            title: outline.title,
            engine: SessionEngine::new(outline.sections),
            thresholds: config.thresholds(),
            tick_rate_ms: config.tick_rate_ms(),
            last_drawn: None,
        }
    }

    /// Run TUI until the session ends, then hand back the sections with their actual times.
    pub fn run(mut self) -> Result<Vec<Section>> {
        // Setup terminal
        let guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        self.run_loop(&mut terminal)?;

        drop(terminal);
        drop(guard);
        Ok(self.engine.into_sections())
    }

    fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let event_handler = EventHandler::new(self.tick_rate_ms);
        self.engine.start();

        while self.engine.is_running() {
            let snapshot = self.snapshot(Instant::now());
            if self.last_drawn != Some(snapshot) {
                terminal.draw(|f| self.render(f))?;
                self.last_drawn = Some(snapshot);
            }

            match event_handler.next()? {
                Event::Key(key) => {
                    if let Some(command) = command_for_key(&key) {
                        tracing::debug!(?command, "key command");
                        self.engine.apply(command, Instant::now());
                    }
                }
                Event::Resize(_, _) => {
                    self.last_drawn = None;
                }
                Event::Tick => {}
            }

            if self.engine.tick(Instant::now()) == Tick::Advanced {
                tracing::info!(
                    section = ?self.engine.current().map(Section::qualified_name),
                    "time is up, moving on"
                );
            }
        }

        Ok(())
    }

    fn snapshot(&self, now: Instant) -> Snapshot {
        Snapshot {
            cursor: self.engine.cursor(),
            paused: self.engine.is_paused(),
            remaining_seconds: self.engine.remaining_seconds(now),
            progress: self
                .engine
                .progress(now)
                .map(|p| (p.max(0.0) * 1000.0) as u32),
        }
    }

    /// Render
    fn render(&self, f: &mut ratatui::Frame) {
        let now = Instant::now();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        render_header(
            f,
            chunks[0],
            &self.title,
            self.engine.current(),
            self.engine.is_paused(),
        );
        render_progress(
            f,
            chunks[1],
            self.engine.progress(now),
            self.engine.remaining_seconds(now),
            self.thresholds,
        );
        render_sections(
            f,
            chunks[2],
            self.engine.finished(),
            self.engine.upcoming(),
        );
        render_footer(f, chunks[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::parse_outline;
    use ratatui::backend::TestBackend;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn app() -> App {
        let outline = parse_outline("Morning\nWake up (5m)\nBreakfast\n  Coffee (3m)\n").unwrap();
        App::new(outline, &Config::default())
    }

    #[test]
    fn test_render_shows_current_section() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Morning"));
        assert!(text.contains("Wake up"));
        assert!(text.contains("5m0s"));
        assert!(text.contains("Breakfast >> Coffee (180s)"));
    }

    static RESTORED: AtomicBool = AtomicBool::new(false);

    fn mark_restored() -> io::Result<()> {
        RESTORED.store(true, Ordering::SeqCst);
        Ok(())
    }

    #[test]
    fn test_terminal_guard_restores_on_panic() {
        let result = std::panic::catch_unwind(|| {
            let _guard = TerminalGuard {
                restore: mark_restored,
            };
            panic!("render failed");
        });
        assert!(result.is_err());
        assert!(RESTORED.load(Ordering::SeqCst));
    }

    #[test]
    fn test_snapshot_changes_with_navigation() {
        let mut app = app();
        let now = Instant::now();
        let before = app.snapshot(now);
        app.engine.advance(now);
        let after = app.snapshot(now);
        assert_ne!(before, after);
        assert_eq!(after.cursor, 1);
        assert_eq!(after.remaining_seconds, Some(180));
    }
}
