//! Section navigation and elapsed-time bookkeeping.
//!
//! All durations are derived from `now`, the start of the current section and
//! the accumulated pause time on every call, so nothing drifts between ticks.
//! Callers pass `now` explicitly, which keeps the engine free of clock access.

use std::time::{Duration, Instant};

use super::command::Command;
use crate::outline::Section;

/// What a call to [`SessionEngine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time is running in the current section
    Idle,
    /// Paused, time is frozen
    Paused,
    /// The current section ran out and the cursor moved on
    Advanced,
    /// The cursor is past the last section, the session is over
    Finished,
}

/// Owns the section sequence and a cursor into it.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    sections: Vec<Section>,
    cursor: usize,
    /// Unset until the first tick, so the first frame shows zero elapsed
    section_start: Option<Instant>,
    /// Set while paused
    pause_start: Option<Instant>,
    /// Paused time within the current section, excluding an ongoing pause
    pause_accum: Duration,
    running: bool,
}

impl SessionEngine {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            cursor: 0,
            section_start: None,
            pause_start: None,
            pause_accum: Duration::ZERO,
            running: false,
        }
    }

    pub fn start(&mut self) {
        tracing::info!(sections = self.sections.len(), "session started");
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.pause_start.is_some()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// The active section, `None` once the cursor is past the end.
    pub fn current(&self) -> Option<&Section> {
        self.sections.get(self.cursor)
    }

    /// Sections already left behind.
    pub fn finished(&self) -> &[Section] {
        &self.sections[..self.cursor.min(self.sections.len())]
    }

    /// Sections after the current one.
    pub fn upcoming(&self) -> &[Section] {
        self.sections.get(self.cursor + 1..).unwrap_or_default()
    }

    /// Advance the clock. Moves to the next section once the current one has run out.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let Some(seconds) = self.current().map(|section| section.seconds) else {
            if self.running {
                tracing::info!("session reached its end");
            }
            self.running = false;
            return Tick::Finished;
        };

        self.section_start.get_or_insert(now);

        if self.is_paused() {
            return Tick::Paused;
        }

        if self.elapsed(now) >= Duration::from_secs(seconds) {
            self.advance(now);
            return Tick::Advanced;
        }

        Tick::Idle
    }

    /// Time spent in the current section, excluding pauses.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let Some(start) = self.section_start else {
            return Duration::ZERO;
        };
        now.saturating_duration_since(start)
            .saturating_sub(self.pause_accum + self.ongoing_pause(now))
    }

    /// Part of the current pause during which the section clock was running.
    /// A pause taken before the first tick does not count.
    fn ongoing_pause(&self, now: Instant) -> Duration {
        match (self.pause_start, self.section_start) {
            (Some(pause_start), Some(start)) => {
                now.saturating_duration_since(pause_start.max(start))
            }
            _ => Duration::ZERO,
        }
    }

    /// Fraction of the current section that has elapsed.
    ///
    /// `None` past the end, or when the current section has no duration.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        let section = self.current()?;
        if section.seconds == 0 {
            return None;
        }
        Some(self.elapsed(now).as_millis() as f64 / (section.seconds * 1000) as f64)
    }

    /// Whole seconds left in the current section, negative when overrun.
    pub fn remaining_seconds(&self, now: Instant) -> Option<i64> {
        let section = self.current()?;
        let planned_ms = section.seconds as i128 * 1000;
        let elapsed_ms = self.elapsed(now).as_millis() as i128;
        Some(((planned_ms - elapsed_ms) / 1000) as i64)
    }

    /// Leave the current section for the next one, recording the time spent.
    pub fn advance(&mut self, now: Instant) {
        if self.cursor < self.sections.len() {
            if self.section_start.is_some() {
                let actual = self.elapsed(now).as_secs();
                self.sections[self.cursor].actual_seconds = Some(actual);
            }
            self.cursor += 1;
        }
        self.restart_section(now);
        tracing::debug!(cursor = self.cursor, "advanced");
    }

    /// Go back one section. At the first section this only restarts its timer.
    pub fn retreat(&mut self, now: Instant) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.restart_section(now);
        tracing::debug!(cursor = self.cursor, "retreated");
    }

    pub fn pause(&mut self, now: Instant) {
        if self.pause_start.is_none() {
            self.pause_start = Some(now);
            tracing::debug!(cursor = self.cursor, "paused");
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.pause_start.is_some() {
            self.pause_accum += self.ongoing_pause(now);
            self.pause_start = None;
            tracing::debug!(
                cursor = self.cursor,
                paused_ms = self.pause_accum.as_millis() as u64,
                "resumed"
            );
        }
    }

    /// Stop the session. Cursor and timers are left as they are.
    pub fn terminate(&mut self) {
        tracing::info!(cursor = self.cursor, "session terminated");
        self.running = false;
    }

    /// Apply a runtime command.
    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Advance => self.advance(now),
            Command::Retreat => self.retreat(now),
            Command::Pause => self.pause(now),
            Command::Resume => self.resume(now),
            Command::TogglePause => {
                if self.is_paused() {
                    self.resume(now);
                } else {
                    self.pause(now);
                }
            }
            Command::Terminate => self.terminate(),
        }
    }

    /// Navigating always un-pauses and starts the section clock over.
    fn restart_section(&mut self, now: Instant) {
        self.section_start = Some(now);
        self.pause_start = None;
        self.pause_accum = Duration::ZERO;
    }
}
