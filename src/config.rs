use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Polling cadence of the timer loop.
pub const DEFAULT_TICK_RATE_MS: u64 = 8;
/// Progress fraction at which the bar turns yellow.
pub const DEFAULT_WARN_RATIO: f64 = 0.75;
/// Progress fraction at which the bar turns red.
pub const DEFAULT_DANGER_RATIO: f64 = 0.90;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Milliseconds between two iterations of the timer loop.
    /// Default: 8
    pub tick_rate_ms: Option<u64>,
    /// Print the final report after the session ends.
    /// Default: true
    pub show_report: Option<bool>,
    /// Default: 0.75
    pub warn_ratio: Option<f64>,
    /// Default: 0.90
    pub danger_ratio: Option<f64>,
}

impl Config {
    /// Load configuration from ~/.config/mortimer/config.toml
    ///
    /// - File missing: returns default config (Ok)
    /// - File exists but invalid TOML: returns Err so caller can show warning
    /// - Field missing: uses the default
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// A zero tick rate would spin the loop, so it is raised to 1ms.
    pub fn tick_rate_ms(&self) -> u64 {
        self.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS).max(1)
    }

    pub fn show_report(&self) -> bool {
        self.show_report.unwrap_or(true)
    }

    /// Returns (warn, danger) thresholds, clamped to 0..=1 with warn <= danger.
    pub fn thresholds(&self) -> (f64, f64) {
        let warn = self
            .warn_ratio
            .unwrap_or(DEFAULT_WARN_RATIO)
            .clamp(0.0, 1.0);
        let danger = self
            .danger_ratio
            .unwrap_or(DEFAULT_DANGER_RATIO)
            .clamp(0.0, 1.0);
        (warn.min(danger), danger)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(".config").join("mortimer").join("config.toml"))
    }
}
