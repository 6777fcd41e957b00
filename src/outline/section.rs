use std::fmt;

/// Separator placed between ancestor titles in a qualified name.
pub const PREFIX_SEPARATOR: &str = " >> ";

/// A single timed unit of an outline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    /// Display name, right-trimmed
    pub title: String,
    /// Qualified name of the parent chain (empty for top-level sections)
    pub prefix: String,
    /// Planned duration
    pub seconds: u64,
    /// Duration line carried a trailing `+` (running over is acceptable)
    pub plus: bool,
    /// Duration line carried a trailing `-` (running under is acceptable)
    pub minus: bool,
    /// Time actually spent, backfilled when the section is left
    pub actual_seconds: Option<u64>,
    /// Filled by the report
    pub recommended_seconds: Option<u64>,
    /// Filled by the report
    pub weight: Option<f64>,
}

impl Section {
    pub fn new(title: impl Into<String>, seconds: u64) -> Self {
        Self {
            title: title.into(),
            seconds,
            ..Self::default()
        }
    }

    /// Title prefixed by the ancestor chain, e.g. `Breakfast >> Coffee`.
    pub fn qualified_name(&self) -> String {
        if self.prefix.is_empty() {
            self.title.clone()
        } else {
            format!("{}{}{}", self.prefix, PREFIX_SEPARATOR, self.title)
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.qualified_name(), self.seconds)
    }
}
