//! Outline documents: parsing indented text into a flat sequence of timed sections.

mod error;
mod parser;
mod section;

pub use error::ParseError;
pub use parser::{parse_duration, parse_outline, Outline};
pub use section::{Section, PREFIX_SEPARATOR};

use crate::error::LoadError;
use std::fs;
use std::path::Path;

/// Read an outline file and parse it.
pub fn load_outline(path: &Path) -> Result<Outline, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let outline = parse_outline(&text)?;
    tracing::info!(
        path = %path.display(),
        sections = outline.sections.len(),
        total_seconds = outline.total_seconds(),
        "loaded outline"
    );
    Ok(outline)
}
