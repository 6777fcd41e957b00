use crate::outline::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file on disk into an outline.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("There is no readable file at {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
