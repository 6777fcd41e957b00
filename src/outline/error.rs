use thiserror::Error;

/// A document that cannot be turned into sections. Parsing stops at the first one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line does not follow `<indent><title>(<Xh><Ym><Zs><+|->)`.
    #[error("\"{0}\" does not follow the expected structure")]
    MalformedLine(String),

    /// An `h`/`m`/`s` component is not a valid number.
    #[error("\"{0}\" has a duration that doesn't look right")]
    BadDuration(String),
}
