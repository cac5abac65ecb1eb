use thiserror::Error;

/// Errors raised while validating effect configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid hex color `{0}`, expected #rrggbb")]
    InvalidHex(String),
    #[error("title list must contain at least one title")]
    EmptyTitleList,
    #[error("shuffle alphabet must contain at least one character")]
    EmptyAlphabet,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
