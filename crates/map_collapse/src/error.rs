//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, exhausted generation attempts, playable-area gating,
//! placement capacity, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no consistent grid after {attempts} attempts")]
    Generation { attempts: u32 },

    #[error("playable area ratio {ratio} below threshold {threshold}")]
    InsufficientPlayableArea { ratio: f32, threshold: f32 },

    #[error("requested {requested} positions but only {available} are available")]
    InsufficientArea { requested: usize, available: usize },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn display_includes_counts() {
        let err = Error::InsufficientArea {
            requested: 5,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('5') && msg.contains('3'));
    }
}
