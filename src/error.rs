//! Error types for the generation engine.

use std::fmt;

/// An error rejecting a generation request. Generation itself is pure
/// computation and cannot fail once a request is validated; limb-contention
/// drops are documented behavior, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The request is structurally unusable (zero bars, zero steps,
    /// out-of-range swing or ghost chance, empty voice set).
    InvalidConfiguration(String),
    /// A genre key that names no known blueprint.
    UnknownGenre(String),
}

impl GenerateError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            GenerateError::UnknownGenre(key) => write!(f, "unknown genre: {key}"),
        }
    }
}

impl std::error::Error for GenerateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_detail() {
        let e = GenerateError::invalid("steps must be > 0");
        assert_eq!(
            e.to_string(),
            "invalid configuration: steps must be > 0"
        );
        let e = GenerateError::UnknownGenre("polka".into());
        assert_eq!(e.to_string(), "unknown genre: polka");
    }
}
