//! Error types for Travelsim Core

use crate::limits::ValidationError;
use thiserror::Error;

/// Result type alias using Travelsim's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Travelsim error types
///
/// Absence is never an error: lookups and deletions by an unknown name
/// return `None` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("An instance with the name '{0}' already exists")]
    NameInUse(String),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] ValidationError),

    #[error("{what} cannot be negative ('{value}')")]
    Range { what: &'static str, value: String },

    #[error("{location_kind} '{location}' cannot be an endpoint of {segment_kind} '{segment}'")]
    IncompatibleSegment {
        location: String,
        location_kind: String,
        segment: String,
        segment_kind: String,
    },

    #[error("Unknown kind: {0}")]
    UnknownKind(String),

    #[error("Location no longer exists: {0}")]
    UnknownLocation(String),

    #[error("Segment no longer exists: {0}")]
    UnknownSegment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NameInUse("sfo".into());
        assert_eq!(
            err.to_string(),
            "An instance with the name 'sfo' already exists"
        );

        let err = Error::Range {
            what: "Miles",
            value: "-23".into(),
        };
        assert_eq!(err.to_string(), "Miles cannot be negative ('-23')");

        let err = Error::IncompatibleSegment {
            location: "stanford".into(),
            location_kind: "Residence".into(),
            segment: "f1".into(),
            segment_kind: "Flight".into(),
        };
        assert_eq!(
            err.to_string(),
            "Residence 'stanford' cannot be an endpoint of Flight 'f1'"
        );
    }
}
