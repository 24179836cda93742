//! Error types for parser configuration.
//!
//! Parsing itself is best-effort and never fails on malformed input data;
//! only invalid configuration is surfaced as an error, and only once, at
//! engine construction time.

use thiserror::Error;

/// A specialized Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised when a [`crate::TaskParser`] is constructed from an
/// invalid configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The metadata extraction iteration bound is zero.
    #[error("maxMetadataIterations must be at least 1, got {value}")]
    InvalidIterationBound {
        /// The rejected value.
        value: u32,
    },

    /// The status mapping contains no entries, so no line could ever be
    /// classified.
    #[error("status mapping is empty")]
    EmptyStatusMapping,

    /// Daily-note date extraction is enabled but no date format was given.
    #[error("useDailyNotePathAsDate is enabled but dailyNoteFormat is empty")]
    EmptyDailyNoteFormat,

    /// The frontmatter project lookup is enabled but the metadata key is
    /// empty.
    #[error("project metadata lookup is enabled but metadataKey is empty")]
    EmptyMetadataKey,
}
