//! Error types for day-window and swimlane layout.

use thiserror::Error;

/// Errors raised by layout operations.
///
/// Every variant is a caller contract violation; the kernels themselves are
/// total over well-formed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A negative day count, or an inverted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An event's label has no swimlane in the computed set.
    #[error("No swimlane for label '{label}'")]
    Lookup { label: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// An event whose end precedes its start.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Calendar arithmetic left chrono's representable range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Convenience alias used throughout days-around.
pub type Result<T> = std::result::Result<T, LayoutError>;
