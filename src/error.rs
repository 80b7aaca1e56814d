//! Error types for the Incentive Engine.
//!
//! The incentive calculation itself never fails: every "no incentive" case is
//! a value of [`IncentiveOutcome`](crate::models::IncentiveOutcome). The errors
//! here cover the collaborators around it, such as configuration loading and
//! validation of inbound sales rows.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Incentive Engine.
///
/// # Example
///
/// ```
/// use incentive_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A threshold triple is not monotonically non-decreasing.
    #[error(
        "Invalid thresholds for position '{position}': expected base <= level1_end <= level2_end, got {base} / {level1_end} / {level2_end}"
    )]
    InvalidThresholds {
        /// The position the triple belongs to.
        position: String,
        /// The configured base threshold.
        base: Decimal,
        /// The configured end of level 1.
        level1_end: Decimal,
        /// The configured end of level 2.
        level2_end: Decimal,
    },

    /// A calculation period is not a valid calendar month.
    #[error("Invalid period {year}-{month}: month must be between 1 and 12")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A sales row was rejected before reaching the engine.
    #[error("Invalid sales record at row {row}, field '{field}': {message}")]
    InvalidSalesRecord {
        /// Zero-based index of the row in its batch.
        row: usize,
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
