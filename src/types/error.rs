//! Error types for the attribution engine
//!
//! Every error aborts the run: there is no recoverable category. Each variant
//! carries enough context (source name, line, offending text) to locate the
//! bad input from the CLI message alone.
//!
//! # Error Categories
//!
//! - **Input Errors**: source cannot be opened/read, malformed rows
//! - **Business Errors**: unparseable or negative sale amounts, overflow
//! - **Output Errors**: summary cannot be created or written

use thiserror::Error;

/// Main error type for the attribution engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributionError {
    /// An input source could not be opened or read
    #[error("Cannot read {source_name}: {message}")]
    SourceUnavailable {
        /// The path or label of the source
        source_name: String,
        /// Description of the underlying I/O failure
        message: String,
    },

    /// A row's shape or timestamp does not match the expected format
    #[error("Malformed input in {source_name}{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedInput {
        /// The path or label of the source
        source_name: String,
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// A sale amount is not a valid non-negative decimal
    #[error("Invalid amount '{amount}' for user {user_id} (sale line {line})")]
    InvalidAmount {
        /// The offending amount text
        amount: String,
        /// User the sale belongs to
        user_id: String,
        /// Line of the sale in its source
        line: u64,
    },

    /// The summary output could not be created or written
    #[error("Cannot write summary to {sink_name}: {message}")]
    SinkUnavailable {
        /// The path or label of the output
        sink_name: String,
        /// Description of the underlying failure
        message: String,
    },

    /// A running total exceeded the decimal range
    #[error("Arithmetic overflow while summing sales for '{dimension}'")]
    ArithmeticOverflow {
        /// Aggregate whose total overflowed
        dimension: String,
    },
}

impl AttributionError {
    /// Create a SourceUnavailable error
    pub fn source_unavailable(source_name: &str, message: impl std::fmt::Display) -> Self {
        AttributionError::SourceUnavailable {
            source_name: source_name.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a MalformedInput error
    pub fn malformed_input(source_name: &str, line: Option<u64>, message: impl Into<String>) -> Self {
        AttributionError::MalformedInput {
            source_name: source_name.to_string(),
            line,
            message: message.into(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, user_id: &str, line: u64) -> Self {
        AttributionError::InvalidAmount {
            amount: amount.to_string(),
            user_id: user_id.to_string(),
            line,
        }
    }

    /// Create a SinkUnavailable error
    pub fn sink_unavailable(sink_name: &str, message: impl std::fmt::Display) -> Self {
        AttributionError::SinkUnavailable {
            sink_name: sink_name.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(dimension: &str) -> Self {
        AttributionError::ArithmeticOverflow {
            dimension: dimension.to_string(),
        }
    }

    /// Convert a csv read error, keeping its line number
    ///
    /// I/O failures underneath the reader map to `SourceUnavailable`;
    /// everything else is a shape problem.
    pub fn from_csv_read(source_name: &str, error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());
        if error.is_io_error() {
            AttributionError::source_unavailable(source_name, error)
        } else {
            AttributionError::malformed_input(source_name, line, error.to_string())
        }
    }
}
