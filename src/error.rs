//! # Error Types
//!
//! This module defines the error types for the Pinyin chart engine.
//!
//! The phonology core never fails: an invalid syllable is a `false`, a missing
//! notation is an empty string, an unplayable clip is skipped. Errors only
//! appear at the boundary, where text from a user or a config file has to be
//! turned into typed values.
//!
//! ## Error Types
//! - `UnknownOnset` / `UnknownRime` - a spelling that is not in the inventory
//! - `InvalidRow` / `MalformedRow` - a chart row past the last rime row, or not a number
//! - `UnknownJoinMode` - a notation join mode other than `joined`/`separated`
//! - `ConfigError` - unreadable or malformed chart configuration
//! - `NotationError` - unreadable or malformed notation table
//!
//! ## Usage
//! ```rust
//! use pinyin_chart::{ChartError, Onset};
//!
//! match "zh".parse::<Onset>() {
//!     Ok(onset) => println!("column {}", onset.column()),
//!     Err(ChartError::UnknownOnset(s)) => eprintln!("not an initial: {}", s),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// An initial spelling that is not one of the chart columns.
    ///
    /// # Example
    /// ```
    /// # use pinyin_chart::ChartError;
    /// let err = ChartError::UnknownOnset("y".to_string());
    /// assert_eq!(err.to_string(), "Unknown onset 'y'");
    /// ```
    #[error("Unknown onset '{0}'")]
    UnknownOnset(String),

    /// A final spelling that is not one of the chart rows.
    #[error("Unknown rime '{0}'")]
    UnknownRime(String),

    /// A row index outside the rime table.
    ///
    /// # Example
    /// ```
    /// # use pinyin_chart::ChartError;
    /// let err = ChartError::InvalidRow { row: 40, rows: 37 };
    /// assert_eq!(err.to_string(), "Row 40 is out of range (chart has 37 rows)");
    /// ```
    #[error("Row {row} is out of range (chart has {rows} rows)")]
    InvalidRow { row: usize, rows: usize },

    /// A row given as text that is not a row number.
    #[error("Row must be a number, got '{0}'")]
    MalformedRow(String),

    #[error("Unknown join mode '{0}' (expected 'joined' or 'separated')")]
    UnknownJoinMode(String),

    /// Chart configuration could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Notation table could not be read or parsed.
    #[error("Invalid notation table: {0}")]
    NotationError(String),
}
