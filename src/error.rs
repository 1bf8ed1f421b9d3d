//! Errors that can occur while deriving paths, listing products or extracting signals.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// All the errors this crate reports.
pub enum Error {
    /// The code path does not sit in the `<root>/code/<any>/<season>/RSR/<process>` hierarchy.
    #[error("invalid working-directory convention for {path}: {reason}")]
    InvalidConvention {
        /// The offending path
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// A `season_flight_pst` row with fewer than three columns.
    #[error("{path}:{line}: expected at least 3 columns (pst, flight, season)")]
    MalformedRow {
        /// The table file
        path: PathBuf,
        /// 1-based line number
        line: u64,
    },

    /// No table row carries the requested PST.
    #[error("PST {pst} not found in {table}")]
    PstNotFound {
        /// The PST looked up
        pst: String,
        /// The table that was searched
        table: PathBuf,
    },

    /// A time-reference mapping without the requested key.
    #[error("{path} has no `{field}` field")]
    MissingField {
        /// The ztim file
        path: PathBuf,
        /// The missing key
        field: &'static str,
    },

    /// Mismatched or empty arrays handed to the interpolator.
    #[error("cannot interpolate: {0}")]
    Interpolation(String),

    /// A pick with more samples than the surface-range reference.
    #[error("pick {pik} for {pst} has {pik_len} samples, more than the {range_len} of the range reference")]
    PikTooLong {
        /// The PST
        pst: String,
        /// The pick name
        pik: String,
        /// Samples in the pick
        pik_len: usize,
        /// Samples in the surface-range reference
        range_len: usize,
    },

    /// Declared operations with no implementation yet.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("{0}")]
    /// Error derived from [`glob::PatternError`]
    Pattern(#[from] glob::PatternError),

    #[error("{0}")]
    /// Error derived from [`csv::Error`]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    /// Error derived from [`std::io::Error`]
    IO(#[from] std::io::Error),

    /// A failure reported by a [`crate::ProductReader`] implementation.
    #[error(transparent)]
    Reader(#[from] anyhow::Error),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
