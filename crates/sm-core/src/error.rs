//! Error types for the prediction engine.
//!
//! Two failure classes exist. `ImpossibleTickerPrices` is user data that no
//! pattern can explain and is the only error `predict` returns. Everything
//! else is a violated interface contract; the fallible public entry points
//! (parsing, period conversion, time lookups) return them as `Err`, while
//! internal call sites that cannot be reached by correct callers panic with
//! the same message.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for prediction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the prediction engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("price periods must be between 0 and 11")]
    PeriodOutOfIndex,

    #[error("'Unknown' is not an in-game pattern and does not have a base chance")]
    UnknownBaseChanceInvalid,

    #[error("'Unknown' is not an in-game pattern and does not have a phase progression")]
    UnknownPhasesInvalid,

    #[error("trying to fetch possible lengths on a finalized price pattern phase")]
    PhaseLengthFinalized,

    #[error("pattern index value must be 0-4")]
    BadPatternIndex,

    #[error("could not parse pattern from string")]
    PatternStringValue,

    #[error("there are no price periods on sunday")]
    NoSundayPricePeriod,

    #[error("no price pattern could have produced the ticker's observed prices")]
    ImpossibleTickerPrices,
}

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Week-slot indexing and calendar conversion errors.
    Period,
    /// Pattern identification and parsing errors.
    Pattern,
    /// Phase enumeration contract errors.
    Phase,
    /// Inference over the supplied ticker.
    Inference,
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Codes are grouped by category:
    /// - 10-19: period errors
    /// - 20-29: pattern errors
    /// - 30-39: phase errors
    /// - 40-49: inference errors
    pub fn code(&self) -> u32 {
        match self {
            Error::PeriodOutOfIndex => 10,
            Error::NoSundayPricePeriod => 11,
            Error::UnknownBaseChanceInvalid => 20,
            Error::UnknownPhasesInvalid => 21,
            Error::BadPatternIndex => 22,
            Error::PatternStringValue => 23,
            Error::PhaseLengthFinalized => 30,
            Error::ImpossibleTickerPrices => 40,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::PeriodOutOfIndex | Error::NoSundayPricePeriod => ErrorCategory::Period,
            Error::UnknownBaseChanceInvalid
            | Error::UnknownPhasesInvalid
            | Error::BadPatternIndex
            | Error::PatternStringValue => ErrorCategory::Pattern,
            Error::PhaseLengthFinalized => ErrorCategory::Phase,
            Error::ImpossibleTickerPrices => ErrorCategory::Inference,
        }
    }

    /// Returns whether the error can be resolved by supplying different
    /// input data.
    ///
    /// Only `ImpossibleTickerPrices` qualifies: the caller can re-check the
    /// entered prices and predict again. Every other variant signals a
    /// caller bug.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ImpossibleTickerPrices)
    }
}
