//! Weekly price patterns and their transition probabilities.

use crate::error::{Error, Result};
use crate::phase::{self, Phase};
use crate::ticker::PriceTicker;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The transition matrix from last week's pattern (row) to this week's
/// pattern (column, game patterns only).
///
/// The `Unknown` row is the chance-weighted average of the four known rows:
/// summing each column of the in-game matrix and dividing by the total
/// yields how likely each pattern is when last week was not recorded.
const BASE_CHANCES: [[f64; 4]; 5] = [
    // Fluctuating
    [0.20, 0.30, 0.15, 0.35],
    // Big Spike
    [0.50, 0.05, 0.20, 0.25],
    // Decreasing
    [0.25, 0.45, 0.05, 0.25],
    // Small Spike
    [0.45, 0.25, 0.15, 0.15],
    // Unknown
    [0.35, 0.2625, 0.1375, 0.25],
];

/// One of the four weekly price behaviours, plus `Unknown` for an
/// unrecorded previous week.
///
/// `Unknown` is only valid as a *previous* pattern: asking it for a base
/// chance or a phase progression is a caller bug and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Fluctuating = 0,
    BigSpike = 1,
    Decreasing = 2,
    SmallSpike = 3,
    Unknown = 4,
}

/// The four patterns the game can actually roll, in index order.
pub const GAME_PATTERNS: [Pattern; 4] = [
    Pattern::Fluctuating,
    Pattern::BigSpike,
    Pattern::Decreasing,
    Pattern::SmallSpike,
];

impl Pattern {
    /// All five variants, including `Unknown`, in index order.
    pub fn all() -> &'static [Pattern] {
        &[
            Pattern::Fluctuating,
            Pattern::BigSpike,
            Pattern::Decreasing,
            Pattern::SmallSpike,
            Pattern::Unknown,
        ]
    }

    /// Matrix index of this pattern.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The chance of this pattern occurring given last week's pattern.
    ///
    /// # Panics
    ///
    /// Panics if called on `Unknown`, which is not an in-game pattern.
    pub fn base_chance(&self, previous: Pattern) -> f64 {
        if *self == Pattern::Unknown {
            panic!("{}", Error::UnknownBaseChanceInvalid);
        }
        BASE_CHANCES[previous.index()][self.index()]
    }

    /// The total number of phase-length combinations this pattern can take.
    ///
    /// Once observed prices eliminate combinations, the surviving count over
    /// this total feeds the pattern's refined chance.
    ///
    /// # Panics
    ///
    /// Panics if called on `Unknown`.
    pub fn permutation_count(&self) -> usize {
        match self {
            Pattern::Fluctuating => 56,
            Pattern::BigSpike => 7,
            Pattern::Decreasing => 1,
            Pattern::SmallSpike => 8,
            Pattern::Unknown => panic!("{}", Error::UnknownPhasesInvalid),
        }
    }

    /// A fresh, un-enumerated phase progression for this pattern.
    ///
    /// # Panics
    ///
    /// Panics if called on `Unknown`.
    pub(crate) fn progression<'t>(&self, ticker: &'t PriceTicker) -> Vec<Phase<'t>> {
        match self {
            Pattern::Fluctuating => phase::fluctuating_progression(ticker),
            Pattern::BigSpike => phase::big_spike_progression(ticker),
            Pattern::Decreasing => phase::decreasing_progression(ticker),
            Pattern::SmallSpike => phase::small_spike_progression(ticker),
            Pattern::Unknown => panic!("{}", Error::UnknownPhasesInvalid),
        }
    }
}

impl TryFrom<usize> for Pattern {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Pattern::Fluctuating),
            1 => Ok(Pattern::BigSpike),
            2 => Ok(Pattern::Decreasing),
            3 => Ok(Pattern::SmallSpike),
            4 => Ok(Pattern::Unknown),
            _ => Err(Error::BadPatternIndex),
        }
    }
}

impl FromStr for Pattern {
    type Err = Error;

    /// Parses a pattern name, ignoring case and whitespace, so
    /// "Big Spike", "BIGSPIKE" and " big spike " all parse alike.
    fn from_str(value: &str) -> Result<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "FLUCTUATING" => Ok(Pattern::Fluctuating),
            "BIGSPIKE" => Ok(Pattern::BigSpike),
            "DECREASING" => Ok(Pattern::Decreasing),
            "SMALLSPIKE" => Ok(Pattern::SmallSpike),
            "UNKNOWN" => Ok(Pattern::Unknown),
            _ => Err(Error::PatternStringValue),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pattern::Fluctuating => "Fluctuating",
            Pattern::BigSpike => "Big Spike",
            Pattern::Decreasing => "Decreasing",
            Pattern::SmallSpike => "Small Spike",
            Pattern::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}
