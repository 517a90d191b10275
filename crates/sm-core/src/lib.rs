//! Stalk-market turnip price prediction.
//!
//! Given a week's partial price observations, the engine enumerates every
//! candidate week each of the four in-game price patterns can still
//! produce, scores them with bin-width likelihoods against the observed
//! prices, and returns normalized pattern chances, per-period price
//! bounds, spike timing probabilities, and an investment heat score.
//!
//! ```
//! use sm_core::{predict, Pattern, PricePeriod, PriceTicker};
//!
//! let mut ticker = PriceTicker::new(100, Pattern::Unknown, PricePeriod::new(2)?);
//! ticker.set_price(PricePeriod::new(0)?, 86);
//! ticker.set_price(PricePeriod::new(1)?, 90);
//! ticker.set_price(PricePeriod::new(2)?, 160);
//!
//! let prediction = predict(&ticker)?;
//! let big_spike = prediction.patterns().get(Pattern::BigSpike).unwrap();
//! assert_eq!(big_spike.chance(), 1.0);
//! # Ok::<(), sm_core::Error>(())
//! ```
//!
//! Every call is a pure function of its ticker: no global state, no I/O.

pub mod error;
pub mod pattern;
pub mod period;
pub mod potential;
pub mod prediction;
pub mod prices;
pub mod spikes;
pub mod ticker;

mod phase;
mod predictor;

pub use error::{Error, ErrorCategory, Result};
pub use pattern::{Pattern, GAME_PATTERNS};
pub use period::{PricePeriod, TimeOfDay, PRICE_PERIOD_COUNT};
pub use potential::{PotentialPattern, PotentialPricePeriod, PotentialWeek};
pub use prediction::{Patterns, Prediction};
pub use prices::{Analysis, PriceSeries, Prices};
pub use spikes::{SpikeChance, SpikeChanceSet, SpikeFlags, SpikeRange, SpikeRangeSet};
pub use ticker::PriceTicker;

/// Predicts the week's possible prices and pattern chances for a ticker.
///
/// This is the engine's single entry point. It fails only with
/// [`Error::ImpossibleTickerPrices`], when no pattern can explain the
/// observed prices.
pub fn predict(ticker: &PriceTicker) -> Result<Prediction> {
    predictor::predict(ticker)
}
