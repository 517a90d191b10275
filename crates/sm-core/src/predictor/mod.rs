//! The top-level prediction pipeline.
//!
//! Each of the four game patterns is enumerated independently against the
//! read-only ticker, the surviving weeks fold into per-pattern and
//! prediction-level summaries, and a final pass normalizes the accumulated
//! probability widths into chances, spike densities and the heat score.

mod chances;
mod heat;
mod pattern;
mod week;

use crate::error::{Error, Result};
use crate::pattern::GAME_PATTERNS;
use crate::prediction::Prediction;
use crate::ticker::PriceTicker;
use pattern::PatternPredictor;
use tracing::debug;

/// Predicts everything the ticker's observed prices still allow.
///
/// Returns `ImpossibleTickerPrices` when no pattern has any surviving
/// week; a partially-filled prediction is never returned.
pub(crate) fn predict(ticker: &PriceTicker) -> Result<Prediction> {
    let mut prediction = Prediction::new(ticker.current_period);
    let mut total_width = 0.0;
    let mut any_viable = false;

    for pattern in GAME_PATTERNS {
        let (potential, width) = PatternPredictor::new(ticker, pattern).predict();
        debug!(
            pattern = %pattern,
            weeks = potential.weeks().len(),
            width,
            "pattern enumerated"
        );

        if !potential.weeks().is_empty() {
            any_viable = true;
        }

        prediction.prices_mut().fold_series(potential.prices());
        prediction.future_mut().fold_series(potential.future());
        prediction.spikes_mut().fold_ranges(potential.spikes());
        total_width += width;
        prediction.patterns_mut().push(potential);
    }

    if !any_viable {
        return Err(Error::ImpossibleTickerPrices);
    }

    chances::normalize(total_width, ticker, &mut prediction);
    let heat = heat::calculate(&prediction, ticker.current_period);
    prediction.set_heat(heat);

    Ok(prediction)
}
