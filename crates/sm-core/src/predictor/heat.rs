//! The investment heat score.

use crate::pattern::Pattern;
use crate::period::{PricePeriod, PRICE_PERIOD_COUNT};
use crate::prediction::Prediction;

/// Heat contribution of one breakdown bin, zero once the week runs out.
fn period_heat(
    index: usize,
    breakdown: &[f64; PRICE_PERIOD_COUNT],
    multiplier: f64,
) -> f64 {
    if index < breakdown.len() {
        breakdown[index] * multiplier
    } else {
        0.0
    }
}

/// A multiplier rewarding a spike landing in the next three periods.
///
/// A spike possible right now is worth twice one possible in either of the
/// following periods, so a below-average spike underway still mostly
/// out-shines a certain spike a period away.
fn spike_multiplier(
    current_period: PricePeriod,
    breakdown: &[f64; PRICE_PERIOD_COUNT],
) -> f64 {
    let current = current_period.index();
    1.0 + period_heat(current, breakdown, 0.4)
        + period_heat(current + 1, breakdown, 0.2)
        + period_heat(current + 2, breakdown, 0.2)
}

/// Scores the expected return of holding: for each pattern, the average of
/// its future maximum and guaranteed prices, weighted by the pattern's
/// chance and boosted for imminent spikes, summed and rounded.
pub(super) fn calculate(prediction: &Prediction, current_period: PricePeriod) -> i32 {
    let mut heat = 0.0f64;

    for pattern in prediction.patterns() {
        let price_average =
            pattern.future().max_price() + pattern.future().guaranteed_price();
        let mut base_heat = f64::from(price_average) / 2.0 * pattern.chance();

        match pattern.pattern() {
            Pattern::BigSpike => {
                base_heat *=
                    spike_multiplier(current_period, prediction.spikes().big().breakdown());
            }
            Pattern::SmallSpike => {
                base_heat *=
                    spike_multiplier(current_period, prediction.spikes().small().breakdown());
            }
            _ => {}
        }

        heat += base_heat;
    }

    heat.round() as i32
}
