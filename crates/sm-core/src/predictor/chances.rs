//! Conversion of accumulated probability widths into normalized chances.

use crate::pattern::Pattern;
use crate::prediction::Prediction;
use crate::ticker::PriceTicker;
use sm_math::round_chance;
use tracing::warn;

/// Normalizes every pattern and week chance against the total accumulated
/// width, then fills in the spike chances and timing densities.
pub(super) fn normalize(total_width: f64, ticker: &PriceTicker, prediction: &mut Prediction) {
    let mut total = total_width;

    // A ticker can sit so deep in a pattern's tail that every width
    // underflows to zero. Chances then fall back to survivor counting over
    // the permutation totals, weighted by the base chances.
    if total <= 0.0 {
        warn!(
            total_width = total,
            "probability width underflow, falling back to permutation counting"
        );
        total = fall_back_to_permutation_count(ticker, prediction);
    }

    let (patterns, spikes) = prediction.split_patterns_and_spikes();

    let mut big_chance = 0.0;
    let mut small_chance = 0.0;
    for pattern in patterns.iter_mut() {
        let chance = round_chance(pattern.chance() / total);
        pattern.analysis_mut().set_chance(chance);
        for week in pattern.weeks_mut() {
            let week_chance = round_chance(week.chance() / total);
            week.analysis_mut().set_chance(week_chance);
        }

        match pattern.pattern() {
            Pattern::BigSpike => big_chance = chance,
            Pattern::SmallSpike => small_chance = chance,
            _ => {}
        }
    }

    // Densities accumulate normalized week chances, so they run after the
    // loop above.
    for pattern in patterns.iter() {
        for week in pattern.weeks() {
            spikes.add_week_density(week);
        }
    }

    // The spike chances reuse the pattern chances verbatim; computing them
    // separately lets float drift present a spike chance that disagrees
    // with the pattern chance right next to it.
    spikes.set_chances(big_chance, small_chance);
}

/// Recomputes each pattern's width as
/// `base_chance * surviving_weeks / permutation_count` and returns the new
/// total.
fn fall_back_to_permutation_count(ticker: &PriceTicker, prediction: &mut Prediction) -> f64 {
    let mut total = 0.0;
    for pattern in prediction.patterns_mut().iter_mut() {
        let tag = pattern.pattern();
        let chance = tag.base_chance(ticker.previous_pattern) * pattern.weeks().len() as f64
            / tag.permutation_count() as f64;
        pattern.analysis_mut().set_chance(chance);
        total += chance;
    }
    total
}
