//! Prediction of a single fully-resolved candidate week.

use crate::pattern::Pattern;
use crate::phase::Phase;
use crate::potential::PotentialWeek;
use crate::prices::Prices;
use crate::ticker::PriceTicker;
use tracing::trace;

/// Walks the periods of one resolved phase sequence, pruning the week if
/// any observed price falls outside its projected bracket and accumulating
/// the week's likelihood width from the prices that do fit.
pub(super) struct WeekPredictor<'t> {
    ticker: &'t PriceTicker,
    pattern: Pattern,

    pattern_weight: f64,
    permutation_count: usize,

    width: f64,
    prices_known: bool,
}

impl<'t> WeekPredictor<'t> {
    pub(super) fn new(ticker: &'t PriceTicker, pattern: Pattern) -> Self {
        WeekPredictor {
            ticker,
            pattern,
            pattern_weight: pattern.base_chance(ticker.previous_pattern),
            permutation_count: pattern.permutation_count(),
            width: 0.0,
            prices_known: false,
        }
    }

    /// Builds the candidate week, or `None` if an observed price rules it
    /// out. Returns the week together with its likelihood width.
    pub(super) fn predict(mut self, phases: &mut [Phase<'t>]) -> Option<(PotentialWeek, f64)> {
        let mut week = PotentialWeek::new(self.ticker.current_period);
        let mut period_index = 0usize;

        for phase_index in 0..phases.len() {
            let length = phases[phase_index].length();
            for sub_period in 0..length {
                let potential = phases[phase_index].potential_period(period_index, sub_period);
                let observed = self.ticker.prices[period_index];

                if !potential.is_valid_price(observed) {
                    trace!(
                        pattern = %self.pattern,
                        period = period_index,
                        observed,
                        min = potential.prices().min_price(),
                        max = potential.prices().max_price(),
                        "observed price outside bracket, pruning week"
                    );
                    return None;
                }

                let period = potential.period();
                week.analysis_mut()
                    .prices_mut()
                    .fold_period(period, potential.prices(), None);
                week.future_mut().fold_period(
                    period,
                    potential.prices(),
                    (observed != 0).then_some(observed),
                );
                week.spikes_mut().fold_period(period, potential.spikes());

                self.add_period_width(potential.prices(), observed);

                week.push_period(potential);
                period_index += 1;
            }
        }

        self.finalize_width(&mut week);
        Some((week, self.width))
    }

    /// Scores how likely this week is to have produced one observed price.
    ///
    /// A wide bracket dilutes each individual bell value, so the chance of
    /// the observed price is divided by the bracket size before weighting
    /// by the pattern's prior. Think of telling a d6 from a d20 by being
    /// shown a 5: the narrower die becomes the better explanation.
    fn add_period_width(&mut self, prices: &Prices, observed: i32) {
        if observed == 0 {
            return;
        }
        self.prices_known = true;

        let period_range = prices.max_price() - prices.min_price() + 1;
        let price_chance = prices.price_chance(observed);
        let mut period_width = 0.0;
        if price_chance != 0.0 {
            period_width = price_chance / f64::from(period_range);
        }

        period_width *= self.pattern_weight;
        self.width += period_width;
    }

    fn finalize_width(&mut self, week: &mut PotentialWeek) {
        // With no observed prices the week contributes only its prior. The
        // flag matters: a week that merely *could* happen may carry an
        // effective width of zero.
        if !self.prices_known {
            self.width = self.pattern_weight;
        }

        // Spread across the pattern's permutations; eliminating siblings
        // raises the survivors.
        self.width /= self.permutation_count as f64;

        // The width stands in as the chance until global normalization.
        week.analysis_mut().set_chance(self.width);
    }
}
