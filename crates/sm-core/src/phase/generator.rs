//! Resumable sub-period price and bin-width generation.
//!
//! Compounding phases carry state from one sub-period to the next: the
//! multipliers step downward each half-day, observed prices tighten the
//! envelope, and the likelihood of riding an extreme bound multiplies up.
//! Computing a sub-period from scratch would redo every earlier one, so the
//! generator keeps the loop state and yields brackets strictly in order;
//! the phase cache stops it as soon as the requested sub-period is out.

use crate::prices::Prices;
use crate::spikes::SpikeFlags;
use crate::ticker::PriceTicker;
use sm_math::{next_after, round_bells};

use super::Behavior;

/// One produced sub-period: the bracket, its spike classification, and the
/// absolute week slot it covers.
pub(super) struct GeneratedPeriod {
    pub prices: Prices,
    pub flags: SpikeFlags,
    pub period_index: usize,
}

#[derive(Debug, Clone)]
pub(super) struct PeriodGenerator<'t> {
    ticker: &'t PriceTicker,
    behavior: &'static Behavior,
    compounding: bool,
    purchase_price: i32,
    start_index: usize,

    sub_period: usize,

    // Pattern-wide multiplier envelope for the current sub-period.
    base_min: f32,
    base_max: f32,
    // Envelope tightened by observed prices from earlier sub-periods.
    historical_min: f32,
    historical_max: f32,

    final_adjustment: i32,
    previous_price: i32,

    price_min: i32,
    price_max: i32,
    width_min: f64,
    width_max: f64,
}

impl<'t> PeriodGenerator<'t> {
    pub(super) fn new(
        behavior: &'static Behavior,
        ticker: &'t PriceTicker,
        purchase_price: i32,
        start_index: usize,
    ) -> Self {
        PeriodGenerator {
            ticker,
            behavior,
            compounding: behavior.adjust_multiplier.is_some(),
            purchase_price,
            start_index,
            sub_period: 0,
            base_min: 0.0,
            base_max: 0.0,
            historical_min: 0.0,
            historical_max: 0.0,
            final_adjustment: 0,
            previous_price: 0,
            price_min: 0,
            price_max: 0,
            width_min: 0.0,
            width_max: 0.0,
        }
    }

    /// Yields the next sub-period's bracket.
    pub(super) fn next_period(&mut self) -> GeneratedPeriod {
        let sub_period = self.sub_period;

        // Compounding multipliers carry over from the previous sub-period;
        // everything else re-reads the table.
        if !self.compounding || sub_period == 0 {
            let (min, max) = (self.behavior.base_multiplier)(sub_period);
            self.base_min = min;
            self.base_max = max;
            self.historical_min = min;
            self.historical_max = max;
        }
        self.final_adjustment = self
            .behavior
            .final_adjustment
            .map_or(0, |adjustment| adjustment(sub_period));

        // The bin widths are computed before the final adjustment: the
        // adjustment shifts the whole bracket uniformly, so the chance mass
        // belongs to the pre-adjusted endpoints. An endpoint's width is the
        // rounded price minus the continuous extreme, which is why a bound
        // sitting exactly on a representable product has a width of zero:
        // the multiplier roll would have to land on one float out of
        // millions.
        if !self.compounding || sub_period == 0 {
            let (price_min, width_min) = self.price_and_width(self.base_min);
            let (price_max, width_max) = self.price_and_width(self.base_max);
            self.price_min = price_min;
            self.width_min = width_min;
            self.price_max = price_max;
            self.width_max = width_max;
        }
        if self.compounding && sub_period > 0 {
            self.advance_compounding();
        }

        self.price_min += self.final_adjustment;
        self.price_max += self.final_adjustment;

        let generated = self.build_period(sub_period);

        // Remember the observed price of the period just produced; the next
        // sub-period's historical envelope derives from it.
        self.previous_price = self.ticker.prices[self.start_index + sub_period];
        self.sub_period += 1;

        generated
    }

    fn price_and_width(&self, multiplier: f32) -> (i32, f64) {
        let price = round_bells(self.purchase_price as f32 * multiplier);
        // The width math runs in f64; f32 would lose the sub-bell margins
        // the likelihood weighting is made of.
        let width = f64::from(price) - f64::from(self.purchase_price) * f64::from(multiplier);
        (price, width)
    }

    /// The tightened multiplier bound implied by a known previous price.
    fn historical_multiplier(&self, is_min: bool) -> f32 {
        // Prices never carry an adjustment during compounding phases in the
        // current game data; un-adjusting keeps the math valid if that
        // changes.
        let previous_price = self.previous_price - self.final_adjustment;

        // Recover the most extreme pre-rounding product that produces the
        // observed price: the price itself on the high side, one ulp above
        // price - 1 on the low side.
        let mut previous = previous_price as f32;
        if is_min {
            let floor = previous - 1.0;
            previous = next_after(floor, previous);
        }

        let mut multiplier = previous / self.purchase_price as f32;

        // One ulp of slack outward: the game's own rounding can otherwise
        // invert to a multiplier marginally outside the analytic bound and
        // eliminate a week that is actually possible.
        if is_min {
            multiplier = next_after(multiplier, multiplier - 0.001);
            if multiplier < self.base_min {
                multiplier = self.base_min;
            }
        } else {
            multiplier = next_after(multiplier, multiplier + 0.001);
            if multiplier > self.base_max {
                multiplier = self.base_max;
            }
        }

        multiplier
    }

    fn advance_compounding(&mut self) {
        // Observed prices reset the historical envelope before stepping, so
        // the clamp compares against the envelope of the period the price
        // was seen in.
        if self.previous_price != 0 {
            self.historical_min = self.historical_multiplier(true);
            self.historical_max = self.historical_multiplier(false);
        }

        // The game adds the step to the running multiplier one period at a
        // time. Collapsing the additions into `n * step` drifts the f32
        // accumulation and produces off-by-one bell prices, so the step is
        // applied exactly as the game applies it.
        let step = self
            .behavior
            .adjust_multiplier
            .expect("compounding phases carry a multiplier step");
        self.base_min = step(self.base_min, true);
        self.base_max = step(self.base_max, false);
        self.historical_min = step(self.historical_min, true);
        self.historical_max = step(self.historical_max, false);

        // Repeatedly riding an extreme bound is a compounding coincidence:
        // the sub-period widths multiply.
        let (price_min, sub_width_min) = self.price_and_width(self.historical_min);
        let (price_max, sub_width_max) = self.price_and_width(self.historical_max);
        self.price_min = price_min;
        self.price_max = price_max;
        self.width_min *= sub_width_min;
        self.width_max *= sub_width_max;
    }

    fn build_period(&self, sub_period: usize) -> GeneratedPeriod {
        let possibility_count = self.price_max - self.price_min + 1;

        // Every bell value strictly inside the bracket has a width of 1.
        let mid_width = f64::from(possibility_count - 2);
        let total_width = self.width_min + mid_width + self.width_max;

        let min_chance = self.width_min / total_width;
        let mid_chance = mid_width / total_width;
        let max_chance = self.width_max / total_width;

        let flags = self
            .behavior
            .spike
            .map_or_else(SpikeFlags::none, |spike| spike(sub_period));

        GeneratedPeriod {
            prices: Prices::new(self.price_min, self.price_max, min_chance, mid_chance, max_chance),
            flags,
            period_index: self.start_index + sub_period,
        }
    }
}
