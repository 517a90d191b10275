//! The full prediction returned to the caller.

use crate::pattern::Pattern;
use crate::period::PricePeriod;
use crate::potential::PotentialPattern;
use crate::prices::PriceSeries;
use crate::spikes::SpikeChanceSet;
use serde::Serialize;

/// The four per-pattern predictions, in game-pattern order.
///
/// Every pattern is always present; a pattern the observed prices rule out
/// simply holds no weeks and a chance of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Patterns(Vec<PotentialPattern>);

impl Patterns {
    /// The prediction for one pattern. `None` only for `Unknown`.
    pub fn get(&self, pattern: Pattern) -> Option<&PotentialPattern> {
        self.0.iter().find(|p| p.pattern() == pattern)
    }

    /// Iterates the patterns in game order.
    pub fn iter(&self) -> impl Iterator<Item = &PotentialPattern> {
        self.0.iter()
    }

    /// How many patterns still have at least one surviving week.
    pub fn viable_count(&self) -> usize {
        self.0.iter().filter(|p| !p.weeks().is_empty()).count()
    }

    pub(crate) fn push(&mut self, pattern: PotentialPattern) {
        self.0.push(pattern);
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PotentialPattern> {
        self.0.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Patterns {
    type Item = &'a PotentialPattern;
    type IntoIter = std::slice::Iter<'a, PotentialPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A complete prediction for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    patterns: Patterns,
    prices: PriceSeries,
    future: PriceSeries,
    spikes: SpikeChanceSet,
    heat: i32,
}

impl Prediction {
    pub(crate) fn new(current_period: PricePeriod) -> Self {
        Prediction {
            patterns: Patterns::default(),
            prices: PriceSeries::default(),
            future: PriceSeries::future(current_period),
            spikes: SpikeChanceSet::default(),
            heat: 0,
        }
    }

    /// Per-pattern predictions.
    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    /// Price bounds over every pattern and period.
    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    /// Price bounds restricted to the current period and later.
    pub fn future(&self) -> &PriceSeries {
        &self.future
    }

    /// Spike ranges, chances and per-period timing probabilities.
    pub fn spikes(&self) -> &SpikeChanceSet {
        &self.spikes
    }

    /// The lowest price any candidate week can produce.
    pub fn min_price(&self) -> i32 {
        self.prices.min_price()
    }

    /// The best price the holder is assured of somewhere this week.
    pub fn guaranteed_price(&self) -> i32 {
        self.prices.guaranteed_price()
    }

    /// The highest price any candidate week can produce.
    pub fn max_price(&self) -> i32 {
        self.prices.max_price()
    }

    /// The sorted periods achieving `min_price`.
    pub fn min_periods(&self) -> Vec<PricePeriod> {
        self.prices.min_periods()
    }

    /// The sorted periods achieving `guaranteed_price`.
    pub fn guaranteed_periods(&self) -> Vec<PricePeriod> {
        self.prices.guaranteed_periods()
    }

    /// The sorted periods achieving `max_price`.
    pub fn max_periods(&self) -> Vec<PricePeriod> {
        self.prices.max_periods()
    }

    /// A scalar summary of the expected return, weighted toward imminent
    /// spikes.
    pub fn heat(&self) -> i32 {
        self.heat
    }

    pub(crate) fn patterns_mut(&mut self) -> &mut Patterns {
        &mut self.patterns
    }

    pub(crate) fn prices_mut(&mut self) -> &mut PriceSeries {
        &mut self.prices
    }

    pub(crate) fn future_mut(&mut self) -> &mut PriceSeries {
        &mut self.future
    }

    pub(crate) fn spikes_mut(&mut self) -> &mut SpikeChanceSet {
        &mut self.spikes
    }

    pub(crate) fn set_heat(&mut self, heat: i32) {
        self.heat = heat;
    }

    pub(crate) fn split_patterns_and_spikes(
        &mut self,
    ) -> (&mut Patterns, &mut SpikeChanceSet) {
        (&mut self.patterns, &mut self.spikes)
    }
}
