//! Candidate price periods, weeks and patterns surviving the enumeration.

use crate::error::Result;
use crate::pattern::Pattern;
use crate::period::{PricePeriod, TimeOfDay};
use crate::prices::{Analysis, PriceSeries, Prices};
use crate::spikes::{SpikeFlags, SpikeRangeSet};
use chrono::{NaiveDateTime, Weekday};
use serde::Serialize;

/// The projected price bracket of one period under one candidate week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialPricePeriod {
    prices: Prices,
    spikes: SpikeFlags,
    period: PricePeriod,
    /// Display name of the phase that produced this bracket. Diagnostic
    /// only; two phases of a pattern may share a name.
    phase_name: &'static str,
}

impl PotentialPricePeriod {
    pub(crate) fn new(
        prices: Prices,
        spikes: SpikeFlags,
        period: PricePeriod,
        phase_name: &'static str,
    ) -> Self {
        PotentialPricePeriod {
            prices,
            spikes,
            period,
            phase_name,
        }
    }

    /// The bracket and its bin-width chances.
    pub fn prices(&self) -> &Prices {
        &self.prices
    }

    /// Spike classification of this period.
    pub fn spikes(&self) -> &SpikeFlags {
        &self.spikes
    }

    /// The absolute week slot this bracket covers.
    pub fn period(&self) -> PricePeriod {
        self.period
    }

    /// The producing phase's display name.
    pub fn phase_name(&self) -> &'static str {
        self.phase_name
    }

    /// Whether an observed price is consistent with this bracket. An
    /// unobserved price (0) is consistent with anything.
    pub fn is_valid_price(&self, price: i32) -> bool {
        price == 0 || (price >= self.prices.min_price() && price <= self.prices.max_price())
    }
}

/// One fully-resolved candidate week: twelve projected periods and their
/// aggregate analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialWeek {
    analysis: Analysis,
    future: PriceSeries,
    spikes: SpikeRangeSet,
    periods: Vec<PotentialPricePeriod>,
}

impl PotentialWeek {
    pub(crate) fn new(current_period: PricePeriod) -> Self {
        PotentialWeek {
            analysis: Analysis::default(),
            future: PriceSeries::future(current_period),
            spikes: SpikeRangeSet::default(),
            periods: Vec::new(),
        }
    }

    /// The probability of this exact week, normalized across the whole
    /// prediction.
    pub fn chance(&self) -> f64 {
        self.analysis.chance()
    }

    /// Aggregate price bounds over the whole week.
    pub fn prices(&self) -> &PriceSeries {
        self.analysis.prices()
    }

    /// Aggregate price bounds over the current period and later.
    pub fn future(&self) -> &PriceSeries {
        &self.future
    }

    /// When this week's spikes can land.
    pub fn spikes(&self) -> &SpikeRangeSet {
        &self.spikes
    }

    /// The twelve projected periods in week order.
    pub fn periods(&self) -> &[PotentialPricePeriod] {
        &self.periods
    }

    /// The projected period for a weekday and half-day.
    pub fn period_for_day(
        &self,
        weekday: Weekday,
        tod: TimeOfDay,
    ) -> Result<&PotentialPricePeriod> {
        let period = PricePeriod::from_day(weekday, tod)?;
        Ok(&self.periods[period.index()])
    }

    /// The projected period covering a wall-clock time.
    pub fn period_at_time(&self, when: NaiveDateTime) -> Result<&PotentialPricePeriod> {
        let period = PricePeriod::from_datetime(when)?;
        Ok(&self.periods[period.index()])
    }

    pub(crate) fn analysis_mut(&mut self) -> &mut Analysis {
        &mut self.analysis
    }

    pub(crate) fn future_mut(&mut self) -> &mut PriceSeries {
        &mut self.future
    }

    pub(crate) fn spikes_mut(&mut self) -> &mut SpikeRangeSet {
        &mut self.spikes
    }

    pub(crate) fn push_period(&mut self, period: PotentialPricePeriod) {
        self.periods.push(period);
    }
}

/// Everything one pattern can still produce: its surviving weeks and their
/// aggregate bounds, spikes and chance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialPattern {
    pattern: Pattern,
    analysis: Analysis,
    future: PriceSeries,
    spikes: SpikeRangeSet,
    weeks: Vec<PotentialWeek>,
}

impl PotentialPattern {
    pub(crate) fn new(pattern: Pattern, current_period: PricePeriod) -> Self {
        PotentialPattern {
            pattern,
            analysis: Analysis::default(),
            future: PriceSeries::future(current_period),
            spikes: SpikeRangeSet::default(),
            weeks: Vec::new(),
        }
    }

    /// Which pattern this is.
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// The refined probability of this pattern, given the observed prices.
    pub fn chance(&self) -> f64 {
        self.analysis.chance()
    }

    /// Aggregate price bounds over all surviving weeks.
    pub fn prices(&self) -> &PriceSeries {
        self.analysis.prices()
    }

    /// Aggregate price bounds restricted to the current period and later.
    pub fn future(&self) -> &PriceSeries {
        &self.future
    }

    /// When this pattern's spikes can land.
    pub fn spikes(&self) -> &SpikeRangeSet {
        &self.spikes
    }

    /// The weeks that survived the observed prices. Empty when the ticker
    /// rules the pattern out.
    pub fn weeks(&self) -> &[PotentialWeek] {
        &self.weeks
    }

    pub(crate) fn analysis_mut(&mut self) -> &mut Analysis {
        &mut self.analysis
    }

    pub(crate) fn weeks_mut(&mut self) -> &mut [PotentialWeek] {
        &mut self.weeks
    }

    pub(crate) fn add_week(&mut self, week: PotentialWeek) {
        self.analysis.prices_mut().fold_series(week.prices());
        self.future.fold_series(week.future());
        self.spikes.fold_range(week.spikes());
        self.weeks.push(week);
    }
}
