//! Spike classification, ranges and timing probabilities.
//!
//! A spike is a period whose potential price clears the purchase price by a
//! large factor. The Big Spike pattern peaks for exactly one period; the
//! Small Spike pattern holds an elevated price for the peak and both
//! adjacent half-days. Everything here is tracked three ways: big, small,
//! and either ("any").

use crate::period::{PricePeriod, PRICE_PERIOD_COUNT};
use crate::potential::PotentialWeek;
use serde::Serialize;

/// Spike classification of a single period.
///
/// `big` and `small` each imply `any` and never hold together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpikeFlags {
    any: bool,
    big: bool,
    small: bool,
}

impl SpikeFlags {
    pub(crate) fn none() -> Self {
        SpikeFlags::default()
    }

    pub(crate) fn big() -> Self {
        SpikeFlags {
            any: true,
            big: true,
            small: false,
        }
    }

    pub(crate) fn small() -> Self {
        SpikeFlags {
            any: true,
            big: false,
            small: true,
        }
    }

    /// Whether this period can spike at all.
    pub fn has_any(&self) -> bool {
        self.any
    }

    /// Whether this period is the Big Spike peak.
    pub fn has_big(&self) -> bool {
        self.big
    }

    /// Whether this period sits in the Small Spike plateau.
    pub fn has_small(&self) -> bool {
        self.small
    }
}

/// The contiguous stretch of periods in which one kind of spike can land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpikeRange {
    has: bool,
    start: PricePeriod,
    end: PricePeriod,
}

impl SpikeRange {
    /// Whether this spike kind is possible at all.
    pub fn has(&self) -> bool {
        self.has
    }

    /// First period the spike could land on. Period 0 when `has` is false.
    pub fn start(&self) -> PricePeriod {
        self.start
    }

    /// Last period (inclusive) the spike could land on.
    pub fn end(&self) -> PricePeriod {
        self.end
    }

    /// Whether `period` falls inside the range.
    pub fn contains(&self, period: PricePeriod) -> bool {
        self.has && period >= self.start && period <= self.end
    }

    fn widen_to_period(&mut self, period: PricePeriod) {
        if !self.has || period < self.start {
            self.start = period;
        }
        if period > self.end {
            self.end = period;
        }
        self.has = true;
    }

    fn widen_to_range(&mut self, other: &SpikeRange) {
        if !other.has {
            return;
        }
        if !self.has || other.start < self.start {
            self.start = other.start;
        }
        if other.end > self.end {
            self.end = other.end;
        }
        self.has = true;
    }
}

/// Big, small and any spike ranges for one week, pattern or prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpikeRangeSet {
    any: SpikeRange,
    big: SpikeRange,
    small: SpikeRange,
}

impl SpikeRangeSet {
    pub fn any(&self) -> &SpikeRange {
        &self.any
    }

    pub fn big(&self) -> &SpikeRange {
        &self.big
    }

    pub fn small(&self) -> &SpikeRange {
        &self.small
    }

    /// Folds one period's spike flags into the ranges.
    pub(crate) fn fold_period(&mut self, period: PricePeriod, flags: &SpikeFlags) {
        if flags.has_any() {
            self.any.widen_to_period(period);
        }
        if flags.has_big() {
            self.big.widen_to_period(period);
        }
        if flags.has_small() {
            self.small.widen_to_period(period);
        }
    }

    /// Folds a child's ranges into these (week into pattern, pattern into
    /// prediction).
    pub(crate) fn fold_range(&mut self, other: &SpikeRangeSet) {
        self.any.widen_to_range(&other.any);
        self.big.widen_to_range(&other.big);
        self.small.widen_to_range(&other.small);
    }
}

/// A spike range plus its overall chance and per-period timing
/// probabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpikeChance {
    #[serde(flatten)]
    range: SpikeRange,
    chance: f64,
    breakdown: [f64; PRICE_PERIOD_COUNT],
}

impl SpikeChance {
    /// Whether this spike kind is possible at all.
    pub fn has(&self) -> bool {
        self.range.has()
    }

    /// First period the spike could land on.
    pub fn start(&self) -> PricePeriod {
        self.range.start()
    }

    /// Last period (inclusive) the spike could land on.
    pub fn end(&self) -> PricePeriod {
        self.range.end()
    }

    /// The overall chance of this spike kind occurring this week.
    ///
    /// For big and small this is exactly the matching pattern's chance.
    /// The small-spike breakdown counts its three plateau periods
    /// separately, so that breakdown sums to three times this value.
    pub fn chance(&self) -> f64 {
        self.chance
    }

    /// Per-period probability that the spike covers that period.
    pub fn breakdown(&self) -> &[f64; PRICE_PERIOD_COUNT] {
        &self.breakdown
    }
}

/// The big/small/any spike summary of a whole prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpikeChanceSet {
    any: SpikeChance,
    big: SpikeChance,
    small: SpikeChance,
}

impl SpikeChanceSet {
    pub fn any(&self) -> &SpikeChance {
        &self.any
    }

    pub fn big(&self) -> &SpikeChance {
        &self.big
    }

    pub fn small(&self) -> &SpikeChance {
        &self.small
    }

    /// Folds a pattern's spike ranges into the summary ranges.
    pub(crate) fn fold_ranges(&mut self, ranges: &SpikeRangeSet) {
        self.any.range.widen_to_range(ranges.any());
        self.big.range.widen_to_range(ranges.big());
        self.small.range.widen_to_range(ranges.small());
    }

    /// Records the big and small pattern chances verbatim, so the spike
    /// numbers can never drift from the pattern numbers they summarize.
    pub(crate) fn set_chances(&mut self, big: f64, small: f64) {
        self.big.chance = big;
        self.small.chance = small;
        self.any.chance = big + small;
    }

    /// Accumulates one normalized week into the timing breakdowns.
    ///
    /// Every period of the week's any-spike range receives the week's
    /// chance in the breakdowns whose ranges cover it. Must run after
    /// chance normalization; the bins are probabilities, not widths.
    pub(crate) fn add_week_density(&mut self, week: &PotentialWeek) {
        let ranges = week.spikes();
        if !ranges.any().has() {
            return;
        }
        let chance = week.chance();

        let start = ranges.any().start().index();
        let end = ranges.any().end().index();
        for index in start..=end {
            let period = PricePeriod::from_index_unchecked(index);
            let mut contains = false;
            if ranges.small().contains(period) {
                self.small.breakdown[index] += chance;
                contains = true;
            }
            if ranges.big().contains(period) {
                self.big.breakdown[index] += chance;
                contains = true;
            }
            if contains {
                self.any.breakdown[index] += chance;
            }
        }
    }
}
