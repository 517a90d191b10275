//! Price bounds and their aggregation across periods, weeks and patterns.

use crate::period::PricePeriod;
use serde::Serialize;
use std::collections::BTreeSet;

/// The price bracket of a single period, with the bin-width chances of
/// landing on each part of it.
///
/// At the period level the guaranteed price *is* the minimum: the lowest
/// price the period can produce. The three chances decompose the bracket
/// into its minimum bell value, everything in between, and its maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Prices {
    min_price: i32,
    guaranteed_price: i32,
    max_price: i32,

    min_chance: f64,
    mid_chance: f64,
    max_chance: f64,
}

impl Prices {
    pub(crate) fn new(
        min_price: i32,
        max_price: i32,
        min_chance: f64,
        mid_chance: f64,
        max_chance: f64,
    ) -> Self {
        Prices {
            min_price,
            guaranteed_price: min_price,
            max_price,
            min_chance,
            mid_chance,
            max_chance,
        }
    }

    /// Combines a low-purchase-price run and a high-purchase-price run
    /// into one bracket, for tickers whose Sunday price was not recorded.
    ///
    /// The low run bounds the minimum and its chance; the high run bounds
    /// the maximum; the middle absorbs the remainder.
    pub(crate) fn stitch_unknown_purchase(low: &Prices, high: &Prices) -> Prices {
        Prices::new(
            low.min_price,
            high.max_price,
            low.min_chance,
            1.0 - low.min_chance - high.max_chance,
            high.max_chance,
        )
    }

    /// The lowest price this bracket can produce.
    pub fn min_price(&self) -> i32 {
        self.min_price
    }

    /// The price guaranteed to be reachable. Identical to `min_price` at
    /// the period level.
    pub fn guaranteed_price(&self) -> i32 {
        self.guaranteed_price
    }

    /// The highest price this bracket can produce.
    pub fn max_price(&self) -> i32 {
        self.max_price
    }

    pub fn min_chance(&self) -> f64 {
        self.min_chance
    }

    pub fn mid_chance(&self) -> f64 {
        self.mid_chance
    }

    pub fn max_chance(&self) -> f64 {
        self.max_chance
    }

    /// The chance of this bracket producing the given price.
    ///
    /// The endpoints carry their bin widths; every interior bell value
    /// shares the mid chance.
    pub fn price_chance(&self, price: i32) -> f64 {
        if price == self.max_price {
            self.max_chance
        } else if price == self.min_price {
            self.min_chance
        } else {
            self.mid_chance
        }
    }
}

/// Which periods an aggregated series covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum Horizon {
    /// Every period of the week.
    FullWeek,
    /// Only the current period and later; the current period's observed
    /// price, when known, overrides the computed bracket.
    From(PricePeriod),
}

/// Aggregated price bounds over a container of periods, weeks or patterns,
/// with the sorted sets of periods achieving each extremum.
///
/// Folding a child whose value ties an extremum extends the matching
/// period set; improving an extremum replaces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    min_price: i32,
    guaranteed_price: i32,
    max_price: i32,

    min_periods: BTreeSet<PricePeriod>,
    guaranteed_periods: BTreeSet<PricePeriod>,
    max_periods: BTreeSet<PricePeriod>,

    horizon: Horizon,
}

impl Default for PriceSeries {
    fn default() -> Self {
        Self::with_horizon(Horizon::FullWeek)
    }
}

impl PriceSeries {
    fn with_horizon(horizon: Horizon) -> Self {
        PriceSeries {
            min_price: 0,
            guaranteed_price: 0,
            max_price: 0,
            min_periods: BTreeSet::new(),
            guaranteed_periods: BTreeSet::new(),
            max_periods: BTreeSet::new(),
            horizon,
        }
    }

    /// A series restricted to `current` and later periods.
    pub(crate) fn future(current: PricePeriod) -> Self {
        Self::with_horizon(Horizon::From(current))
    }

    /// The lowest price any child can produce. 0 until a child is folded.
    pub fn min_price(&self) -> i32 {
        self.min_price
    }

    /// The best price the holder is assured of. Within a week this is the
    /// highest period minimum; across weeks and patterns it is the lowest
    /// such assurance among the candidates that could be real.
    pub fn guaranteed_price(&self) -> i32 {
        self.guaranteed_price
    }

    /// The highest price any child can produce.
    pub fn max_price(&self) -> i32 {
        self.max_price
    }

    /// The sorted periods achieving `min_price`.
    pub fn min_periods(&self) -> Vec<PricePeriod> {
        self.min_periods.iter().copied().collect()
    }

    /// The sorted periods achieving `guaranteed_price`.
    pub fn guaranteed_periods(&self) -> Vec<PricePeriod> {
        self.guaranteed_periods.iter().copied().collect()
    }

    /// The sorted periods achieving `max_price`.
    pub fn max_periods(&self) -> Vec<PricePeriod> {
        self.max_periods.iter().copied().collect()
    }

    fn update_min(&mut self, value: i32) -> bool {
        let updated = value != 0 && (self.min_price == 0 || value < self.min_price);
        if updated {
            self.min_price = value;
        }
        updated
    }

    fn update_guaranteed(&mut self, value: i32, use_higher: bool) -> bool {
        let updated = value != 0
            && (self.guaranteed_price == 0
                || (use_higher && value > self.guaranteed_price)
                || (!use_higher && value < self.guaranteed_price));
        if updated {
            self.guaranteed_price = value;
        }
        updated
    }

    fn update_max(&mut self, value: i32) -> bool {
        let updated = value > self.max_price;
        if updated {
            self.max_price = value;
        }
        updated
    }

    /// Folds one period's bracket into a week-scope series.
    ///
    /// The week's guaranteed price is the *highest* period minimum: the
    /// best price the week is certain to offer at some point. A future
    /// series skips periods already in the past and pins the current
    /// period to its observed price when one is known.
    pub(crate) fn fold_period(
        &mut self,
        period: PricePeriod,
        prices: &Prices,
        observed: Option<i32>,
    ) {
        let (min, guaranteed, max) = match self.horizon {
            Horizon::FullWeek => (prices.min_price(), prices.guaranteed_price(), prices.max_price()),
            Horizon::From(current) => {
                if period < current {
                    return;
                }
                match observed {
                    Some(price) if period == current => (price, price, price),
                    _ => (prices.min_price(), prices.guaranteed_price(), prices.max_price()),
                }
            }
        };

        let min_updated = self.update_min(min);
        let guaranteed_updated = self.update_guaranteed(guaranteed, true);
        let max_updated = self.update_max(max);
        self.clear_stale_periods(min_updated, guaranteed_updated, max_updated);

        if min_updated || min == self.min_price {
            self.min_periods.insert(period);
        }
        if guaranteed_updated || guaranteed == self.guaranteed_price {
            self.guaranteed_periods.insert(period);
        }
        if max_updated || max == self.max_price {
            self.max_periods.insert(period);
        }
    }

    /// Folds a child series (a week into a pattern, a pattern into a
    /// prediction).
    ///
    /// The guaranteed price takes the *lowest* non-zero child value: across
    /// candidate futures the holder can only count on the weakest
    /// assurance. Children that never saw a price (all zeros) fold as
    /// no-ops.
    pub(crate) fn fold_series(&mut self, other: &PriceSeries) {
        let min_updated = self.update_min(other.min_price);
        let guaranteed_updated = self.update_guaranteed(other.guaranteed_price, false);
        let max_updated = self.update_max(other.max_price);
        self.clear_stale_periods(min_updated, guaranteed_updated, max_updated);

        if other.min_price != 0 && (min_updated || other.min_price == self.min_price) {
            self.min_periods.extend(other.min_periods.iter().copied());
        }
        if other.guaranteed_price != 0
            && (guaranteed_updated || other.guaranteed_price == self.guaranteed_price)
        {
            self.guaranteed_periods
                .extend(other.guaranteed_periods.iter().copied());
        }
        if other.max_price != 0 && (max_updated || other.max_price == self.max_price) {
            self.max_periods.extend(other.max_periods.iter().copied());
        }
    }

    fn clear_stale_periods(&mut self, min: bool, guaranteed: bool, max: bool) {
        if min {
            self.min_periods.clear();
        }
        if guaranteed {
            self.guaranteed_periods.clear();
        }
        if max {
            self.max_periods.clear();
        }
    }
}

/// A price series paired with the chance of its owner occurring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    #[serde(flatten)]
    prices: PriceSeries,
    chance: f64,
}

impl Analysis {
    /// The aggregated price bounds.
    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    /// The probability of the owning week or pattern, normalized across
    /// the whole prediction.
    pub fn chance(&self) -> f64 {
        self.chance
    }

    pub(crate) fn prices_mut(&mut self) -> &mut PriceSeries {
        &mut self.prices
    }

    pub(crate) fn set_chance(&mut self, chance: f64) {
        self.chance = chance;
    }
}
