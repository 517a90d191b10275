//! The user-entered price ticker a prediction runs against.

use crate::pattern::Pattern;
use crate::period::{PricePeriod, TimeOfDay, PRICE_PERIOD_COUNT};
use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// A week of observed turnip prices.
///
/// The engine treats the ticker as read-only: a prediction is a pure
/// function of its contents. A price of `0` stands for "not yet observed";
/// a purchase price of `0` means the Sunday buy price was not recorded
/// either, in which case predictions span the full 90..=110 purchase range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTicker {
    /// The Sunday purchase price for this week. 0 = unknown.
    pub purchase_price: i32,

    /// The previous week's price pattern, `Unknown` if unrecorded.
    pub previous_pattern: Pattern,

    /// The price period "now" falls in. Periods before this are history;
    /// the prediction's future view starts here.
    pub current_period: PricePeriod,

    /// The twelve half-day sell prices in period order. 0 = unobserved.
    pub prices: [i32; PRICE_PERIOD_COUNT],
}

impl PriceTicker {
    /// Creates a ticker with no observed sell prices.
    pub fn new(purchase_price: i32, previous_pattern: Pattern, current_period: PricePeriod) -> Self {
        PriceTicker {
            purchase_price,
            previous_pattern,
            current_period,
            prices: [0; PRICE_PERIOD_COUNT],
        }
    }

    /// The observed price for a period. 0 = unobserved.
    pub fn price(&self, period: PricePeriod) -> i32 {
        self.prices[period.index()]
    }

    /// Records an observed price for a period.
    pub fn set_price(&mut self, period: PricePeriod, price: i32) {
        self.prices[period.index()] = price;
    }

    /// The price for a weekday and half-day. Sunday reads the purchase
    /// price regardless of the half-day.
    pub fn price_for_day(&self, weekday: Weekday, tod: TimeOfDay) -> i32 {
        match PricePeriod::from_day(weekday, tod) {
            Ok(period) => self.price(period),
            Err(_) => self.purchase_price,
        }
    }

    /// Sets the price for a weekday and half-day. Sunday writes the
    /// purchase price.
    pub fn set_price_for_day(&mut self, weekday: Weekday, tod: TimeOfDay, price: i32) {
        match PricePeriod::from_day(weekday, tod) {
            Ok(period) => self.set_price(period, price),
            Err(_) => self.purchase_price = price,
        }
    }

    /// The price at a wall-clock time, assumed to fall within the ticker's
    /// week. Sunday reads the purchase price.
    pub fn price_at_time(&self, when: NaiveDateTime) -> i32 {
        match PricePeriod::from_datetime(when) {
            Ok(period) => self.price(period),
            Err(_) => self.purchase_price,
        }
    }

    /// Sets the price at a wall-clock time. Sunday writes the purchase
    /// price.
    pub fn set_price_at_time(&mut self, when: NaiveDateTime, price: i32) {
        match PricePeriod::from_datetime(when) {
            Ok(period) => self.set_price(period, price),
            Err(_) => self.purchase_price = price,
        }
    }

    /// Whether the Sunday purchase price was recorded.
    pub fn purchase_price_known(&self) -> bool {
        self.purchase_price != 0
    }
}
