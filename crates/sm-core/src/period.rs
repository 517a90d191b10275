//! Half-day price periods of the trading week.
//!
//! Turnip sell prices change twice a day, Monday through Saturday, giving
//! twelve price periods per week. Sunday has no sell price; it only carries
//! the morning purchase price.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of price periods in a week.
pub const PRICE_PERIOD_COUNT: usize = 12;

/// Morning or afternoon half of a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeOfDay {
    Am,
    Pm,
}

impl TimeOfDay {
    /// Offset of the half-day within its weekday. AM = 0, PM = 1.
    pub fn period_offset(&self) -> usize {
        match self {
            TimeOfDay::Am => 0,
            TimeOfDay::Pm => 1,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Am => write!(f, "AM"),
            TimeOfDay::Pm => write!(f, "PM"),
        }
    }
}

/// One of the twelve half-day price slots, 0 (Monday AM) through
/// 11 (Saturday PM).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PricePeriod(u8);

impl PricePeriod {
    /// Builds a period from a raw index, checking the 0..=11 range.
    pub fn new(index: usize) -> Result<Self> {
        if index >= PRICE_PERIOD_COUNT {
            return Err(Error::PeriodOutOfIndex);
        }
        Ok(PricePeriod(index as u8))
    }

    /// Builds a period the engine already knows to be in range.
    pub(crate) fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < PRICE_PERIOD_COUNT);
        PricePeriod(index as u8)
    }

    /// The period for a weekday and half-day. Sunday has no price periods.
    pub fn from_day(weekday: Weekday, tod: TimeOfDay) -> Result<Self> {
        if weekday == Weekday::Sun {
            return Err(Error::NoSundayPricePeriod);
        }
        let day = weekday.num_days_from_monday() as usize;
        Ok(PricePeriod((day * 2 + tod.period_offset()) as u8))
    }

    /// The period covering a wall-clock time. The ticker carries no date
    /// information, so the time is assumed to fall in the ticker's week.
    pub fn from_datetime(when: NaiveDateTime) -> Result<Self> {
        let tod = if when.hour() < 12 {
            TimeOfDay::Am
        } else {
            TimeOfDay::Pm
        };
        Self::from_day(when.weekday(), tod)
    }

    /// Raw 0..=11 index, usable for subscripting weekly arrays.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The weekday this period falls on.
    pub fn weekday(&self) -> Weekday {
        match self.0 / 2 {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    /// Morning or afternoon half of the period's weekday.
    pub fn time_of_day(&self) -> TimeOfDay {
        if self.0 % 2 == 0 {
            TimeOfDay::Am
        } else {
            TimeOfDay::Pm
        }
    }

    /// All twelve periods in week order.
    pub fn all() -> impl Iterator<Item = PricePeriod> {
        (0..PRICE_PERIOD_COUNT).map(|i| PricePeriod(i as u8))
    }
}

impl TryFrom<usize> for PricePeriod {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        PricePeriod::new(index)
    }
}

impl From<PricePeriod> for usize {
    fn from(period: PricePeriod) -> usize {
        period.index()
    }
}

impl fmt::Display for PricePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday(), self.time_of_day())
    }
}
