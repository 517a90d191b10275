//! Pattern phases and their length enumeration.
//!
//! Each weekly pattern is a fixed sequence of phases. A phase follows a
//! single price formula; the only variance between candidate weeks of the
//! same pattern is how long each phase lasts. Enumerating every combination
//! of phase lengths therefore enumerates every candidate week.
//!
//! A phase is a plain state machine (length, pass counter, finality) whose
//! price behaviour lives in a static [`Behavior`] descriptor: a base
//! multiplier table plus optional compounding, final-adjustment and spike
//! hooks. The descriptor keeps dispatch to a match on [`PhaseKind`] instead
//! of trait objects, and it is all the generator needs to price a
//! sub-period.

mod big_spike;
mod decreasing;
mod fluctuating;
mod generator;
mod small_spike;

pub(crate) use big_spike::progression as big_spike_progression;
pub(crate) use decreasing::progression as decreasing_progression;
pub(crate) use fluctuating::progression as fluctuating_progression;
pub(crate) use small_spike::progression as small_spike_progression;

use crate::error::Error;
use crate::period::PricePeriod;
use crate::potential::PotentialPricePeriod;
use crate::prices::Prices;
use crate::spikes::SpikeFlags;
use crate::ticker::PriceTicker;
use generator::PeriodGenerator;

/// Price behaviour of one phase kind.
///
/// `base_multiplier` maps a sub-period to the phase's multiplier envelope.
/// `adjust_multiplier`, when present, makes the phase compounding: the step
/// is applied once per sub-period after the first, as discrete `f32`
/// additions in game order. `final_adjustment` shifts the rounded price and
/// `spike` classifies sub-periods.
#[derive(Debug)]
pub(crate) struct Behavior {
    pub name: &'static str,
    pub max_length: usize,
    pub base_multiplier: fn(usize) -> (f32, f32),
    pub adjust_multiplier: Option<fn(f32, bool) -> f32>,
    pub final_adjustment: Option<fn(usize) -> i32>,
    pub spike: Option<fn(usize) -> SpikeFlags>,
}

/// Identifies one concrete phase within one pattern's progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseKind {
    // Fluctuating
    MildIncrease1,
    MildDecrease1,
    MildIncrease2,
    MildDecrease2,
    MildIncrease3,
    // Big Spike
    SteadyDecrease,
    SharpIncrease,
    SharpDecrease,
    RandomLow,
    // Decreasing
    WholeWeekDecrease,
    // Small Spike
    SmallSpikeDecrease1,
    SlightSpike,
    SmallSpikeDecrease2,
}

impl PhaseKind {
    fn behavior(&self) -> &'static Behavior {
        match self {
            PhaseKind::MildIncrease1 => &fluctuating::MILD_INCREASE_1,
            PhaseKind::MildDecrease1 => &fluctuating::MILD_DECREASE_1,
            PhaseKind::MildIncrease2 => &fluctuating::MILD_INCREASE_2,
            PhaseKind::MildDecrease2 => &fluctuating::MILD_DECREASE_2,
            PhaseKind::MildIncrease3 => &fluctuating::MILD_INCREASE_3,
            PhaseKind::SteadyDecrease => &big_spike::STEADY_DECREASE,
            PhaseKind::SharpIncrease => &big_spike::SHARP_INCREASE,
            PhaseKind::SharpDecrease => &big_spike::SHARP_DECREASE,
            PhaseKind::RandomLow => &big_spike::RANDOM_LOW,
            PhaseKind::WholeWeekDecrease => &decreasing::WHOLE_WEEK_DECREASE,
            PhaseKind::SmallSpikeDecrease1 => &small_spike::DECREASE_1,
            PhaseKind::SlightSpike => &small_spike::SLIGHT_SPIKE,
            PhaseKind::SmallSpikeDecrease2 => &small_spike::DECREASE_2,
        }
    }
}

/// Lengths and finality of every phase in a progression, snapshotted before
/// asking one phase for its possible lengths.
///
/// Phases inspect their siblings through this instead of the live slice,
/// which keeps the enumeration borrow-friendly without changing its order.
pub(crate) struct ProgressionSnapshot {
    lengths: Vec<usize>,
    finals: Vec<bool>,
}

impl ProgressionSnapshot {
    pub(crate) fn of(phases: &[Phase<'_>]) -> Self {
        ProgressionSnapshot {
            lengths: phases.iter().map(|p| p.length()).collect(),
            finals: phases.iter().map(|p| p.is_final()).collect(),
        }
    }

    fn length(&self, index: usize) -> usize {
        self.lengths[index]
    }

    fn is_final(&self, index: usize) -> bool {
        self.finals[index]
    }
}

/// Sub-period cache backed by the resumable price generator.
///
/// Compounding phases depend on the previous sub-period's state, so prices
/// are produced strictly in order and kept; repeat queries are lookups.
#[derive(Debug, Clone)]
struct PeriodCache<'t> {
    periods: Vec<Option<PotentialPricePeriod>>,
    produced: usize,
    price_gen: PeriodGenerator<'t>,
    /// Second generator over the highest purchase price, present only when
    /// the ticker's purchase price is unknown.
    price_gen_max: Option<PeriodGenerator<'t>>,
}

/// One phase of a pattern progression mid-enumeration.
#[derive(Debug, Clone)]
pub(crate) struct Phase<'t> {
    kind: PhaseKind,
    ticker: &'t PriceTicker,

    length: usize,
    /// How many times `possible_lengths` has been asked, for phases that
    /// answer across multiple passes.
    pass: u8,
    possibilities_complete: bool,
    is_final: bool,

    cache: Option<PeriodCache<'t>>,
}

/// Fallback purchase price bounding the low side when Sunday's price was
/// never recorded.
const PURCHASE_PRICE_LOW: i32 = 90;
/// High-side fallback purchase price.
const PURCHASE_PRICE_HIGH: i32 = 110;

impl<'t> Phase<'t> {
    pub(crate) fn new(kind: PhaseKind, ticker: &'t PriceTicker) -> Self {
        Phase {
            kind,
            ticker,
            length: 0,
            pass: 0,
            possibilities_complete: false,
            is_final: false,
            cache: None,
        }
    }

    /// Human label of the phase, stable across duplicates.
    pub(crate) fn name(&self) -> &'static str {
        self.kind.behavior().name
    }

    /// The currently assumed length. May be a temporary value for phases
    /// that resolve over multiple passes.
    pub(crate) fn length(&self) -> usize {
        self.length
    }

    /// Whether the current length is the final one.
    pub(crate) fn is_final(&self) -> bool {
        self.is_final
    }

    /// Upper bound on this phase's sub-period count.
    pub(crate) fn max_length(&self) -> usize {
        self.kind.behavior().max_length
    }

    fn complete(&mut self) {
        self.possibilities_complete = true;
    }

    /// Assigns a length. Once the phase has reported its last batch of
    /// possibilities, the assignment is final.
    pub(crate) fn set_length(&mut self, length: usize) {
        self.length = length;
        if self.possibilities_complete {
            self.is_final = true;
        }
    }

    /// Enumerates the lengths this phase could take, or `None` while the
    /// phase still waits on a sibling to resolve.
    ///
    /// The last batch marks the phase possibilities-complete, so the next
    /// `set_length` finalizes it.
    ///
    /// # Panics
    ///
    /// Panics when called on a finalized phase.
    pub(crate) fn possible_lengths(
        &mut self,
        siblings: &ProgressionSnapshot,
    ) -> Option<Vec<usize>> {
        if self.is_final {
            panic!("{}", Error::PhaseLengthFinalized);
        }
        match self.kind {
            PhaseKind::MildIncrease1 => {
                self.complete();
                Some((0..=6).collect())
            }
            PhaseKind::MildDecrease1 => {
                self.complete();
                Some(vec![2, 3])
            }
            PhaseKind::MildIncrease2 => {
                self.pass += 1;
                if self.pass == 1 {
                    // First pass: a temporary length covering this increase
                    // and the final one together.
                    Some(vec![7 - siblings.length(0)])
                } else if siblings.is_final(4) {
                    // The final increase has claimed its share; keep the
                    // remainder and finalize.
                    self.complete();
                    Some(vec![self.length - siblings.length(4)])
                } else {
                    None
                }
            }
            PhaseKind::MildDecrease2 => {
                self.complete();
                Some(vec![5 - siblings.length(1)])
            }
            PhaseKind::MildIncrease3 => {
                // Anywhere from zero up to one less than the temporary
                // length held by the second increase.
                self.complete();
                Some((0..siblings.length(2)).collect())
            }
            PhaseKind::SteadyDecrease => {
                self.complete();
                Some((1..=7).collect())
            }
            PhaseKind::SharpIncrease => {
                self.complete();
                Some(vec![3])
            }
            PhaseKind::SharpDecrease => {
                self.complete();
                Some(vec![2])
            }
            PhaseKind::RandomLow => {
                self.complete();
                Some(vec![12 - siblings.length(0) - 5])
            }
            PhaseKind::WholeWeekDecrease => {
                self.complete();
                Some(vec![12])
            }
            PhaseKind::SmallSpikeDecrease1 => {
                self.complete();
                Some((0..=7).collect())
            }
            PhaseKind::SlightSpike => {
                self.complete();
                Some(vec![5])
            }
            PhaseKind::SmallSpikeDecrease2 => {
                self.complete();
                Some(vec![7 - siblings.length(0)])
            }
        }
    }

    /// Deep-copies the phase for a new enumeration branch. The sub-period
    /// cache is dropped; the copy rebuilds it lazily for its own lengths.
    ///
    /// # Panics
    ///
    /// Panics for the Decreasing pattern's phase: with a single
    /// permutation it is never branched, so a duplicate request is a
    /// caller bug.
    pub(crate) fn duplicate(&self) -> Phase<'t> {
        if self.kind == PhaseKind::WholeWeekDecrease {
            panic!("the decreasing pattern has a single permutation and is never duplicated");
        }
        let mut copy = self.clone();
        copy.cache = None;
        copy
    }

    /// The price bracket this phase projects for `sub_period`, where
    /// `period` is the absolute week slot that sub-period lands on.
    ///
    /// Brackets are produced in order and cached; asking for a later
    /// sub-period advances the generator just far enough.
    pub(crate) fn potential_period(
        &mut self,
        period: usize,
        sub_period: usize,
    ) -> PotentialPricePeriod {
        if self.cache.is_none() {
            let start_index = period - sub_period;
            let behavior = self.kind.behavior();
            let known = self.ticker.purchase_price_known();
            let low_purchase = if known {
                self.ticker.purchase_price
            } else {
                PURCHASE_PRICE_LOW
            };
            self.cache = Some(PeriodCache {
                periods: vec![None; self.max_length()],
                produced: 0,
                price_gen: PeriodGenerator::new(behavior, self.ticker, low_purchase, start_index),
                price_gen_max: (!known).then(|| {
                    PeriodGenerator::new(behavior, self.ticker, PURCHASE_PRICE_HIGH, start_index)
                }),
            });
        }

        let name = self.name();
        let cache = self.cache.as_mut().expect("cache was just built");
        while cache.produced <= sub_period {
            let generated = cache.price_gen.next_period();
            let prices = match cache.price_gen_max.as_mut() {
                // Unknown purchase price: the low run bounds the minimum,
                // a second run over the highest purchase price bounds the
                // maximum, and the two stitch into one bracket.
                Some(gen_max) => {
                    let high = gen_max.next_period();
                    Prices::stitch_unknown_purchase(&generated.prices, &high.prices)
                }
                None => generated.prices,
            };
            let index = cache.produced;
            cache.periods[index] = Some(PotentialPricePeriod::new(
                prices,
                generated.flags,
                PricePeriod::from_index_unchecked(generated.period_index),
                name,
            ));
            cache.produced += 1;
        }

        cache.periods[sub_period]
            .clone()
            .expect("sub-period was just produced")
    }
}
