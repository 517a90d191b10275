//! The Big Spike pattern: a steady slide into a three-period surge, a
//! two-period collapse, and a random low tail.
//!
//! The surge's third sub-period is the week's single big-spike peak, worth
//! two to six times the purchase price.

use super::{Behavior, Phase, PhaseKind};
use crate::spikes::SpikeFlags;
use crate::ticker::PriceTicker;

fn steady_multiplier(_sub_period: usize) -> (f32, f32) {
    (0.85, 0.9)
}

fn steady_step(factor: f32, is_min: bool) -> f32 {
    if is_min {
        factor - 0.05
    } else {
        factor - 0.03
    }
}

fn sharp_increase_multiplier(sub_period: usize) -> (f32, f32) {
    match sub_period {
        0 => (0.9, 1.4),
        1 => (1.4, 2.0),
        _ => (2.0, 6.0),
    }
}

fn sharp_increase_spike(sub_period: usize) -> SpikeFlags {
    if sub_period == 2 {
        SpikeFlags::big()
    } else {
        SpikeFlags::none()
    }
}

fn sharp_decrease_multiplier(sub_period: usize) -> (f32, f32) {
    if sub_period == 0 {
        (1.4, 2.0)
    } else {
        (0.9, 1.4)
    }
}

fn random_low_multiplier(_sub_period: usize) -> (f32, f32) {
    (0.4, 0.9)
}

pub(super) static STEADY_DECREASE: Behavior = Behavior {
    name: "steady decrease",
    max_length: 7,
    base_multiplier: steady_multiplier,
    adjust_multiplier: Some(steady_step),
    final_adjustment: None,
    spike: None,
};

pub(super) static SHARP_INCREASE: Behavior = Behavior {
    name: "sharp increase",
    max_length: 3,
    base_multiplier: sharp_increase_multiplier,
    adjust_multiplier: None,
    final_adjustment: None,
    spike: Some(sharp_increase_spike),
};

pub(super) static SHARP_DECREASE: Behavior = Behavior {
    name: "sharp decrease",
    max_length: 2,
    base_multiplier: sharp_decrease_multiplier,
    adjust_multiplier: None,
    final_adjustment: None,
    spike: None,
};

pub(super) static RANDOM_LOW: Behavior = Behavior {
    name: "random low",
    max_length: 6,
    base_multiplier: random_low_multiplier,
    adjust_multiplier: None,
    final_adjustment: None,
    spike: None,
};

/// A fresh Big Spike progression for one enumeration run.
pub(crate) fn progression(ticker: &PriceTicker) -> Vec<Phase<'_>> {
    vec![
        Phase::new(PhaseKind::SteadyDecrease, ticker),
        Phase::new(PhaseKind::SharpIncrease, ticker),
        Phase::new(PhaseKind::SharpDecrease, ticker),
        Phase::new(PhaseKind::RandomLow, ticker),
    ]
}
