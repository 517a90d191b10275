//! The Small Spike pattern: a slide, a five-period bump, and the rest of
//! the slide.
//!
//! The bump's last three sub-periods form the small spike: the true peak
//! flanked by two shoulders one bell short of it.

use super::{Behavior, Phase, PhaseKind};
use crate::spikes::SpikeFlags;
use crate::ticker::PriceTicker;

fn decrease_multiplier(_sub_period: usize) -> (f32, f32) {
    (0.4, 0.9)
}

fn decrease_step(factor: f32, is_min: bool) -> f32 {
    if is_min {
        // The game rolls the low step as 0.02 plus 0.03; folding the two
        // subtractions into one 0.05 lands on a different f32 and drifts
        // the price chain by a bell.
        factor - 0.02 - 0.03
    } else {
        factor - 0.03
    }
}

fn spike_multiplier(sub_period: usize) -> (f32, f32) {
    match sub_period {
        0 | 1 => (0.9, 1.4),
        _ => (1.4, 2.0),
    }
}

fn spike_adjustment(sub_period: usize) -> i32 {
    if sub_period == 2 || sub_period == 4 {
        -1
    } else {
        0
    }
}

fn spike_flags(sub_period: usize) -> SpikeFlags {
    if (2..=4).contains(&sub_period) {
        SpikeFlags::small()
    } else {
        SpikeFlags::none()
    }
}

pub(super) static DECREASE_1: Behavior = Behavior {
    name: "steady decrease",
    max_length: 7,
    base_multiplier: decrease_multiplier,
    adjust_multiplier: Some(decrease_step),
    final_adjustment: None,
    spike: None,
};

pub(super) static SLIGHT_SPIKE: Behavior = Behavior {
    name: "slight spike",
    max_length: 5,
    base_multiplier: spike_multiplier,
    adjust_multiplier: None,
    final_adjustment: Some(spike_adjustment),
    spike: Some(spike_flags),
};

pub(super) static DECREASE_2: Behavior = Behavior {
    name: "steady decrease",
    max_length: 7,
    base_multiplier: decrease_multiplier,
    adjust_multiplier: Some(decrease_step),
    final_adjustment: None,
    spike: None,
};

/// A fresh Small Spike progression for one enumeration run.
pub(crate) fn progression(ticker: &PriceTicker) -> Vec<Phase<'_>> {
    vec![
        Phase::new(PhaseKind::SmallSpikeDecrease1, ticker),
        Phase::new(PhaseKind::SlightSpike, ticker),
        Phase::new(PhaseKind::SmallSpikeDecrease2, ticker),
    ]
}
