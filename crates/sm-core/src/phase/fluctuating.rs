//! The Fluctuating pattern: increase, decrease, increase, decrease,
//! increase.
//!
//! Only the lengths vary. The first increase takes 0-6 periods, the first
//! decrease 2 or 3, and the remaining three phases split what is left of
//! the week between them, which is what makes the second increase a
//! two-pass phase.

use super::{Behavior, Phase, PhaseKind};
use crate::ticker::PriceTicker;

fn increase_multiplier(_sub_period: usize) -> (f32, f32) {
    (0.9, 1.4)
}

fn decrease_multiplier(_sub_period: usize) -> (f32, f32) {
    (0.6, 0.8)
}

fn decrease_step(factor: f32, is_min: bool) -> f32 {
    if is_min {
        factor - 0.1
    } else {
        factor - 0.04
    }
}

pub(super) static MILD_INCREASE_1: Behavior = Behavior {
    name: "mild increase",
    max_length: 6,
    base_multiplier: increase_multiplier,
    adjust_multiplier: None,
    final_adjustment: None,
    spike: None,
};

pub(super) static MILD_DECREASE_1: Behavior = Behavior {
    name: "mild decrease",
    max_length: 3,
    base_multiplier: decrease_multiplier,
    adjust_multiplier: Some(decrease_step),
    final_adjustment: None,
    spike: None,
};

pub(super) static MILD_INCREASE_2: Behavior = Behavior {
    name: "mild increase",
    max_length: 7,
    base_multiplier: increase_multiplier,
    adjust_multiplier: None,
    final_adjustment: None,
    spike: None,
};

pub(super) static MILD_DECREASE_2: Behavior = Behavior {
    name: "mild decrease",
    max_length: 3,
    base_multiplier: decrease_multiplier,
    adjust_multiplier: Some(decrease_step),
    final_adjustment: None,
    spike: None,
};

pub(super) static MILD_INCREASE_3: Behavior = Behavior {
    name: "mild increase",
    max_length: 6,
    base_multiplier: increase_multiplier,
    adjust_multiplier: None,
    final_adjustment: None,
    spike: None,
};

/// A fresh Fluctuating progression for one enumeration run.
pub(crate) fn progression(ticker: &PriceTicker) -> Vec<Phase<'_>> {
    vec![
        Phase::new(PhaseKind::MildIncrease1, ticker),
        Phase::new(PhaseKind::MildDecrease1, ticker),
        Phase::new(PhaseKind::MildIncrease2, ticker),
        Phase::new(PhaseKind::MildDecrease2, ticker),
        Phase::new(PhaseKind::MildIncrease3, ticker),
    ]
}
