//! The Decreasing pattern: one phase, twelve periods, downhill all week.

use super::{Behavior, Phase, PhaseKind};
use crate::ticker::PriceTicker;

fn multiplier(_sub_period: usize) -> (f32, f32) {
    (0.85, 0.9)
}

fn step(factor: f32, is_min: bool) -> f32 {
    if is_min {
        factor - 0.05
    } else {
        factor - 0.03
    }
}

pub(super) static WHOLE_WEEK_DECREASE: Behavior = Behavior {
    name: "whomp whomp",
    max_length: 12,
    base_multiplier: multiplier,
    adjust_multiplier: Some(step),
    final_adjustment: None,
    spike: None,
};

/// The Decreasing progression: a single phase spanning the week.
pub(crate) fn progression(ticker: &PriceTicker) -> Vec<Phase<'_>> {
    vec![Phase::new(PhaseKind::WholeWeekDecrease, ticker)]
}
