//! Depth-first enumeration of one pattern's phase-length combinations.

use crate::pattern::Pattern;
use crate::phase::{Phase, ProgressionSnapshot};
use crate::potential::PotentialPattern;
use crate::ticker::PriceTicker;

use super::week::WeekPredictor;

/// Enumerates every phase-length combination of one pattern, predicting a
/// candidate week for each and keeping the survivors.
pub(super) struct PatternPredictor<'t> {
    ticker: &'t PriceTicker,
    pattern: Pattern,

    width: f64,
    result: PotentialPattern,
}

impl<'t> PatternPredictor<'t> {
    pub(super) fn new(ticker: &'t PriceTicker, pattern: Pattern) -> Self {
        PatternPredictor {
            ticker,
            pattern,
            width: 0.0,
            result: PotentialPattern::new(pattern, ticker.current_period),
        }
    }

    /// Runs the enumeration and returns the pattern's surviving weeks with
    /// its accumulated probability width.
    pub(super) fn predict(mut self) -> (PotentialPattern, f64) {
        let mut phases = self.pattern.progression(self.ticker);
        self.branch(&mut phases);

        // The width stands in as the chance until global normalization.
        let width = self.width;
        self.result.analysis_mut().set_chance(width);
        (self.result, width)
    }

    /// Recursively fans out on the first phase that can enumerate lengths.
    ///
    /// Phase lengths are the only variance within a pattern, so once every
    /// phase is final the sequence names exactly one candidate week. A
    /// phase returning `None` is waiting on a sibling and is skipped on
    /// this pass.
    fn branch(&mut self, phases: &mut Vec<Phase<'t>>) {
        for phase_index in 0..phases.len() {
            if phases[phase_index].is_final() {
                continue;
            }

            let snapshot = ProgressionSnapshot::of(phases);
            let Some(lengths) = phases[phase_index].possible_lengths(&snapshot) else {
                continue;
            };

            let candidate_count = lengths.len();
            for (index, length) in lengths.into_iter().enumerate() {
                if index + 1 < candidate_count {
                    let mut branch = Self::duplicate_phases(phases);
                    branch[phase_index].set_length(length);
                    self.branch(&mut branch);
                } else {
                    // The last candidate reuses the current sequence
                    // instead of cloning it just to throw it away.
                    phases[phase_index].set_length(length);
                    self.branch(phases);
                }
            }

            return;
        }

        // Every phase is final: this is one concrete candidate week.
        self.add_week(phases);
    }

    /// Copies a phase sequence for a new branch. Finalized phases no
    /// longer change, so their state (including any built sub-period
    /// cache) carries over as-is; pending phases are duplicated without
    /// their caches.
    fn duplicate_phases(phases: &[Phase<'t>]) -> Vec<Phase<'t>> {
        phases
            .iter()
            .map(|phase| {
                if phase.is_final() {
                    phase.clone()
                } else {
                    phase.duplicate()
                }
            })
            .collect()
    }

    fn add_week(&mut self, phases: &mut [Phase<'t>]) {
        let predictor = WeekPredictor::new(self.ticker, self.pattern);
        if let Some((week, width)) = predictor.predict(phases) {
            self.result.add_week(week);
            self.width += width;
        }
    }
}
