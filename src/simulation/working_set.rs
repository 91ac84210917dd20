use std::collections::HashSet;

use crate::simulation::history::{self, StepRecord};

/// Number of distinct pages referenced in the `window` steps ending at `at_step`.
///
/// `at_step` counts processed steps, so the window covers records
/// `at_step - window .. at_step`, clipped to the start of the history. Steps
/// past the end of the history are ignored, which keeps the result valid
/// while replaying an earlier point of a run.
pub fn working_set(history: &[StepRecord], window: usize, at_step: usize) -> usize {
    let end = at_step.min(history.len());
    let start = at_step.saturating_sub(window).min(end);

    history::pages(&history[start..end]).collect::<HashSet<_>>().len()
}
