use serde::{Serialize, Deserialize};

use crate::common::types::PageId;

/// Outcome of processing one reference
///
/// Records are appended once per step and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Position of the reference in the sequence
    pub index: usize,
    /// Requested page
    pub page: PageId,
    /// Resident pages after the step, in policy order
    pub frames: Vec<PageId>,
    pub fault: bool,
    /// Page removed to make room, if any
    pub evicted: Option<PageId>,
    /// TLB outcome, present only when the TLB model is enabled
    pub tlb_hit: Option<bool>,
    /// Clock reference bits after the step, slot-ordered
    pub reference_bits: Option<Vec<bool>>,
}

impl StepRecord {
    pub fn is_hit(&self) -> bool {
        !self.fault
    }
}

/// Pages referenced by a slice of history, in step order
pub fn pages(history: &[StepRecord]) -> impl Iterator<Item = PageId> + '_ {
    history.iter().map(|r| r.page)
}
