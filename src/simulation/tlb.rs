// TLB Model
//
// A "recently seen" approximation of translation caching: a reference hits
// when the same page was among the last `tlb_size` processed references. It
// only observes the step stream and never influences frame contents.

use serde::{Serialize, Deserialize};

use crate::common::types::PageId;
use crate::simulation::history::{self, StepRecord};

/// Whether `page` appears among the last `tlb_size` records of `history`
pub fn tlb_check(history: &[StepRecord], tlb_size: usize, page: PageId) -> bool {
    let start = history.len().saturating_sub(tlb_size);
    history::pages(&history[start..]).any(|p| p == page)
}

/// Running TLB hit and miss counters for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TlbModel {
    pub size: usize,
    pub hits: usize,
    pub misses: usize,
}

impl TlbModel {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            hits: 0,
            misses: 0,
        }
    }

    /// Look `page` up against the history preceding the current step
    pub fn lookup(&mut self, history: &[StepRecord], page: PageId) -> bool {
        let hit = tlb_check(history, self.size, page);
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        hit
    }

    pub fn lookups(&self) -> usize {
        self.hits + self.misses
    }

    pub fn reset(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }
}
