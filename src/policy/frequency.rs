use std::collections::HashMap;

use crate::common::types::{FrameSlot, PageId};
use super::{PolicyError, ReplacementPolicy, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Usage {
    /// References since admission, the admitting reference included
    count: u64,
    /// Logical time of admission, used to break count ties
    admitted_at: u64,
}

/// Frequency-based (least frequently used) replacement.
///
/// Counters live only while a page is resident; an evicted page starts
/// again from one when it is readmitted. Ties go to the page admitted first.
#[derive(Debug, Clone)]
pub struct FrequencyPolicy {
    usage: HashMap<PageId, Usage>,
    clock: u64,
}

impl FrequencyPolicy {
    pub fn new(capacity: usize) -> Self {
        Self {
            usage: HashMap::with_capacity(capacity),
            clock: 0,
        }
    }

    /// Reference count of a resident page
    pub fn count(&self, page: PageId) -> Option<u64> {
        self.usage.get(&page).map(|u| u.count)
    }
}

impl ReplacementPolicy for FrequencyPolicy {
    fn on_access(&mut self, _frames: &mut Vec<PageId>, page: PageId, was_hit: bool) {
        let now = self.clock;
        self.clock += 1;

        if was_hit {
            if let Some(usage) = self.usage.get_mut(&page) {
                usage.count += 1;
                return;
            }
        }

        self.usage.insert(page, Usage { count: 1, admitted_at: now });
    }

    fn evict(&mut self, frames: &[PageId], _reference: &[PageId], _current: usize) -> Result<FrameSlot> {
        let mut victim: Option<(FrameSlot, Usage)> = None;

        for (slot, &page) in frames.iter().enumerate() {
            let usage = *self.usage.get(&page).ok_or(PolicyError::UntrackedPage(page))?;
            let better = match victim {
                None => true,
                Some((_, best)) => (usage.count, usage.admitted_at) < (best.count, best.admitted_at),
            };
            if better {
                victim = Some((slot, usage));
            }
        }

        let (slot, _) = victim.ok_or(PolicyError::EmptyFrameSet)?;
        self.usage.remove(&frames[slot]);
        Ok(slot)
    }
}
