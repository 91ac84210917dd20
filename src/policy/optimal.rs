use crate::common::types::{FrameSlot, PageId};
use super::{PolicyError, ReplacementPolicy, Result};

/// Belady's optimal replacement.
///
/// Keeps no state of its own; every eviction rescans the remainder of the
/// reference sequence.
#[derive(Debug, Clone, Default)]
pub struct OptimalPolicy;

impl OptimalPolicy {
    pub fn new() -> Self {
        Self
    }
}

/// Index of the next reference to `page` strictly after `current`
pub fn next_use(reference: &[PageId], page: PageId, current: usize) -> Option<usize> {
    reference
        .iter()
        .enumerate()
        .skip(current + 1)
        .find(|&(_, &p)| p == page)
        .map(|(i, _)| i)
}

impl ReplacementPolicy for OptimalPolicy {
    fn on_access(&mut self, _frames: &mut Vec<PageId>, _page: PageId, _was_hit: bool) {}

    fn evict(&mut self, frames: &[PageId], reference: &[PageId], current: usize) -> Result<FrameSlot> {
        if frames.is_empty() {
            return Err(PolicyError::EmptyFrameSet);
        }

        let mut victim = 0;
        let mut farthest = None;

        for (slot, &page) in frames.iter().enumerate() {
            match next_use(reference, page, current) {
                // Never referenced again: nothing can beat this one
                None => return Ok(slot),
                Some(next) => {
                    if farthest.is_none_or(|f| next > f) {
                        farthest = Some(next);
                        victim = slot;
                    }
                }
            }
        }

        Ok(victim)
    }
}
