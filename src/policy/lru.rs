use crate::common::types::{FrameSlot, PageId};
use super::{PolicyError, ReplacementPolicy, Result};

/// Simple LRU (Least Recently Used) page replacement policy
///
/// The frame set doubles as the recency list: the least recently used page
/// sits at the head and the most recently used page at the tail.
#[derive(Debug, Clone, Default)]
pub struct LruPolicy;

impl LruPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Move a hit page to the most recently used end
    fn on_access(&mut self, frames: &mut Vec<PageId>, page: PageId, was_hit: bool) {
        if !was_hit {
            // Admission already placed the page at the tail
            return;
        }

        if let Some(pos) = frames.iter().position(|&p| p == page) {
            frames.remove(pos);
        }
        frames.push(page);
    }

    /// Victim selection: the least recently used page
    fn evict(&mut self, frames: &[PageId], _reference: &[PageId], _current: usize) -> Result<FrameSlot> {
        if frames.is_empty() {
            return Err(PolicyError::EmptyFrameSet);
        }
        Ok(0)
    }

    fn install(&mut self, frames: &mut Vec<PageId>, victim: Option<FrameSlot>, page: PageId) {
        if let Some(slot) = victim {
            frames.remove(slot);
        }
        frames.push(page);
    }
}
