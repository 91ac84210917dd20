use crate::common::types::{FrameSlot, PageId};
use super::{PolicyError, ReplacementPolicy, Result};

/// First-In-First-Out replacement.
///
/// The frame set itself is kept in admission order: the head is the oldest
/// resident page and admitted pages join at the tail.
#[derive(Debug, Clone, Default)]
pub struct FifoPolicy;

impl FifoPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn on_access(&mut self, _frames: &mut Vec<PageId>, _page: PageId, _was_hit: bool) {}

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
