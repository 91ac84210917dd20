use log::trace;

use crate::common::types::{FrameSlot, PageId};
use super::{PolicyError, ReplacementPolicy, Result};

/// Clock (second-chance) replacement.
///
/// Slots fill in order while free frames remain. Once the frame set is full
/// the hand sweeps from its current slot, clearing set reference bits until
/// it reaches a slot whose bit is already clear.
#[derive(Debug, Clone)]
pub struct ClockPolicy {
    /// One reference bit per occupied slot
    bits: Vec<bool>,
    /// Next slot the hand inspects
    hand: FrameSlot,
    capacity: usize,
    /// Slots visited by the most recent sweep
    last_sweep: usize,
}

impl ClockPolicy {
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
            hand: 0,
            capacity,
            last_sweep: 0,
        }
    }

    pub fn hand(&self) -> FrameSlot {
        self.hand
    }

    pub fn last_sweep_len(&self) -> usize {
        self.last_sweep
    }
}

impl ReplacementPolicy for ClockPolicy {
    fn on_access(&mut self, frames: &mut Vec<PageId>, page: PageId, _was_hit: bool) {
        let Some(slot) = frames.iter().position(|&p| p == page) else {
            return;
        };

        if slot < self.bits.len() {
            self.bits[slot] = true;
        } else {
            self.bits.push(true);
        }
    }

    fn evict(&mut self, frames: &[PageId], _reference: &[PageId], _current: usize) -> Result<FrameSlot> {
        if frames.is_empty() {
            return Err(PolicyError::EmptyFrameSet);
        }

        let len = frames.len().min(self.capacity).max(1);
        let limit = 2 * len;
        self.hand %= len;

        for visited in 1..=limit {
            let slot = self.hand;
            trace!("clock hand at slot {} (page {}, bit {})", slot, frames[slot], self.bits[slot]);

            if self.bits[slot] {
                self.bits[slot] = false;
                self.hand = (self.hand + 1) % len;
                continue;
            }

            self.last_sweep = visited;
            self.hand = (slot + 1) % len;
            return Ok(slot);
        }

        Err(PolicyError::SweepExhausted(limit))
    }

    fn reference_bits(&self) -> Option<Vec<bool>> {
        Some(self.bits.clone())
    }
}
