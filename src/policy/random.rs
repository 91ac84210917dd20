use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::types::{FrameSlot, PageId};
use super::{PolicyError, ReplacementPolicy, Result};

/// Uniformly random replacement.
///
/// Reproducible only when built with a seed.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn on_access(&mut self, _frames: &mut Vec<PageId>, _page: PageId, _was_hit: bool) {}

    fn evict(&mut self, frames: &[PageId], _reference: &[PageId], _current: usize) -> Result<FrameSlot> {
        if frames.is_empty() {
            return Err(PolicyError::EmptyFrameSet);
        }
        Ok(self.rng.gen_range(0..frames.len()))
    }
}
