// Page Replacement Policies
//
// Every policy implements `ReplacementPolicy`. The engine asks a policy for a
// victim slot only when the frame set is full and the current reference
// faulted, lets the policy place the incoming page, and then reports every
// access (hit or admission) through `on_access`.

pub mod error;
pub mod fifo;
pub mod lru;
pub mod optimal;
pub mod clock;
pub mod frequency;
pub mod random;

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::common::types::{FrameSlot, PageId};

pub use error::{PolicyError, Result};
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use optimal::OptimalPolicy;
pub use clock::ClockPolicy;
pub use frequency::FrequencyPolicy;
pub use random::RandomPolicy;

/// Shared contract of all eviction strategies
pub trait ReplacementPolicy {
    /// Record a processed reference. Called after admission on a fault.
    fn on_access(&mut self, frames: &mut Vec<PageId>, page: PageId, was_hit: bool);

    /// Choose the slot whose page must leave a full frame set.
    fn evict(&mut self, frames: &[PageId], reference: &[PageId], current: usize) -> Result<FrameSlot>;

    /// Place an admitted page, either into the freed slot or a new one.
    fn install(&mut self, frames: &mut Vec<PageId>, victim: Option<FrameSlot>, page: PageId) {
        match victim {
            Some(slot) => frames[slot] = page,
            None => frames.push(page),
        }
    }

    /// Slot-ordered reference bits, for policies that keep them
    fn reference_bits(&self) -> Option<Vec<bool>> {
        None
    }
}

/// Closed set of supported policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fifo,
    Lru,
    Optimal,
    Clock,
    Frequency,
    Random,
}

impl PolicyKind {
    /// All policies, in comparison order
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Optimal,
        PolicyKind::Clock,
        PolicyKind::Frequency,
        PolicyKind::Random,
    ];

    /// Identifier used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lru => "lru",
            PolicyKind::Optimal => "optimal",
            PolicyKind::Clock => "clock",
            PolicyKind::Frequency => "frequency",
            PolicyKind::Random => "random",
        }
    }

    /// Label used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Optimal => "OPTIMAL",
            PolicyKind::Clock => "CLOCK",
            PolicyKind::Frequency => "FREQUENCY",
            PolicyKind::Random => "RANDOM",
        }
    }

    /// Whether identical input always yields identical output
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, PolicyKind::Random)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PolicyKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            "optimal" | "opt" => Ok(PolicyKind::Optimal),
            "clock" | "second-chance" => Ok(PolicyKind::Clock),
            "frequency" | "nfu" | "lfu" => Ok(PolicyKind::Frequency),
            "random" => Ok(PolicyKind::Random),
            other => Err(PolicyError::UnknownPolicy(other.to_string())),
        }
    }
}

/// A freshly constructed policy of any kind
#[derive(Debug, Clone)]
pub enum Replacer {
    Fifo(FifoPolicy),
    Lru(LruPolicy),
    Optimal(OptimalPolicy),
    Clock(ClockPolicy),
    Frequency(FrequencyPolicy),
    Random(RandomPolicy),
}

impl Replacer {
    /// Build a policy with empty auxiliary state
    pub fn new(kind: PolicyKind, frame_count: usize, seed: Option<u64>) -> Self {
        match kind {
            PolicyKind::Fifo => Replacer::Fifo(FifoPolicy::new()),
            PolicyKind::Lru => Replacer::Lru(LruPolicy::new()),
            PolicyKind::Optimal => Replacer::Optimal(OptimalPolicy::new()),
            PolicyKind::Clock => Replacer::Clock(ClockPolicy::new(frame_count)),
            PolicyKind::Frequency => Replacer::Frequency(FrequencyPolicy::new(frame_count)),
            PolicyKind::Random => Replacer::Random(RandomPolicy::new(seed)),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Replacer::Fifo(_) => PolicyKind::Fifo,
            Replacer::Lru(_) => PolicyKind::Lru,
            Replacer::Optimal(_) => PolicyKind::Optimal,
            Replacer::Clock(_) => PolicyKind::Clock,
            Replacer::Frequency(_) => PolicyKind::Frequency,
            Replacer::Random(_) => PolicyKind::Random,
        }
    }

    fn inner(&mut self) -> &mut dyn ReplacementPolicy {
        match self {
            Replacer::Fifo(p) => p,
            Replacer::Lru(p) => p,
            Replacer::Optimal(p) => p,
            Replacer::Clock(p) => p,
            Replacer::Frequency(p) => p,
            Replacer::Random(p) => p,
        }
    }
}

impl ReplacementPolicy for Replacer {
    fn on_access(&mut self, frames: &mut Vec<PageId>, page: PageId, was_hit: bool) {
        self.inner().on_access(frames, page, was_hit)
    }

    fn evict(&mut self, frames: &[PageId], reference: &[PageId], current: usize) -> Result<FrameSlot> {
        self.inner().evict(frames, reference, current)
    }

    fn install(&mut self, frames: &mut Vec<PageId>, victim: Option<FrameSlot>, page: PageId) {
        self.inner().install(frames, victim, page)
    }

    fn reference_bits(&self) -> Option<Vec<bool>> {
        match self {
            Replacer::Clock(p) => p.reference_bits(),
            _ => None,
        }
    }
}
