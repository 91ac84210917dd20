use std::time::Duration;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::common::types::{
    PageId, DEFAULT_REFERENCE_STRING, FRAME_COUNT_RANGE, SPEED_MS_RANGE, TLB_SIZE_RANGE,
    WORKING_SET_RANGE,
};
use crate::policy::PolicyKind;
use crate::simulation::reference::parse_reference;

/// Error type for configuration validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Reference string is empty")]
    EmptyReferenceString,

    #[error("Invalid page number in reference string: '{0}'")]
    InvalidPageToken(String),

    #[error("Frame count {0} is outside the allowed range 1-10")]
    FrameCountOutOfRange(usize),

    #[error("Speed {0} ms is outside the allowed range 100-2000")]
    SpeedOutOfRange(u64),

    #[error("TLB size {0} is outside the allowed range 1-8")]
    TlbSizeOutOfRange(usize),

    #[error("Working set window {0} is outside the allowed range 2-10")]
    WorkingSetSizeOutOfRange(usize),
}

/// Configuration for a simulation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Replacement policy to simulate
    pub policy: PolicyKind,

    /// Number of frames in memory
    pub frame_count: usize,

    /// Page references to process, in order
    pub reference: Vec<PageId>,

    /// Interval between automatic steps in milliseconds
    pub speed_ms: u64,

    /// Whether TLB hits and misses are tracked
    pub tlb_enabled: bool,

    /// Number of recent references the TLB remembers
    pub tlb_size: usize,

    /// Window length of the working-set calculation
    pub working_set_size: usize,

    /// Seed for the random policy; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Fifo,
            frame_count: 3,
            reference: parse_reference(DEFAULT_REFERENCE_STRING).unwrap_or_default(),
            speed_ms: 1000,
            tlb_enabled: false,
            tlb_size: 4,
            working_set_size: 5,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Default configuration running `policy` over `reference` with `frame_count` frames
    pub fn new(policy: PolicyKind, frame_count: usize, reference: Vec<PageId>) -> Self {
        Self {
            policy,
            frame_count,
            reference,
            ..Default::default()
        }
    }

    /// Replace the reference sequence with one parsed from text
    pub fn with_reference_text(mut self, text: &str) -> Result<Self, ConfigError> {
        self.reference = parse_reference(text)?;
        Ok(self)
    }

    /// Check every option against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !FRAME_COUNT_RANGE.contains(&self.frame_count) {
            return Err(ConfigError::FrameCountOutOfRange(self.frame_count));
        }
        if !SPEED_MS_RANGE.contains(&self.speed_ms) {
            return Err(ConfigError::SpeedOutOfRange(self.speed_ms));
        }
        if !TLB_SIZE_RANGE.contains(&self.tlb_size) {
            return Err(ConfigError::TlbSizeOutOfRange(self.tlb_size));
        }
        if !WORKING_SET_RANGE.contains(&self.working_set_size) {
            return Err(ConfigError::WorkingSetSizeOutOfRange(self.working_set_size));
        }
        Ok(())
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }
}
