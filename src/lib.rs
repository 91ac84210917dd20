// Page Replacement Simulator

pub mod common;
pub mod policy;
pub mod simulation;

// Re-export key items for convenient access
pub use common::types::PageId;
pub use policy::{PolicyKind, ReplacementPolicy, Replacer};
pub use simulation::{
    compare_all, working_set, AutoPlayer, ComparisonResult, ConfigError, PlaybackEvent,
    SimulationConfig, SimulationError, SimulationSession, StepRecord, TlbModel,
};
