// Comparison Runner
//
// Runs every policy over the same input in its own throwaway session and
// reports aggregate counts. Runs share nothing with each other or with any
// live session.

use std::ops::RangeInclusive;
use log::info;
use serde::{Serialize, Deserialize};

use crate::common::types::PageId;
use crate::policy::PolicyKind;
use crate::simulation::config::SimulationConfig;
use crate::simulation::error::Result;
use crate::simulation::session::SimulationSession;

/// Aggregate outcome of one policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub policy: PolicyKind,
    pub fault_count: usize,
    pub hit_count: usize,
    /// Hits as a percentage of all references
    pub efficiency_percent: f64,
}

impl ComparisonResult {
    pub fn policy_name(&self) -> &'static str {
        self.policy.display_name()
    }
}

/// Hits per reference as a percentage; zero for an empty sequence.
///
/// Scaling before dividing keeps whole percentages exact.
pub fn efficiency_percent(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    hits as f64 * 100.0 / total as f64
}

/// Run a single policy to completion on a fresh session
pub fn run_policy(
    policy: PolicyKind,
    reference: &[PageId],
    frame_count: usize,
    seed: Option<u64>,
) -> Result<ComparisonResult> {
    let config = SimulationConfig {
        seed,
        ..SimulationConfig::new(policy, frame_count, reference.to_vec())
    };
    let mut session = SimulationSession::new(config)?;
    session.run_to_end()?;

    Ok(ComparisonResult {
        policy,
        fault_count: session.fault_count(),
        hit_count: session.hit_count(),
        efficiency_percent: efficiency_percent(session.hit_count(), reference.len()),
    })
}

/// Run all six policies on the same input
pub fn compare_all(reference: &[PageId], frame_count: usize) -> Result<Vec<ComparisonResult>> {
    compare_all_seeded(reference, frame_count, None)
}

/// Like `compare_all`, with a fixed seed for the random policy
pub fn compare_all_seeded(
    reference: &[PageId],
    frame_count: usize,
    seed: Option<u64>,
) -> Result<Vec<ComparisonResult>> {
    let results = PolicyKind::ALL
        .iter()
        .map(|&policy| run_policy(policy, reference, frame_count, seed))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Compared {} policies over {} references with {} frames",
        results.len(),
        reference.len(),
        frame_count
    );
    Ok(results)
}

/// Policy with the fewest faults; earlier policies win ties
pub fn best_policy(results: &[ComparisonResult]) -> Option<&ComparisonResult> {
    results.iter().reduce(|best, r| if r.fault_count < best.fault_count { r } else { best })
}

/// Fault count of one policy for each frame count in `frames`
pub fn fault_curve(
    policy: PolicyKind,
    reference: &[PageId],
    frames: RangeInclusive<usize>,
    seed: Option<u64>,
) -> Result<Vec<(usize, usize)>> {
    frames
        .map(|n| run_policy(policy, reference, n, seed).map(|r| (n, r.fault_count)))
        .collect()
}

/// Frame counts at which adding a frame increased the fault count
pub fn belady_anomalies(curve: &[(usize, usize)]) -> Vec<usize> {
    curve
        .windows(2)
        .filter(|w| w[1].1 > w[0].1)
        .map(|w| w[1].0)
        .collect()
}
