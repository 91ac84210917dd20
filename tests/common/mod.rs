#![allow(dead_code)]

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use pagesim::simulation::reference::generate_reference;
use pagesim::{PageId, PolicyKind, SimulationConfig, SimulationSession};

// Reference string used throughout operating-systems textbooks
pub const CLASSIC: [PageId; 20] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];

// Create a session with default options for everything but the essentials
pub fn create_session(policy: PolicyKind, frames: usize, reference: &[PageId]) -> Result<SimulationSession> {
    let config = SimulationConfig {
        seed: Some(0xC0FFEE),
        ..SimulationConfig::new(policy, frames, reference.to_vec())
    };
    Ok(SimulationSession::new(config)?)
}

// Run a session to completion
pub fn run_session(policy: PolicyKind, frames: usize, reference: &[PageId]) -> Result<SimulationSession> {
    let mut session = create_session(policy, frames, reference)?;
    session.run_to_end()?;
    Ok(session)
}

// Generate a batch of reproducible random reference strings
pub fn random_references(seed: u64, count: usize, length: usize, max_page: PageId) -> Vec<Vec<PageId>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| generate_reference(&mut rng, length, max_page)).collect()
}
