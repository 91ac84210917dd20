use anyhow::Result;
use pagesim::policy::{ClockPolicy, ReplacementPolicy};
use pagesim::simulation::comparison::run_policy;
use pagesim::{working_set, PolicyKind};

#[path = "../common/mod.rs"]
mod common;
use common::{create_session, random_references, run_session};

const SEED: u64 = 0x5EED;

#[test]
fn test_capacity_and_counter_invariants() -> Result<()> {
    for reference in random_references(SEED, 40, 60, 12) {
        for frames in [1, 3, 5, 10] {
            for policy in PolicyKind::ALL {
                let mut session = create_session(policy, frames, &reference)?;
                while !session.is_terminal() {
                    let record = session.step()?.clone();
                    assert!(record.frames.len() <= frames);
                    if record.is_hit() {
                        assert!(record.evicted.is_none());
                    }

                    let processed = &reference[..session.cursor()];
                    assert!(record.frames.iter().all(|p| processed.contains(p)));
                    assert_eq!(session.fault_count() + session.hit_count(), session.cursor());
                    assert_eq!(session.history().len(), session.cursor());
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_deterministic_policies_repeat_exactly() -> Result<()> {
    for reference in random_references(SEED + 1, 20, 40, 8) {
        for policy in PolicyKind::ALL.into_iter().filter(PolicyKind::is_deterministic) {
            let a = run_session(policy, 4, &reference)?;
            let b = run_session(policy, 4, &reference)?;
            assert_eq!(a.history(), b.history());
        }
    }
    Ok(())
}

#[test]
fn test_optimal_is_a_lower_bound() -> Result<()> {
    for reference in random_references(SEED + 2, 60, 50, 9) {
        for frames in 1..=6 {
            let optimal = run_policy(PolicyKind::Optimal, &reference, frames, None)?.fault_count;
            for policy in PolicyKind::ALL {
                let faults = run_policy(policy, &reference, frames, Some(frames as u64))?.fault_count;
                assert!(
                    optimal <= faults,
                    "{} beat OPTIMAL with {} frames on {:?}",
                    policy,
                    frames,
                    reference
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_clock_sweep_bound() -> Result<()> {
    for reference in random_references(SEED + 3, 30, 80, 15) {
        for frames in 1..=10 {
            let mut policy = ClockPolicy::new(frames);
            let mut resident = Vec::new();

            for (i, &page) in reference.iter().enumerate() {
                if resident.contains(&page) {
                    policy.on_access(&mut resident, page, true);
                    continue;
                }

                let victim = if resident.len() < frames {
                    None
                } else {
                    let slot = policy.evict(&resident, &reference, i)?;
                    assert!(policy.last_sweep_len() <= 2 * frames);
                    Some(slot)
                };
                policy.install(&mut resident, victim, page);
                policy.on_access(&mut resident, page, false);
            }
        }
    }
    Ok(())
}

#[test]
fn test_working_set_bound() -> Result<()> {
    for reference in random_references(SEED + 4, 20, 30, 9) {
        let session = run_session(PolicyKind::Fifo, 3, &reference)?;
        for window in 2..=10 {
            for at_step in 0..=reference.len() + 2 {
                let size = working_set(session.history(), window, at_step);
                assert!(size <= window.min(at_step));
            }
        }
    }
    Ok(())
}
