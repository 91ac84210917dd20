use anyhow::Result;

use pagesim::simulation::comparison::compare_all;
use pagesim::{PolicyKind, SimulationConfig, SimulationSession};

fn main() -> Result<()> {
    // Classic textbook reference string with three frames
    let config = SimulationConfig {
        policy: PolicyKind::Clock,
        tlb_enabled: true,
        ..SimulationConfig::default()
    };
    let mut session = SimulationSession::new(config)?;

    while !session.is_terminal() {
        let record = session.step()?;
        println!(
            "step {:>2}: page {} -> {:?}{}",
            record.index,
            record.page,
            record.frames,
            if record.fault { " (fault)" } else { "" }
        );
    }

    println!("Faults: {}, hits: {}", session.fault_count(), session.hit_count());
    if let Some(tlb) = session.tlb() {
        println!("TLB hits: {}, misses: {}", tlb.hits, tlb.misses);
    }
    println!("Working set: {}", session.working_set());

    // Same input under every policy
    for result in compare_all(&session.config().reference, session.config().frame_count)? {
        println!(
            "{:<10} faults {:>2}  hits {:>2}  {:.2}%",
            result.policy_name(),
            result.fault_count,
            result.hit_count,
            result.efficiency_percent
        );
    }

    Ok(())
}
