use log::{debug, info, warn};

use crate::common::types::PageId;
use crate::policy::{PolicyKind, ReplacementPolicy, Replacer};
use crate::simulation::config::SimulationConfig;
use crate::simulation::error::{Result, SimulationError};
use crate::simulation::history::StepRecord;
use crate::simulation::tlb::TlbModel;
use crate::simulation::working_set::working_set;

/// One simulation run of a single policy over a reference sequence.
///
/// The session owns its frame set, counters, history and policy state
/// outright; nothing is shared with any other session.
#[derive(Debug, Clone)]
pub struct SimulationSession {
    config: SimulationConfig,
    frames: Vec<PageId>,
    replacer: Replacer,
    cursor: usize,
    fault_count: usize,
    hit_count: usize,
    history: Vec<StepRecord>,
    tlb: Option<TlbModel>,
}

impl SimulationSession {
    /// Create a session from a configuration, validating it first
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "New {} session: {} frames, {} references",
            config.policy,
            config.frame_count,
            config.reference.len()
        );

        Ok(Self {
            frames: Vec::with_capacity(config.frame_count),
            replacer: Replacer::new(config.policy, config.frame_count, config.seed),
            cursor: 0,
            fault_count: 0,
            hit_count: 0,
            history: Vec::with_capacity(config.reference.len()),
            tlb: config.tlb_enabled.then(|| TlbModel::new(config.tlb_size)),
            config,
        })
    }

    /// Process the next reference
    pub fn step(&mut self) -> Result<&StepRecord> {
        let len = self.config.reference.len();
        if self.cursor >= len {
            warn!("step called on a terminal session (cursor {})", self.cursor);
            return Err(SimulationError::OutOfRange { cursor: self.cursor, len });
        }

        let index = self.cursor;
        let page = self.config.reference[index];

        let fault = !self.frames.contains(&page);
        let mut evicted = None;

        // Pick the victim before touching any state so a failure leaves the session as it was
        let victim = if !fault || self.frames.len() < self.config.frame_count {
            None
        } else {
            let slot = self.replacer.evict(&self.frames, &self.config.reference, index)?;
            let Some(&resident) = self.frames.get(slot) else {
                return Err(SimulationError::InvalidState(format!(
                    "victim slot {} outside {} resident pages",
                    slot,
                    self.frames.len()
                )));
            };
            evicted = Some(resident);
            Some(slot)
        };

        // The TLB sees only the references processed before this one
        let tlb_hit = self.tlb.as_mut().map(|tlb| tlb.lookup(&self.history, page));

        if fault {
            self.fault_count += 1;
            self.replacer.install(&mut self.frames, victim, page);
            self.replacer.on_access(&mut self.frames, page, false);
        } else {
            self.hit_count += 1;
            self.replacer.on_access(&mut self.frames, page, true);
        }

        debug!(
            "step {}: page {} {}{}",
            index,
            page,
            if fault { "fault" } else { "hit" },
            evicted.map(|p| format!(", evicted {}", p)).unwrap_or_default()
        );

        self.history.push(StepRecord {
            index,
            page,
            frames: self.frames.clone(),
            fault,
            evicted,
            tlb_hit,
            reference_bits: self.replacer.reference_bits(),
        });
        self.cursor += 1;

        if self.is_terminal() {
            info!(
                "{} session complete: {} faults, {} hits",
                self.config.policy, self.fault_count, self.hit_count
            );
        }

        // The record was pushed above
        self.history
            .last()
            .ok_or_else(|| SimulationError::InvalidState("history is empty after a step".to_string()))
    }

    /// Step until terminal
    pub fn run_to_end(&mut self) -> Result<()> {
        while !self.is_terminal() {
            self.step()?;
        }
        Ok(())
    }

    /// Restore the just-configured state with fresh policy state
    pub fn reset(&mut self) {
        info!("Resetting {} session", self.config.policy);
        self.frames.clear();
        self.replacer = Replacer::new(self.config.policy, self.config.frame_count, self.config.seed);
        self.cursor = 0;
        self.fault_count = 0;
        self.hit_count = 0;
        self.history.clear();
        if let Some(tlb) = self.tlb.as_mut() {
            tlb.reset();
        }
    }

    /// Swap in a new configuration and reset; the session is untouched on error
    pub fn reconfigure(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.tlb = config.tlb_enabled.then(|| TlbModel::new(config.tlb_size));
        self.config = config;
        self.reset();
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.cursor >= self.config.reference.len()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn policy(&self) -> PolicyKind {
        self.config.policy
    }

    pub fn frames(&self) -> &[PageId] {
        &self.frames
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn fault_count(&self) -> usize {
        self.fault_count
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    /// Most recent step, if any
    pub fn current_step(&self) -> Option<&StepRecord> {
        self.history.last()
    }

    /// TLB counters, when the TLB model is enabled
    pub fn tlb(&self) -> Option<&TlbModel> {
        self.tlb.as_ref()
    }

    /// Working-set size at the current cursor using the configured window
    pub fn working_set(&self) -> usize {
        working_set(&self.history, self.config.working_set_size, self.cursor)
    }
}
