// Timer-driven playback
//
// A worker thread steps a shared session once per tick. Only one step runs at
// a time because every step happens under the session lock, and the worker is
// always stopped and joined before a reset touches the session.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use crossbeam::select;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::simulation::history::StepRecord;
use crate::simulation::session::SimulationSession;

/// Session handle shared between a presentation layer and the player
pub type SharedSession = Arc<Mutex<SimulationSession>>;

/// Notification published by the playback worker
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Step(StepRecord),
    Completed { fault_count: usize, hit_count: usize },
    Failed(String),
}

struct Worker {
    /// Dropping this sender tells the worker to stop
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Cancellable automatic stepping of a session
pub struct AutoPlayer {
    session: SharedSession,
    /// Fixed tick interval; `None` follows the session's configured speed
    interval: Option<Duration>,
    worker: Option<Worker>,
    events_tx: Sender<PlaybackEvent>,
    events_rx: Receiver<PlaybackEvent>,
}

impl AutoPlayer {
    /// Player ticking at the session's configured speed
    pub fn new(session: SharedSession) -> Self {
        Self::build(session, None)
    }

    /// Player ticking at a fixed interval regardless of configuration
    pub fn with_interval(session: SharedSession, interval: Duration) -> Self {
        Self::build(session, Some(interval))
    }

    fn build(session: SharedSession, interval: Option<Duration>) -> Self {
        let (events_tx, events_rx) = channel::unbounded();
        Self {
            session,
            interval,
            worker: None,
            events_tx,
            events_rx,
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Step records and completion notices, in order
    pub fn events(&self) -> &Receiver<PlaybackEvent> {
        &self.events_rx
    }

    /// Interval the next `play` will tick at
    pub fn interval(&self) -> Duration {
        self.interval
            .unwrap_or_else(|| self.session.lock().config().speed())
    }

    pub fn is_playing(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.handle.is_finished())
    }

    /// Resume automatic stepping from the current cursor
    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        // Reap a worker that stopped on its own
        self.pause();

        let (stop, stop_rx) = channel::bounded::<()>(0);
        let session = Arc::clone(&self.session);
        let events = self.events_tx.clone();
        let interval = self.interval();

        info!("Starting playback every {:?}", interval);
        let handle = thread::spawn(move || run_worker(session, events, stop_rx, interval));
        self.worker = Some(Worker { stop, handle });
    }

    /// Reset the session, then play from the beginning
    pub fn start(&mut self) {
        self.reset();
        self.play();
    }

    /// Stop automatic stepping; session state is left as is
    pub fn pause(&mut self) {
        let Some(Worker { stop, handle }) = self.worker.take() else {
            return;
        };
        drop(stop);
        if handle.join().is_err() {
            warn!("Playback worker panicked");
        }
        debug!("Playback stopped");
    }

    /// Cancel playback and wipe the session
    pub fn reset(&mut self) {
        self.pause();
        // Steps of the previous run must not reach the next consumer
        let stale = self.events_rx.try_iter().count();
        if stale > 0 {
            debug!("Discarded {} pending playback events", stale);
        }
        self.session.lock().reset();
    }
}

impl Drop for AutoPlayer {
    fn drop(&mut self) {
        self.pause();
    }
}

fn stop_requested(stop: &Receiver<()>) -> bool {
    matches!(stop.try_recv(), Err(TryRecvError::Disconnected) | Ok(()))
}

fn run_worker(
    session: SharedSession,
    events: Sender<PlaybackEvent>,
    stop: Receiver<()>,
    interval: Duration,
) {
    let ticker = channel::tick(interval);

    loop {
        select! {
            recv(stop) -> _ => break,
            recv(ticker) -> _ => {
                if stop_requested(&stop) {
                    break;
                }

                let mut guard = session.lock();
                if guard.is_terminal() {
                    let _ = events.send(PlaybackEvent::Completed {
                        fault_count: guard.fault_count(),
                        hit_count: guard.hit_count(),
                    });
                    break;
                }

                let event = match guard.step() {
                    Ok(record) => PlaybackEvent::Step(record.clone()),
                    Err(e) => {
                        let _ = events.send(PlaybackEvent::Failed(e.to_string()));
                        break;
                    }
                };
                let _ = events.send(event);

                if guard.is_terminal() {
                    let _ = events.send(PlaybackEvent::Completed {
                        fault_count: guard.fault_count(),
                        hit_count: guard.hit_count(),
                    });
                    break;
                }
            }
        }
    }
}
