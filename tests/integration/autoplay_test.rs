use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use parking_lot::Mutex;
use pagesim::{AutoPlayer, PlaybackEvent, PolicyKind, SimulationConfig};

#[path = "../common/mod.rs"]
mod common;
use common::{create_session, CLASSIC};

const TICK: Duration = Duration::from_millis(5);
const WAIT: Duration = Duration::from_secs(5);

fn player(policy: PolicyKind) -> Result<AutoPlayer> {
    let session = Arc::new(Mutex::new(create_session(policy, 3, &CLASSIC)?));
    Ok(AutoPlayer::with_interval(session, TICK))
}

#[test]
fn test_play_to_completion() -> Result<()> {
    let mut player = player(PolicyKind::Fifo)?;
    player.play();

    let mut steps = Vec::new();
    loop {
        match player.events().recv_timeout(WAIT)? {
            PlaybackEvent::Step(record) => steps.push(record),
            PlaybackEvent::Completed { fault_count, hit_count } => {
                assert_eq!(fault_count, 15);
                assert_eq!(hit_count, 5);
                break;
            }
            PlaybackEvent::Failed(err) => panic!("playback failed: {}", err),
        }
    }

    // One event per step, in order
    assert_eq!(steps.len(), CLASSIC.len());
    for (i, record) in steps.iter().enumerate() {
        assert_eq!(record.index, i);
    }

    let session = player.session().lock();
    assert!(session.is_terminal());
    assert_eq!(session.history(), steps.as_slice());
    Ok(())
}

#[test]
fn test_pause_freezes_state() -> Result<()> {
    let mut player = player(PolicyKind::Lru)?;
    player.play();
    player.events().recv_timeout(WAIT)?;
    player.pause();
    assert!(!player.is_playing());

    let cursor = player.session().lock().cursor();
    assert!(cursor >= 1);

    thread::sleep(TICK * 10);
    let session = player.session().lock();
    assert_eq!(session.cursor(), cursor);
    assert_eq!(session.fault_count() + session.hit_count(), cursor);
    Ok(())
}

#[test]
fn test_reset_during_playback() -> Result<()> {
    let mut player = player(PolicyKind::Clock)?;
    player.play();
    player.events().recv_timeout(WAIT)?;

    player.reset();
    assert!(!player.is_playing());

    // Nothing from the previous run is left to drain
    assert!(player.events().try_recv().is_err());

    // No stale tick reaches the reset session
    thread::sleep(TICK * 10);
    let session = player.session().lock();
    assert_eq!(session.cursor(), 0);
    assert!(session.history().is_empty());
    assert!(session.frames().is_empty());
    Ok(())
}

#[test]
fn test_resume_after_pause() -> Result<()> {
    let mut player = player(PolicyKind::Optimal)?;
    player.play();
    player.events().recv_timeout(WAIT)?;
    player.pause();
    player.play();

    loop {
        if let PlaybackEvent::Completed { fault_count, .. } = player.events().recv_timeout(WAIT)? {
            assert_eq!(fault_count, 9);
            break;
        }
    }
    Ok(())
}

#[test]
fn test_start_restarts_from_scratch() -> Result<()> {
    let mut player = player(PolicyKind::Fifo)?;
    player.session().lock().run_to_end()?;

    player.start();
    let first = loop {
        if let PlaybackEvent::Step(record) = player.events().recv_timeout(WAIT)? {
            break record;
        }
    };
    assert_eq!(first.index, 0);
    Ok(())
}

#[test]
fn test_reset_discards_pending_events() -> Result<()> {
    let mut player = player(PolicyKind::Fifo)?;
    player.play();
    // Let several steps pile up unread
    while player.session().lock().cursor() < 3 {
        thread::sleep(TICK);
    }

    player.reset();
    assert!(player.events().try_iter().next().is_none());

    player.play();
    match player.events().recv_timeout(WAIT)? {
        PlaybackEvent::Step(record) => assert_eq!(record.index, 0),
        other => panic!("expected the first step, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_interval_follows_reconfigured_speed() -> Result<()> {
    let session = Arc::new(Mutex::new(create_session(PolicyKind::Lru, 3, &CLASSIC)?));
    let player = AutoPlayer::new(Arc::clone(&session));
    assert_eq!(player.interval(), Duration::from_millis(1000));

    let config = SimulationConfig {
        speed_ms: 250,
        ..session.lock().config().clone()
    };
    session.lock().reconfigure(config)?;
    assert_eq!(player.interval(), Duration::from_millis(250));

    // A fixed interval ignores configuration
    let fixed = AutoPlayer::with_interval(session, TICK);
    assert_eq!(fixed.interval(), TICK);
    Ok(())
}
