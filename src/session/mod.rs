use crate::core::hover::registry::{HoverRegistry, RegionId};
use crate::core::motion::controller::PointerFollower;
use crate::core::motion::metrics::evaluate_metrics;
use crate::domain::models::{AppError, FollowerFrame, FollowerProfile, PointerSample};
use crate::domain::state_machine::{FollowerMachine, FollowerState};
use crate::infra::trace::write_frame_trace;
use crate::state::{RuntimeState, SessionEntry};
use chrono::Utc;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Sets the ticker stop flag when dropped, so the periodic task dies with
/// the session entry on every exit path, including early unmount.
pub struct TickerGuard {
    stop: Arc<AtomicBool>,
}

impl TickerGuard {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self { stop }
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// Creates a follower session and spawns its ticker. Only one session may
/// be active at a time; the pointer state belongs to that session alone.
pub fn start_session(
    state: &Arc<RuntimeState>,
    profile: FollowerProfile,
) -> Result<String, AppError> {
    let mut sessions = state
        .sessions
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock sessions", None))?;
    let already_active = sessions.values().any(|entry| {
        entry
            .machine
            .lock()
            .map(|machine| machine.state() == FollowerState::Active)
            .unwrap_or(false)
    });
    if already_active {
        return Err(AppError::new(
            "SESSION_ALREADY_ACTIVE",
            "a follower session is already active",
            Some("stop the current session before starting a new one".to_string()),
        ));
    }

    let session_id = Uuid::new_v4().to_string();
    let mut machine = FollowerMachine::new();
    machine.activate()?;

    let stop = Arc::new(AtomicBool::new(false));
    let (frames_tx, _frames_rx) = watch::channel(FollowerFrame::default());
    let entry = Arc::new(SessionEntry {
        session_id: session_id.clone(),
        profile,
        started_at: Utc::now(),
        machine: Mutex::new(machine),
        follower: Mutex::new(PointerFollower::new(profile)),
        registry: Mutex::new(HoverRegistry::new()),
        samples: Mutex::new(Vec::new()),
        trace: Mutex::new(Vec::new()),
        frames: frames_tx,
        guard: TickerGuard::new(stop.clone()),
    });
    sessions.insert(session_id.clone(), entry);
    drop(sessions);

    let interval = Duration::from_secs_f64(1.0 / f64::from(profile.tick_hz.max(1)));
    schedule_follower_ticker(state.clone(), session_id.clone(), stop, interval);
    info!(session = %session_id, "follower session started");
    Ok(session_id)
}

/// Records a pointer-move event. Coordinates are unvalidated by design:
/// the pointer may sit outside the viewport.
pub fn move_pointer(
    state: &RuntimeState,
    session_id: &str,
    x: f32,
    y: f32,
) -> Result<(), AppError> {
    let entry = lookup(state, session_id)?;
    let elapsed_ms = (Utc::now() - entry.started_at).num_milliseconds().max(0) as u64;
    entry
        .follower
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock follower", None))?
        .move_to(x, y);
    entry
        .samples
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock samples", None))?
        .push(PointerSample {
            t_ms: elapsed_ms,
            x,
            y,
        });
    Ok(())
}

pub fn register_region(state: &RuntimeState, session_id: &str) -> Result<RegionId, AppError> {
    let entry = lookup(state, session_id)?;
    let id = entry
        .registry
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock hover registry", None))?
        .register();
    Ok(id)
}

pub fn unregister_region(
    state: &RuntimeState,
    session_id: &str,
    region: RegionId,
) -> Result<(), AppError> {
    let entry = lookup(state, session_id)?;
    let active = {
        let mut registry = entry
            .registry
            .lock()
            .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock hover registry", None))?;
        registry.unregister(region);
        registry.any_active()
    };
    sync_hover(&entry, active)
}

pub fn enter_region(
    state: &RuntimeState,
    session_id: &str,
    region: RegionId,
) -> Result<(), AppError> {
    let entry = lookup(state, session_id)?;
    let active = {
        let mut registry = entry
            .registry
            .lock()
            .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock hover registry", None))?;
        registry.enter(region);
        registry.any_active()
    };
    sync_hover(&entry, active)
}

pub fn leave_region(
    state: &RuntimeState,
    session_id: &str,
    region: RegionId,
) -> Result<(), AppError> {
    let entry = lookup(state, session_id)?;
    let active = {
        let mut registry = entry
            .registry
            .lock()
            .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock hover registry", None))?;
        registry.leave(region);
        registry.any_active()
    };
    sync_hover(&entry, active)
}

pub fn latest_frame(state: &RuntimeState, session_id: &str) -> Result<FollowerFrame, AppError> {
    let entry = lookup(state, session_id)?;
    let frame = entry
        .follower
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock follower", None))?
        .frame();
    Ok(frame)
}

/// Continuous output channel for the presentation layer: smoothed position,
/// hover factor, and derived size, one value per tick.
pub fn subscribe_frames(
    state: &RuntimeState,
    session_id: &str,
) -> Result<watch::Receiver<FollowerFrame>, AppError> {
    let entry = lookup(state, session_id)?;
    Ok(entry.frames.subscribe())
}

/// Tears the session down: stops the lifecycle machine, shuts the follower
/// down, cancels the ticker, and removes the entry. Optionally writes the
/// recorded frame trace to `trace_path`. Returns the recorded frames.
pub fn stop_session(
    state: &RuntimeState,
    session_id: &str,
    trace_path: Option<&Path>,
) -> Result<Vec<FollowerFrame>, AppError> {
    let entry = lookup(state, session_id)?;
    entry
        .machine
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock state machine", None))?
        .stop()?;
    entry.guard.request_stop();
    entry
        .follower
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock follower", None))?
        .shutdown();

    let samples = entry
        .samples
        .lock()
        .map(|samples| samples.clone())
        .unwrap_or_default();
    let frames = entry
        .trace
        .lock()
        .map(|trace| trace.clone())
        .unwrap_or_default();
    let metrics = evaluate_metrics(&samples, &frames);
    let duration_ms = (Utc::now() - entry.started_at).num_milliseconds().max(0) as u64;
    info!(
        session = %session_id,
        duration_ms,
        frames = frames.len(),
        transition_latency_ms = metrics.transition_latency_ms,
        idle_jitter_ratio = metrics.idle_jitter_ratio,
        "follower session stopped"
    );

    if let Some(path) = trace_path {
        write_frame_trace(path, &frames)?;
    }

    state
        .sessions
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock sessions", None))?
        .remove(session_id);
    Ok(frames)
}

fn lookup(state: &RuntimeState, session_id: &str) -> Result<Arc<SessionEntry>, AppError> {
    state
        .sessions
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock sessions", None))?
        .get(session_id)
        .cloned()
        .ok_or_else(|| {
            AppError::new(
                "SESSION_NOT_FOUND",
                format!("session not found: {session_id}"),
                None,
            )
        })
}

fn sync_hover(entry: &SessionEntry, active: bool) -> Result<(), AppError> {
    entry
        .follower
        .lock()
        .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock follower", None))?
        .set_hover_active(active);
    Ok(())
}

fn schedule_follower_ticker(
    state: Arc<RuntimeState>,
    session_id: String,
    stop: Arc<AtomicBool>,
    interval: Duration,
) {
    tokio::spawn(async move {
        let mut last = Instant::now();
        loop {
            tokio::time::sleep(interval).await;
            if stop.load(Ordering::SeqCst) {
                break;
            }
            let entry = {
                let sessions = match state.sessions.lock() {
                    Ok(sessions) => sessions,
                    Err(_) => break,
                };
                sessions.get(&session_id).cloned()
            };
            let Some(entry) = entry else {
                break;
            };
            let session_state = {
                let machine = match entry.machine.lock() {
                    Ok(machine) => machine,
                    Err(_) => break,
                };
                machine.state()
            };
            if session_state != FollowerState::Active {
                break;
            }

            let dt = last.elapsed().as_secs_f32();
            last = Instant::now();
            let frame = {
                let mut follower = match entry.follower.lock() {
                    Ok(follower) => follower,
                    Err(_) => break,
                };
                if follower.is_shut_down() {
                    break;
                }
                follower.tick(dt);
                follower.frame()
            };
            if let Ok(mut trace) = entry.trace.lock() {
                trace.push(frame);
            }
            entry.frames.send_replace(frame);
        }
        debug!(session = %session_id, "follower ticker exited");
    });
}
