use pointer_motion::domain::models::{AppError, FollowerProfile};
use pointer_motion::infra::logging::init_tracing;
use pointer_motion::infra::pointer::current_pointer_position;
use pointer_motion::session;
use pointer_motion::state::RuntimeState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() {
    init_tracing();
    run().await.expect("failed to run pointer-motion demo");
}

/// Drives one follower session end to end: scripted pointer input by
/// default, or the live OS cursor with POINTER_MOTION_LIVE=1 on platforms
/// that support polling. The frame trace lands in the temp dir unless
/// POINTER_MOTION_TRACE_PATH overrides it.
async fn run() -> Result<(), AppError> {
    let state = Arc::new(RuntimeState::new());
    let session_id = session::start_session(&state, FollowerProfile::default())?;
    let region = session::register_region(&state, &session_id)?;

    let live = std::env::var("POINTER_MOTION_LIVE")
        .map(|value| value == "1")
        .unwrap_or(false);
    if live && current_pointer_position().is_some() {
        info!("tracking live cursor for three seconds");
        for _ in 0..60 {
            if let Some((x, y)) = current_pointer_position() {
                session::move_pointer(&state, &session_id, x, y)?;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    } else {
        info!("replaying scripted pointer path");
        let waypoints: [(f32, f32); 8] = [
            (120.0, 90.0),
            (340.0, 180.0),
            (560.0, 320.0),
            (760.0, 410.0),
            (820.0, 430.0),
            (640.0, 520.0),
            (300.0, 640.0),
            (-40.0, 700.0),
        ];
        for (index, (x, y)) in waypoints.iter().enumerate() {
            session::move_pointer(&state, &session_id, *x, *y)?;
            if index == 3 {
                session::enter_region(&state, &session_id, region)?;
            }
            if index == 5 {
                session::leave_region(&state, &session_id, region)?;
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
            let frame = session::latest_frame(&state, &session_id)?;
            info!(
                x = frame.x,
                y = frame.y,
                hover = frame.hover_factor,
                size = frame.size_px,
                "follower frame"
            );
        }
    }

    session::unregister_region(&state, &session_id, region)?;
    let trace_path = std::env::var("POINTER_MOTION_TRACE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("pointer-motion-trace.json"));
    let frames = session::stop_session(&state, &session_id, Some(&trace_path))?;
    info!(
        frames = frames.len(),
        path = %trace_path.display(),
        "demo finished"
    );
    Ok(())
}
