use crate::core::hover::registry::HoverRegistry;
use crate::core::motion::controller::PointerFollower;
use crate::domain::models::{FollowerFrame, FollowerProfile, PointerSample};
use crate::domain::state_machine::FollowerMachine;
use crate::session::TickerGuard;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// One live follower session. Created on mount, removed on unmount; the
/// guard stops the ticker on every path that drops the entry.
pub struct SessionEntry {
    pub session_id: String,
    pub profile: FollowerProfile,
    pub started_at: DateTime<Utc>,
    pub machine: Mutex<FollowerMachine>,
    pub follower: Mutex<PointerFollower>,
    pub registry: Mutex<HoverRegistry>,
    pub samples: Mutex<Vec<PointerSample>>,
    pub trace: Mutex<Vec<FollowerFrame>>,
    pub frames: watch::Sender<FollowerFrame>,
    pub guard: TickerGuard,
}

pub struct RuntimeState {
    pub sessions: Mutex<HashMap<String, Arc<SessionEntry>>>,
}

impl RuntimeState {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self::new()
    }
}
