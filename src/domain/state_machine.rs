use crate::domain::models::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowerState {
    Idle,
    Active,
    Stopped,
}

/// Session lifecycle guard. Stopped is terminal: a torn-down follower can
/// never produce updates again.
#[derive(Debug, Clone)]
pub struct FollowerMachine {
    state: FollowerState,
}

impl FollowerMachine {
    pub fn new() -> Self {
        Self {
            state: FollowerState::Idle,
        }
    }

    pub fn state(&self) -> FollowerState {
        self.state
    }

    pub fn activate(&mut self) -> Result<(), AppError> {
        if self.state != FollowerState::Idle {
            return Err(AppError::new(
                "INVALID_FOLLOWER_STATE",
                "only an idle follower can activate",
                Some("stop the current session before starting a new one".to_string()),
            ));
        }
        self.state = FollowerState::Active;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), AppError> {
        if self.state != FollowerState::Active {
            return Err(AppError::new(
                "INVALID_FOLLOWER_STATE",
                "only an active follower can stop",
                Some("activate the follower before stopping it".to_string()),
            ));
        }
        self.state = FollowerState::Stopped;
        Ok(())
    }
}

impl Default for FollowerMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{FollowerMachine, FollowerState};

    #[test]
    fn follower_machine_rejects_stop_before_activate() {
        let mut machine = FollowerMachine::new();
        let result = machine.stop();
        assert!(result.is_err());
        assert_eq!(machine.state(), FollowerState::Idle);
    }

    #[test]
    fn follower_machine_full_flow() {
        let mut machine = FollowerMachine::new();
        machine.activate().unwrap();
        machine.stop().unwrap();
        assert_eq!(machine.state(), FollowerState::Stopped);
    }

    #[test]
    fn stopped_follower_cannot_restart() {
        let mut machine = FollowerMachine::new();
        machine.activate().unwrap();
        machine.stop().unwrap();
        assert!(machine.activate().is_err());
        assert_eq!(machine.state(), FollowerState::Stopped);
    }
}
