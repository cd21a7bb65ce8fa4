pub mod core;
pub mod domain;
pub mod infra;
pub mod session;
pub mod state;

pub use crate::core::hover::registry::{HoverRegistry, RegionId};
pub use crate::core::motion::controller::PointerFollower;
pub use crate::core::motion::spring::{lerp, spring_step, SpringState};
pub use crate::domain::models::{AppError, FollowerFrame, FollowerProfile, SpringParams};
pub use crate::state::RuntimeState;
