use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spring coefficients for one smoothed signal. Unit mass is assumed:
/// acceleration = stiffness * (target - value) - damping * velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringParams {
    /// Damping that puts a unit-mass spring exactly at the critical point.
    pub fn critical(stiffness: f32) -> Self {
        Self {
            stiffness,
            damping: 2.0 * stiffness.max(0.0).sqrt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerProfile {
    pub position_spring: SpringParams,
    pub hover_spring: SpringParams,
    pub size_min_px: f32,
    pub size_max_px: f32,
    pub tick_hz: u32,
}

impl Default for FollowerProfile {
    fn default() -> Self {
        Self {
            position_spring: SpringParams {
                stiffness: 300.0,
                damping: 30.0,
            },
            hover_spring: SpringParams::critical(400.0),
            size_min_px: 32.0,
            size_max_px: 80.0,
            tick_hz: 120,
        }
    }
}

/// Raw pointer input as reported by the host environment. Coordinates are
/// device pixels and may be negative or beyond the viewport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub t_ms: u64,
    pub x: f32,
    pub y: f32,
}

/// One smoothed output frame consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerFrame {
    pub t_ms: u64,
    pub x: f32,
    pub y: f32,
    pub hover_factor: f32,
    pub size_px: f32,
}

impl Default for FollowerFrame {
    fn default() -> Self {
        Self {
            t_ms: 0,
            x: 0.0,
            y: 0.0,
            hover_factor: 0.0,
            size_px: FollowerProfile::default().size_min_px,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl AppError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion,
        }
    }
}
