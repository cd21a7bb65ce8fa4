use crate::domain::models::{AppError, FollowerFrame};
use std::path::Path;

/// Persists a recorded follower trace as pretty JSON so a motion profile
/// can be inspected or replayed offline.
pub fn write_frame_trace(path: &Path, frames: &[FollowerFrame]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            AppError::new(
                "IO_ERROR",
                format!("failed to create frame trace dir: {error}"),
                None,
            )
        })?;
    }
    let content = serde_json::to_string_pretty(frames).map_err(|error| {
        AppError::new(
            "IO_ERROR",
            format!("failed to serialize frame trace: {error}"),
            None,
        )
    })?;
    std::fs::write(path, content).map_err(|error| {
        AppError::new(
            "IO_ERROR",
            format!("failed to write frame trace: {error}"),
            None,
        )
    })
}

pub fn read_frame_trace(path: &Path) -> Result<Vec<FollowerFrame>, AppError> {
    let content = std::fs::read_to_string(path).map_err(|error| {
        AppError::new(
            "IO_ERROR",
            format!("failed to read frame trace: {error}"),
            None,
        )
    })?;
    serde_json::from_str(&content).map_err(|error| {
        AppError::new(
            "IO_ERROR",
            format!("failed to parse frame trace: {error}"),
            None,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{read_frame_trace, write_frame_trace};
    use crate::domain::models::FollowerFrame;

    #[test]
    fn trace_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frames.json");
        let frames = vec![
            FollowerFrame {
                t_ms: 0,
                x: 0.0,
                y: 0.0,
                hover_factor: 0.0,
                size_px: 32.0,
            },
            FollowerFrame {
                t_ms: 8,
                x: 4.2,
                y: 3.1,
                hover_factor: 0.2,
                size_px: 41.6,
            },
        ];
        write_frame_trace(&path, &frames).unwrap();
        let recorded = read_frame_trace(&path).unwrap();
        assert_eq!(recorded, frames);
    }

    #[test]
    fn frames_serialize_with_camel_case_keys() {
        let json = serde_json::to_string(&FollowerFrame::default()).unwrap();
        assert!(json.contains("\"tMs\""));
        assert!(json.contains("\"hoverFactor\""));
        assert!(json.contains("\"sizePx\""));
    }

    #[test]
    fn missing_trace_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let error = read_frame_trace(&missing).unwrap_err();
        assert_eq!(error.code, "IO_ERROR");
    }
}
