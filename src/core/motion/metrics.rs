use crate::domain::models::{FollowerFrame, PointerSample};

#[derive(Debug, Clone, Copy)]
pub struct MotionMetrics {
    pub transition_latency_ms: u64,
    pub idle_jitter_ratio: f32,
}

/// Judges how the smoothed output tracked the raw input: how long the
/// follower took to cover 75% of the overall move, and how much it wobbles
/// once at rest. Used to sanity-check spring profiles over a recorded trace.
pub fn evaluate_metrics(samples: &[PointerSample], frames: &[FollowerFrame]) -> MotionMetrics {
    if samples.len() < 2 || frames.len() < 2 {
        return MotionMetrics {
            transition_latency_ms: 0,
            idle_jitter_ratio: 0.0,
        };
    }

    let start = samples[0];
    let target = samples.last().copied().unwrap_or(start);
    let total_dx = (target.x - start.x).abs();
    let total_dy = (target.y - start.y).abs();
    let has_x_motion = total_dx >= 1.0;
    let has_y_motion = total_dy >= 1.0;
    let axis_count = usize::from(has_x_motion) + usize::from(has_y_motion);

    let mut transition_latency_ms = 0;
    for frame in frames {
        let progress_x = if has_x_motion {
            ((frame.x - start.x).abs() / total_dx).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let progress_y = if has_y_motion {
            ((frame.y - start.y).abs() / total_dy).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let weighted_progress = if axis_count == 0 {
            0.0
        } else {
            (progress_x + progress_y) / axis_count as f32
        };
        if weighted_progress >= 0.75 {
            transition_latency_ms = frame.t_ms.saturating_sub(frames[0].t_ms);
            break;
        }
    }
    if transition_latency_ms == 0 && (has_x_motion || has_y_motion) {
        transition_latency_ms = target.t_ms.saturating_sub(start.t_ms);
    }

    let tail = frames.iter().rev().take(10).copied().collect::<Vec<_>>();
    let center_x = tail.iter().map(|frame| frame.x).sum::<f32>() / tail.len() as f32;
    let jitter = tail
        .iter()
        .map(|frame| (frame.x - center_x).abs())
        .sum::<f32>()
        / tail.len() as f32;
    let idle_jitter_ratio = if center_x.abs() < f32::EPSILON {
        0.0
    } else {
        jitter / center_x.abs()
    };

    MotionMetrics {
        transition_latency_ms,
        idle_jitter_ratio,
    }
}
