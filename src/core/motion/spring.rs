use crate::domain::models::SpringParams;

/// One spring-driven scalar: current value plus velocity carried between
/// ticks so the relaxation decelerates naturally instead of lerping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringState {
    pub value: f32,
    pub velocity: f32,
}

impl SpringState {
    pub fn at_rest(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }
}

/// Advances the spring by `dt` seconds toward `target` with semi-implicit
/// Euler integration. Non-positive `dt` leaves the state untouched.
pub fn spring_step(state: SpringState, target: f32, params: SpringParams, dt: f32) -> SpringState {
    if dt <= 0.0 || !dt.is_finite() {
        return state;
    }
    let accel = params.stiffness * (target - state.value) - params.damping * state.velocity;
    let velocity = state.velocity + accel * dt;
    let value = state.value + velocity * dt;
    SpringState { value, velocity }
}

/// Spring step constrained to the unit interval. The hover factor must stay
/// inside [0,1] even when the configured spring is underdamped, so the value
/// is clamped and the velocity zeroed when a boundary is hit.
pub fn spring_step_unit(
    state: SpringState,
    target: f32,
    params: SpringParams,
    dt: f32,
) -> SpringState {
    let next = spring_step(state, target.clamp(0.0, 1.0), params, dt);
    if next.value < 0.0 {
        SpringState::at_rest(0.0)
    } else if next.value > 1.0 {
        SpringState::at_rest(1.0)
    } else {
        next
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{lerp, spring_step, spring_step_unit, SpringState};
    use crate::domain::models::SpringParams;

    const DT: f32 = 1.0 / 120.0;

    #[test]
    fn jump_approaches_target_monotonically_with_bounded_overshoot() {
        let params = SpringParams {
            stiffness: 400.0,
            damping: 28.0,
        };
        let mut state = SpringState::at_rest(0.0);
        let mut previous = 0.0f32;
        let mut max_seen = 0.0f32;
        let mut crossed = false;
        for _ in 0..1200 {
            state = spring_step(state, 100.0, params, DT);
            if !crossed {
                if state.value >= 100.0 {
                    crossed = true;
                } else {
                    assert!(state.value > previous);
                    previous = state.value;
                }
            }
            max_seen = max_seen.max(state.value);
        }
        assert!(crossed);
        assert!(max_seen <= 105.0);
        assert!((state.value - 100.0).abs() < 0.01);
    }

    #[test]
    fn idle_spring_stays_at_rest() {
        let params = SpringParams {
            stiffness: 300.0,
            damping: 30.0,
        };
        let state = spring_step(SpringState::at_rest(240.0), 240.0, params, DT);
        assert!((state.value - 240.0).abs() < f32::EPSILON);
        assert!(state.velocity.abs() < f32::EPSILON);
    }

    #[test]
    fn negative_and_offscreen_targets_converge() {
        let params = SpringParams {
            stiffness: 300.0,
            damping: 30.0,
        };
        for target in [-500.0f32, 0.0, 1e6] {
            let mut state = SpringState::at_rest(120.0);
            for _ in 0..2400 {
                state = spring_step(state, target, params, DT);
                assert!(state.value.is_finite());
            }
            assert!((state.value - target).abs() < target.abs().max(1.0) * 1e-3);
        }
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let params = SpringParams {
            stiffness: 400.0,
            damping: 28.0,
        };
        let state = SpringState {
            value: 10.0,
            velocity: 3.0,
        };
        assert_eq!(spring_step(state, 50.0, params, 0.0), state);
        assert_eq!(spring_step(state, 50.0, params, -1.0), state);
    }

    #[test]
    fn unit_spring_never_leaves_unit_interval() {
        // Underdamped on purpose: the raw spring would overshoot past 1.
        let params = SpringParams {
            stiffness: 400.0,
            damping: 28.0,
        };
        let mut state = SpringState::at_rest(0.0);
        for _ in 0..600 {
            state = spring_step_unit(state, 1.0, params, DT);
            assert!((0.0..=1.0).contains(&state.value));
        }
        assert!((state.value - 1.0).abs() < 0.01);
    }

    #[test]
    fn lerp_maps_hover_factor_to_size() {
        assert_eq!(lerp(32.0, 80.0, 0.0), 32.0);
        assert_eq!(lerp(32.0, 80.0, 1.0), 80.0);
        assert_eq!(lerp(32.0, 80.0, 0.5), 56.0);
        // Out-of-range factors are clamped, not extrapolated.
        assert_eq!(lerp(32.0, 80.0, 1.5), 80.0);
    }
}
