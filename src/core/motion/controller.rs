use crate::core::motion::spring::{lerp, spring_step, spring_step_unit, SpringState};
use crate::domain::models::{FollowerFrame, FollowerProfile};

/// Pointer-follow motion controller. Holds the raw pointer position, the
/// spring-smoothed follower position, and the smoothed hover emphasis
/// signal. All updates happen in `tick`; every other method is either an
/// input setter or a read-only view. Deterministic for a given sequence of
/// inputs and `dt` values.
#[derive(Debug, Clone)]
pub struct PointerFollower {
    profile: FollowerProfile,
    raw_x: f32,
    raw_y: f32,
    x: SpringState,
    y: SpringState,
    hover_target: f32,
    hover: SpringState,
    elapsed_ms: f64,
    shut_down: bool,
}

impl PointerFollower {
    pub fn new(profile: FollowerProfile) -> Self {
        Self {
            profile,
            raw_x: 0.0,
            raw_y: 0.0,
            x: SpringState::at_rest(0.0),
            y: SpringState::at_rest(0.0),
            hover_target: 0.0,
            hover: SpringState::at_rest(0.0),
            elapsed_ms: 0.0,
            shut_down: false,
        }
    }

    /// Records a pointer-move event. No bounds checks: coordinates outside
    /// the viewport (including negative ones) are valid input.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.raw_x = x;
        self.raw_y = y;
    }

    /// Sets the hover attractor. The target is always exactly 0 or 1; the
    /// smoothed factor relaxes toward it over subsequent ticks.
    pub fn set_hover_active(&mut self, active: bool) {
        self.hover_target = if active { 1.0 } else { 0.0 };
    }

    /// Advances the smoothed signals by `dt` seconds. A no-op once the
    /// follower has been shut down, so no tick scheduled before teardown
    /// can mutate state after it.
    pub fn tick(&mut self, dt: f32) {
        if self.shut_down {
            return;
        }
        self.x = spring_step(self.x, self.raw_x, self.profile.position_spring, dt);
        self.y = spring_step(self.y, self.raw_y, self.profile.position_spring, dt);
        self.hover = spring_step_unit(self.hover, self.hover_target, self.profile.hover_spring, dt);
        if dt > 0.0 && dt.is_finite() {
            self.elapsed_ms += f64::from(dt) * 1000.0;
        }
    }

    pub fn shutdown(&mut self) {
        self.shut_down = true;
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn raw_position(&self) -> (f32, f32) {
        (self.raw_x, self.raw_y)
    }

    pub fn smoothed_position(&self) -> (f32, f32) {
        (self.x.value, self.y.value)
    }

    pub fn hover_target(&self) -> f32 {
        self.hover_target
    }

    pub fn hover_factor(&self) -> f32 {
        self.hover.value
    }

    pub fn follower_size(&self) -> f32 {
        lerp(
            self.profile.size_min_px,
            self.profile.size_max_px,
            self.hover.value,
        )
    }

    pub fn frame(&self) -> FollowerFrame {
        FollowerFrame {
            t_ms: self.elapsed_ms as u64,
            x: self.x.value,
            y: self.y.value,
            hover_factor: self.hover.value,
            size_px: self.follower_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PointerFollower;
    use crate::domain::models::FollowerProfile;

    const DT: f32 = 1.0 / 120.0;

    fn settled(follower: &mut PointerFollower, ticks: u32) {
        for _ in 0..ticks {
            follower.tick(DT);
        }
    }

    #[test]
    fn smoothed_position_converges_to_last_raw_position() {
        let mut follower = PointerFollower::new(FollowerProfile::default());
        follower.move_to(640.0, 360.0);
        follower.move_to(-80.0, 2200.0);
        settled(&mut follower, 2400);
        let (x, y) = follower.smoothed_position();
        assert!((x - -80.0).abs() < 0.05);
        assert!((y - 2200.0).abs() < 0.05);
    }

    #[test]
    fn hover_factor_stays_in_unit_interval() {
        let mut follower = PointerFollower::new(FollowerProfile::default());
        follower.set_hover_active(true);
        for _ in 0..600 {
            follower.tick(DT);
            assert!((0.0..=1.0).contains(&follower.hover_factor()));
        }
        follower.set_hover_active(false);
        for _ in 0..600 {
            follower.tick(DT);
            assert!((0.0..=1.0).contains(&follower.hover_factor()));
        }
        assert!(follower.hover_factor() < 0.01);
    }

    #[test]
    fn hover_target_is_binary_immediately_after_each_toggle() {
        let mut follower = PointerFollower::new(FollowerProfile::default());
        follower.set_hover_active(true);
        assert_eq!(follower.hover_target(), 1.0);
        follower.set_hover_active(false);
        assert_eq!(follower.hover_target(), 0.0);
        follower.set_hover_active(true);
        assert_eq!(follower.hover_target(), 1.0);
    }

    #[test]
    fn follower_size_tracks_hover_emphasis() {
        let profile = FollowerProfile::default();
        let mut follower = PointerFollower::new(profile);
        assert_eq!(follower.follower_size(), profile.size_min_px);
        follower.set_hover_active(true);
        settled(&mut follower, 1200);
        assert!((follower.follower_size() - profile.size_max_px).abs() < 0.5);
    }

    #[test]
    fn ticks_after_shutdown_change_nothing() {
        let mut follower = PointerFollower::new(FollowerProfile::default());
        follower.move_to(100.0, 100.0);
        follower.set_hover_active(true);
        settled(&mut follower, 60);
        follower.shutdown();
        let before = follower.frame();
        follower.move_to(900.0, 900.0);
        settled(&mut follower, 600);
        assert_eq!(follower.frame(), before);
    }

    #[test]
    fn update_is_deterministic_for_a_given_input_sequence() {
        let run = || {
            let mut follower = PointerFollower::new(FollowerProfile::default());
            follower.move_to(300.0, 120.0);
            follower.tick(DT);
            follower.set_hover_active(true);
            follower.tick(DT * 2.0);
            follower.move_to(10.0, -40.0);
            follower.tick(DT);
            follower.frame()
        };
        assert_eq!(run(), run());
    }
}
