//! Tagged-state core shared by the interpolators.
//!
//! A [`Transition`] owns a progress value in `[0, 1]`, its velocity and a
//! [`State`]. How velocity evolves between ticks is delegated to a [`Drive`]
//! strategy; boundary handling and state changes are the same for every
//! strategy.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    #[default]
    AtStart,
    Progressing,
    AtEnd,
    Regressing,
}

impl State {
    /// True for states heading to, or resting at, the end.
    pub fn is_forward(self) -> bool {
        matches!(self, State::Progressing | State::AtEnd)
    }

    /// The state a transition resting at `value` reports.
    ///
    /// Values strictly between the ends always report `Progressing`, even
    /// when the value was reached by moving backwards.
    pub fn resting_at(value: f32) -> Self {
        if value >= 1.0 {
            State::AtEnd
        } else if value <= 0.0 {
            State::AtStart
        } else {
            State::Progressing
        }
    }
}

/// Distance from an end at which a transition heading there settles on it.
/// Absorbs the rounding left by summing `velocity * dt` over many ticks.
pub const SETTLE_TOLERANCE: f32 = 1e-4;

/// Kinematic state advanced by a [`Drive`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub progress: f32,
    pub velocity: f32,
    pub state: State,
    pub max_speed: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            progress: 0.0,
            velocity: 0.0,
            state: State::AtStart,
            max_speed: 1.0,
        }
    }
}

impl Motion {
    /// Clamp progress to `[0, 1]`.
    ///
    /// Returns the boundary when it was reached, to within
    /// [`SETTLE_TOLERANCE`], while heading for it. A crossing in any other
    /// state only clamps: velocity and state are kept.
    fn clamp(&mut self) -> Option<f32> {
        let mut edge = None;
        if self.velocity < 0.0 {
            if self.state == State::Regressing && self.progress <= SETTLE_TOLERANCE {
                edge = Some(0.0);
            } else if self.progress <= 0.0 {
                self.progress = 0.0;
            }
        } else if self.velocity > 0.0 {
            if self.state == State::Progressing && self.progress >= 1.0 - SETTLE_TOLERANCE {
                edge = Some(1.0);
            } else if self.progress >= 1.0 {
                self.progress = 1.0;
            }
        }

        self.progress = self.progress.clamp(0.0, 1.0);
        edge
    }
}

/// Outcome of a single [`Drive::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Moving,
    /// Came to rest at the given progress.
    Arrived(f32),
}

/// Velocity-update strategy plugged into a [`Transition`].
pub trait Drive: Default {
    /// Advance `motion` by `dt` seconds.
    fn step(&mut self, motion: &mut Motion, dt: f32) -> Step;

    /// Forget transient state. Called whenever the transition snaps to a value.
    fn reset(&mut self);
}

/// A progress value moving between 0 and 1 under a [`Drive`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transition<D> {
    pub(crate) motion: Motion,
    pub(crate) drive: D,
    stalled: bool,
}

impl<D: Drive> Transition<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.set_max_speed(max_speed);
        self
    }

    /// Current progress in `[0, 1]`.
    pub fn value(&self) -> f32 {
        self.motion.progress
    }

    pub fn velocity(&self) -> f32 {
        self.motion.velocity
    }

    pub fn state(&self) -> State {
        self.motion.state
    }

    pub fn max_speed(&self) -> f32 {
        self.motion.max_speed
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.motion.max_speed = max_speed;
        self.stalled = false;
    }

    pub fn drive(&self) -> &D {
        &self.drive
    }

    /// Jump to `value`, clamped to `[0, 1]`, and stop.
    pub fn set_to(&mut self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        self.motion.progress = value;
        self.motion.velocity = 0.0;
        self.motion.state = State::resting_at(value);
        self.drive.reset();
    }

    /// Advance by `dt` seconds. Does nothing while the maximum speed is zero.
    pub fn update(&mut self, dt: f32) {
        if self.motion.max_speed == 0.0 {
            if !self.stalled {
                log::warn!("transition has a maximum speed of zero and will not move");
                self.stalled = true;
            }
            return;
        }

        if let Step::Arrived(target) = self.drive.step(&mut self.motion, dt) {
            self.set_to(target);
            return;
        }

        if let Some(edge) = self.motion.clamp() {
            self.set_to(edge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Moves at whatever velocity it is given.
    #[derive(Debug, Default)]
    struct Coast {
        resets: usize,
    }

    impl Drive for Coast {
        fn step(&mut self, motion: &mut Motion, dt: f32) -> Step {
            motion.progress += motion.velocity * dt;
            Step::Moving
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn coasting(progress: f32, velocity: f32, state: State) -> Transition<Coast> {
        let mut t = Transition::<Coast>::new();
        t.motion = Motion {
            progress,
            velocity,
            state,
            max_speed: 1.0,
        };
        t
    }

    #[test]
    fn resting_state_follows_value() {
        assert_eq!(State::resting_at(0.0), State::AtStart);
        assert_eq!(State::resting_at(1.0), State::AtEnd);
        assert_eq!(State::resting_at(0.3), State::Progressing);
    }

    #[test]
    fn forward_states() {
        assert!(State::Progressing.is_forward());
        assert!(State::AtEnd.is_forward());
        assert!(!State::Regressing.is_forward());
        assert!(!State::AtStart.is_forward());
    }

    #[test]
    fn set_to_clamps_and_resets_drive() {
        let mut t = coasting(0.5, 0.4, State::Progressing);
        t.set_to(3.0);
        assert_eq!(t.value(), 1.0);
        assert_eq!(t.velocity(), 0.0);
        assert_eq!(t.state(), State::AtEnd);
        assert_eq!(t.drive().resets, 1);

        t.set_to(-2.0);
        assert_eq!(t.value(), 0.0);
        assert_eq!(t.state(), State::AtStart);
    }

    #[test]
    fn crossing_while_heading_there_settles() {
        let mut t = coasting(0.9, 1.0, State::Progressing);
        t.update(0.5);
        assert_eq!(t.value(), 1.0);
        assert_eq!(t.velocity(), 0.0);
        assert_eq!(t.state(), State::AtEnd);

        let mut t = coasting(0.1, -1.0, State::Regressing);
        t.update(0.5);
        assert_eq!(t.value(), 0.0);
        assert_eq!(t.state(), State::AtStart);
    }

    #[test]
    fn settles_just_short_of_an_end() {
        let mut t = coasting(0.999_9, 1e-6, State::Progressing);
        t.update(1.0);
        assert_eq!(t.value(), 1.0);
        assert_eq!(t.state(), State::AtEnd);

        let mut t = coasting(0.000_1, -1e-6, State::Regressing);
        t.update(1.0);
        assert_eq!(t.value(), 0.0);
        assert_eq!(t.state(), State::AtStart);

        let mut t = coasting(0.5, 0.1, State::Progressing);
        t.update(1.0);
        assert_eq!(t.state(), State::Progressing);
    }

    #[test]
    fn crossing_in_another_state_only_clamps() {
        let mut t = coasting(0.1, -1.0, State::Progressing);
        t.update(0.5);
        assert_eq!(t.value(), 0.0);
        assert_eq!(t.velocity(), -1.0);
        assert_eq!(t.state(), State::Progressing);
        assert_eq!(t.drive().resets, 0);
    }

    #[test]
    fn zero_max_speed_freezes() {
        let mut t = coasting(0.5, 1.0, State::Progressing);
        t.set_max_speed(0.0);
        t.update(1.0);
        t.update(1.0);
        assert_eq!(t.value(), 0.5);
        assert_eq!(t.state(), State::Progressing);
    }
}
