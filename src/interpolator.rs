use crate::transition::{Drive, Motion, State, Step, Transition};

/// Moves at exactly the maximum speed, no ramp up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstantSpeed;

impl Drive for ConstantSpeed {
    fn step(&mut self, motion: &mut Motion, dt: f32) -> Step {
        motion.progress += motion.velocity * dt;
        Step::Moving
    }

    fn reset(&mut self) {}
}

/// Constant-speed interpolator between 0 and 1.
///
/// ```
/// use rigging::{Interpolator, State};
///
/// let mut door = Interpolator::new().with_max_speed(2.0);
/// door.progress();
/// for _ in 0..4 {
///     door.update(0.25);
/// }
/// assert_eq!(door.value(), 1.0);
/// assert_eq!(door.state(), State::AtEnd);
/// ```
pub type Interpolator = Transition<ConstantSpeed>;

impl Transition<ConstantSpeed> {
    /// Head for the end at full speed.
    pub fn progress(&mut self) {
        self.motion.velocity = self.motion.max_speed;
        self.motion.state = State::Progressing;
    }

    /// Head for the start at full speed.
    pub fn regress(&mut self) {
        self.motion.velocity = -self.motion.max_speed;
        self.motion.state = State::Regressing;
    }

    /// Reverse the current direction of travel.
    pub fn toggle(&mut self) {
        if self.motion.state.is_forward() {
            self.regress();
        } else {
            self.progress();
        }
    }
}
