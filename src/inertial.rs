use crate::transition::{Drive, Motion, State, Step, Transition};

/// How close to its target a braking transition must stop to count as arrived.
const ARRIVAL_TOLERANCE: f32 = 1e-3;

/// Accelerates toward a target and, optionally, brakes ahead of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inertial {
    /// Acceleration used to speed up, in progress per second squared.
    pub acceleration: f32,

    /// Deceleration used when braking. When set, the transition also starts
    /// braking on its own as soon as its stopping distance reaches the target.
    /// When unset, braking (on reversal or [`Transition::start_braking`])
    /// uses `acceleration`.
    pub braking_acceleration: Option<f32>,

    accel: f32,
    braking: bool,
    begin_target: f32,
    end_target: f32,
}

impl Default for Inertial {
    fn default() -> Self {
        Self {
            acceleration: 1.0,
            braking_acceleration: None,
            accel: 0.0,
            braking: false,
            begin_target: 0.0,
            end_target: 1.0,
        }
    }
}

impl Inertial {
    fn brake_rate(&self) -> f32 {
        self.braking_acceleration.unwrap_or(self.acceleration).abs()
    }

    /// Current acceleration applied each tick.
    pub fn accel(&self) -> f32 {
        self.accel
    }

    pub fn is_braking(&self) -> bool {
        self.braking
    }

    pub fn begin_target(&self) -> f32 {
        self.begin_target
    }

    pub fn end_target(&self) -> f32 {
        self.end_target
    }

    fn heading(state: State) -> f32 {
        match state {
            State::Progressing => 1.0,
            State::Regressing => -1.0,
            State::AtStart | State::AtEnd => 0.0,
        }
    }

    /// Engage braking if stopping now would only just make the target.
    fn look_ahead(&mut self, motion: &Motion) {
        let Some(rate) = self.braking_acceleration.map(f32::abs) else {
            return;
        };
        if self.braking || rate == 0.0 {
            return;
        }

        let stopping = motion.velocity * motion.velocity / (2.0 * rate);
        let overshoots = match motion.state {
            State::Progressing => {
                motion.velocity > 0.0 && motion.progress + stopping >= self.end_target
            }
            State::Regressing => {
                motion.velocity < 0.0 && motion.progress - stopping <= self.begin_target
            }
            State::AtStart | State::AtEnd => false,
        };

        if overshoots {
            self.accel = -motion.velocity.signum() * rate;
            self.braking = true;
        }
    }

    /// The target reached when stopping at the current progress, if any.
    fn reached(&self, motion: &Motion) -> Option<f32> {
        match motion.state {
            State::Progressing if motion.progress >= self.end_target - ARRIVAL_TOLERANCE => {
                Some(self.end_target)
            }
            State::Regressing if motion.progress <= self.begin_target + ARRIVAL_TOLERANCE => {
                Some(self.begin_target)
            }
            _ => None,
        }
    }
}

impl Drive for Inertial {
    fn step(&mut self, motion: &mut Motion, dt: f32) -> Step {
        let cap = motion.max_speed.abs();

        // 1. Respect the speed cap
        if motion.velocity.abs() >= cap {
            motion.velocity = motion.velocity.clamp(-cap, cap);
            if self.accel * motion.velocity > 0.0 {
                self.accel = 0.0;
            }
        }

        // 2. Brake ahead of the target
        self.look_ahead(motion);

        // 3. Integrate
        let before = motion.velocity;
        let after = (before + self.accel * dt).clamp(-cap, cap);

        if self.braking && before != 0.0 && after * before <= 0.0 {
            // Stopped part way through the tick: cover exactly the braking distance.
            motion.progress += before * before.abs() / (2.0 * self.accel.abs());
            motion.velocity = 0.0;
            self.braking = false;

            if let Some(target) = self.reached(motion) {
                return Step::Arrived(target);
            }

            self.accel = Self::heading(motion.state) * self.acceleration.abs();
            return Step::Moving;
        }

        motion.velocity = after;
        motion.progress += 0.5 * (before + after) * dt;

        // 4. Stop on the target when passing it
        match motion.state {
            State::Progressing if motion.velocity > 0.0 && motion.progress >= self.end_target => {
                Step::Arrived(self.end_target)
            }
            State::Regressing if motion.velocity < 0.0 && motion.progress <= self.begin_target => {
                Step::Arrived(self.begin_target)
            }
            _ => Step::Moving,
        }
    }

    fn reset(&mut self) {
        *self = Self {
            acceleration: self.acceleration,
            braking_acceleration: self.braking_acceleration,
            ..Default::default()
        };
    }
}

/// Interpolator with acceleration, a speed cap and optional braking.
///
/// ```
/// use rigging::{InertialInterpolator, State};
///
/// let mut periscope = InertialInterpolator::new()
///     .with_acceleration(2.0)
///     .with_braking_acceleration(4.0);
/// periscope.progress_to(0.5);
/// for _ in 0..200 {
///     periscope.update(1.0 / 60.0);
/// }
/// assert_eq!(periscope.value(), 0.5);
/// assert_eq!(periscope.velocity(), 0.0);
/// ```
pub type InertialInterpolator = Transition<Inertial>;

impl Transition<Inertial> {
    pub fn with_acceleration(mut self, acceleration: f32) -> Self {
        self.drive.acceleration = acceleration;
        self
    }

    pub fn with_braking_acceleration(mut self, braking: f32) -> Self {
        self.drive.braking_acceleration = Some(braking);
        self
    }

    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.drive.acceleration = acceleration;
    }

    pub fn set_braking_acceleration(&mut self, braking: Option<f32>) {
        self.drive.braking_acceleration = braking;
    }

    /// Accelerate toward `target`, which should lie ahead of the current
    /// progress; a target already behind is snapped to on the next update.
    /// Brakes first when currently moving backwards.
    pub fn progress_to(&mut self, target: f32) {
        let target = target.clamp(0.0, 1.0);
        let drive = &mut self.drive;
        if self.motion.state == State::Progressing && drive.braking && drive.end_target == target {
            return;
        }

        drive.end_target = target;
        self.motion.state = State::Progressing;
        if self.motion.velocity < 0.0 {
            drive.accel = drive.brake_rate();
            drive.braking = true;
        } else {
            drive.accel = drive.acceleration.abs();
            drive.braking = false;
        }
    }

    /// Mirror of [`Transition::progress_to`] toward the start.
    pub fn regress_to(&mut self, target: f32) {
        let target = target.clamp(0.0, 1.0);
        let drive = &mut self.drive;
        if self.motion.state == State::Regressing && drive.braking && drive.begin_target == target
        {
            return;
        }

        drive.begin_target = target;
        self.motion.state = State::Regressing;
        if self.motion.velocity > 0.0 {
            drive.accel = -drive.brake_rate();
            drive.braking = true;
        } else {
            drive.accel = -drive.acceleration.abs();
            drive.braking = false;
        }
    }

    /// Head for `target` from wherever the transition currently is.
    pub fn accelerate_to(&mut self, target: f32) {
        if target >= self.motion.progress {
            self.progress_to(target);
        } else {
            self.regress_to(target);
        }
    }

    pub fn progress(&mut self) {
        self.progress_to(1.0);
    }

    pub fn regress(&mut self) {
        self.regress_to(0.0);
    }

    pub fn toggle(&mut self) {
        if self.motion.state.is_forward() {
            self.regress();
        } else {
            self.progress();
        }
    }

    /// Decelerate to a stop as soon as possible.
    ///
    /// Re-targets the transition at its stopping point so that velocity
    /// reaches zero there. Does nothing when already braking or at rest.
    pub fn start_braking(&mut self) {
        let velocity = self.motion.velocity;
        if self.drive.braking || velocity == 0.0 {
            return;
        }

        let rate = self.drive.brake_rate();
        if rate == 0.0 {
            log::debug!("no braking acceleration configured, stopping in place");
            self.set_to(self.motion.progress);
            return;
        }

        let stopping = velocity * velocity / (2.0 * rate);
        if velocity > 0.0 {
            self.progress_to((self.motion.progress + stopping).min(1.0));
        } else {
            self.regress_to((self.motion.progress - stopping).max(0.0));
        }

        self.drive.accel = -velocity.signum() * rate;
        self.drive.braking = true;
    }
}
