use std::ops::{Add, Mul, Sub};

/// Proportional-integral-derivative controller.
///
/// Works on anything that can be added, subtracted and scaled by an `f32`,
/// so the same controller drives a scalar or a `Vec3` error.
///
/// ```
/// use bevy::math::Vec3;
/// use rigging::Pid;
///
/// let mut pid = Pid::<Vec3>::new(2.0, 0.0, 0.0);
/// assert_eq!(pid.update(Vec3::X, 0.1), Vec3::new(2.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pid<T> {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    integral: T,
    last_error: Option<T>,
}

impl<T> Pid<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral: T::default(),
            last_error: None,
        }
    }

    /// Accumulated integral of the error.
    pub fn integral(&self) -> T {
        self.integral
    }

    /// Feed the current error and return the control output.
    ///
    /// The first sample after construction or [`Pid::reset`] has no
    /// derivative. A non-positive `dt` yields the proportional term only and
    /// leaves the accumulated state untouched.
    pub fn update(&mut self, error: T, dt: f32) -> T {
        if !(dt > 0.0) {
            return error * self.kp;
        }

        self.integral = self.integral + error * dt;
        let derivative = match self.last_error {
            Some(last) => (error - last) * (1.0 / dt),
            None => T::default(),
        };
        self.last_error = Some(error);

        error * self.kp + self.integral * self.ki + derivative * self.kd
    }

    pub fn reset(&mut self) {
        self.integral = T::default();
        self.last_error = None;
    }
}

impl<T> Default for Pid<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}
