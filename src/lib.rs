//! Small numerical helpers for game rigs: hanging cables, eased transitions
//! with optional inertia, ADSR envelopes and PID controllers.
//!
//! Everything here is a plain value type advanced by the caller, once per
//! frame or tick. Degenerate input is absorbed by clamping rather than
//! reported as an error.

pub mod catenary;
pub mod envelope;
pub mod inertial;
pub mod interpolator;
pub mod pid;
pub mod solver;
pub mod transition;

pub use catenary::{Catenary, CatenarySolver};
pub use envelope::{Envelope, Stage};
pub use inertial::{Inertial, InertialInterpolator};
pub use interpolator::{ConstantSpeed, Interpolator};
pub use pid::Pid;
pub use solver::SolverConfig;
pub use transition::{Drive, Motion, State, Step, Transition};
