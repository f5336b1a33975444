use bevy::math::Vec3;

use crate::solver::{self, SolverConfig};

/// Horizontal spans shorter than this cannot carry a catenary.
const MIN_SPAN: f32 = 1e-6;

/// Shape parameters below this are indistinguishable from a taut line.
const MIN_SHAPE: f32 = 1e-4;

/// A catenary hanging between two anchors.
///
/// The curve is described in a local frame whose origin is the start anchor,
/// whose vertical axis is `up` and whose horizontal axis points along the
/// planar projection of `end - start`:
///
/// ```text
/// y(x) = a * cosh((x - p) / a) + q,    x in [0, span]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Catenary {
    start: Vec3,
    end: Vec3,
    up: Vec3,
    span: f32,
    a: f32,
    p: f32,
    q: f32,
}

impl Catenary {
    /// Fit a cable of `length` between `start` and `end`, hanging along `-Y`.
    ///
    /// Returns `None` when no sagging curve exists: the anchors are at least
    /// `length` apart, they are stacked vertically, or the cable is so nearly
    /// taut that its shape parameter falls below `MIN_SHAPE`.
    pub fn fit(start: Vec3, end: Vec3, length: f32, config: &SolverConfig) -> Option<Self> {
        Self::fit_with_up(start, end, length, Vec3::Y, config)
    }

    /// Like [`Catenary::fit`] with a custom up axis. A zero axis falls back to `Vec3::Y`.
    pub fn fit_with_up(
        start: Vec3,
        end: Vec3,
        length: f32,
        up: Vec3,
        config: &SolverConfig,
    ) -> Option<Self> {
        let up = up.try_normalize().unwrap_or(Vec3::Y);
        let diff = end - start;
        if !(diff.length() < length) {
            return None;
        }

        let y_diff = diff.dot(up);
        let x_diff = (diff - up * y_diff).length();
        if x_diff < MIN_SPAN {
            return None;
        }

        let ratio = (length * length - y_diff * y_diff).sqrt() / x_diff;
        let s = solver::solve_shape(ratio, config);
        if s < MIN_SHAPE {
            return None;
        }

        // |y_diff| < length here, so the logarithm is finite.
        let a = x_diff / s / 2.0;
        let p = (x_diff - a * ((length + y_diff) / (length - y_diff)).ln()) / 2.0;
        let q = (y_diff - length / s.tanh()) / 2.0;

        log::debug!("catenary fit: a = {}, p = {}, q = {}, s = {}", a, p, q, s);

        Some(Self {
            start,
            end,
            up,
            span: x_diff,
            a,
            p,
            q,
        })
    }

    /// Catenary scale `a`; larger values mean a flatter cable.
    pub fn scale(&self) -> f32 {
        self.a
    }

    /// Horizontal distance from the start anchor to the lowest point of the full curve.
    pub fn apex_offset(&self) -> f32 {
        self.p
    }

    /// Vertical offset `q` of the curve relative to the start anchor.
    pub fn vertical_offset(&self) -> f32 {
        self.q
    }

    /// Horizontal distance between the anchors.
    pub fn span(&self) -> f32 {
        self.span
    }

    /// Height above the start anchor at normalised horizontal position `t`.
    ///
    /// Evaluates `a * cosh((x - p) / a) + q` in product form, which avoids the
    /// cancellation between two large terms when the cable is nearly taut.
    pub fn height_at(&self, t: f32) -> f32 {
        let x = t * self.span;
        let two_a = 2.0 * self.a;
        two_a * ((x - 2.0 * self.p) / two_a).sinh() * (x / two_a).sinh()
    }

    /// Point on the cable at normalised horizontal position `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let diff = self.end - self.start;
        let planar = diff - self.up * diff.dot(self.up);
        self.start + planar * t + self.up * self.height_at(t)
    }
}

/// Samples cables into caller-owned point buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatenarySolver {
    pub config: SolverConfig,
    up: Vec3,
}

impl Default for CatenarySolver {
    fn default() -> Self {
        Self {
            config: SolverConfig::default(),
            up: Vec3::Y,
        }
    }
}

impl CatenarySolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Use `up` as the vertical axis. A zero axis falls back to `Vec3::Y`.
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up.try_normalize().unwrap_or(Vec3::Y);
        self
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Overwrite `points` with the shape of a cable of `length` hanging
    /// between `p1` and `p2`.
    ///
    /// A taut cable (`segments == 1`, or anchors at least `length` apart)
    /// yields exactly `[p1, p2]`. Otherwise `segments + 1` points are written.
    /// When no curve can be fitted (vertical or coincident anchors, or a
    /// nearly taut cable) the points lie on the straight line between the
    /// anchors. The first and last points are always exactly `p1` and `p2`.
    pub fn solve(
        &self,
        points: &mut Vec<Vec3>,
        p1: Vec3,
        p2: Vec3,
        segments: usize,
        length: f32,
    ) {
        let segments = segments.max(1);
        points.clear();

        if segments == 1 || !(p1.distance(p2) < length) {
            points.push(p1);
            points.push(p2);
            return;
        }

        let step = 1.0 / segments as f32;
        match Catenary::fit_with_up(p1, p2, length, self.up, &self.config) {
            Some(curve) => points.extend((0..=segments).map(|i| curve.point_at(i as f32 * step))),
            None => {
                log::debug!("no catenary between {} and {}, sampling a straight line", p1, p2);
                let diff = p2 - p1;
                points.extend((0..=segments).map(|i| p1 + diff * (i as f32 * step)));
            }
        }

        points[0] = p1;
        points[segments] = p2;
    }
}

/// [`CatenarySolver::solve`] with the default configuration.
pub fn solve(points: &mut Vec<Vec3>, p1: Vec3, p2: Vec3, segments: usize, length: f32) {
    CatenarySolver::default().solve(points, p1, p2, segments, length);
}
