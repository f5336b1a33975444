/// Largest shape parameter the solver will return. `sinh` overflows `f32` a
/// little above 89.
pub const MAX_SHAPE: f32 = 80.0;

/// Below this magnitude `sinh(s) / s` is evaluated from its Taylor series.
const SERIES_CUTOFF: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// The maximum number of Newton iterations to perform.
    pub max: usize,

    /// The error tolerance, relative to the shape parameter once it exceeds one.
    pub eps: f32,
}

impl SolverConfig {
    pub fn new(max: usize, eps: f32) -> Self {
        Self { max, eps }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max: 64, eps: 1e-6 }
    }
}

/// `sinh(s) / s`, continuous through zero.
pub fn sinhc(s: f32) -> f32 {
    if s.abs() < SERIES_CUTOFF {
        1.0 + s * s / 6.0
    } else {
        s.sinh() / s
    }
}

fn sinhc_derivative(s: f32) -> f32 {
    if s.abs() < SERIES_CUTOFF {
        s / 3.0
    } else {
        (s * s.cosh() - s.sinh()) / (s * s)
    }
}

/// Solve `sinh(s) / s = ratio` for the positive root `s`.
///
/// `sinhc` is strictly increasing on `s > 0`, so the root is first bracketed
/// by doubling and then refined with Newton steps. A step that leaves the
/// bracket is replaced by bisection, which keeps the iteration convergent for
/// ratios arbitrarily close to one.
///
/// Ratios at or below one (and NaN) have no positive root and yield zero.
/// Ratios beyond `sinhc(MAX_SHAPE)` yield [`MAX_SHAPE`].
pub fn solve_shape(ratio: f32, config: &SolverConfig) -> f32 {
    if !(ratio > 1.0) {
        return 0.0;
    }

    // 1. Bracket the root
    let mut lo = 0.0_f32;
    let mut hi = 1.0_f32;
    while sinhc(hi) < ratio && hi < MAX_SHAPE {
        lo = hi;
        hi = (hi * 2.0).min(MAX_SHAPE);
    }

    if sinhc(hi) < ratio {
        log::debug!("shape ratio {} exceeds solver range, using {}", ratio, MAX_SHAPE);
        return MAX_SHAPE;
    }

    // 2. Refine
    let mut s = 0.5 * (lo + hi);
    for i in 0..config.max {
        let residual = sinhc(s) - ratio;
        if residual < 0.0 {
            lo = s;
        } else {
            hi = s;
        }

        let mut next = s - residual / sinhc_derivative(s);
        if !(next > lo && next < hi) {
            next = 0.5 * (lo + hi);
        }

        if (next - s).abs() <= config.eps * s.max(1.0) {
            log::debug!("shape solve converged after {} iterations: s = {}", i + 1, next);
            return next;
        }

        s = next;
    }

    log::debug!(
        "shape solve stopped after {} iterations: s = {}, residual = {}",
        config.max,
        s,
        sinhc(s) - ratio
    );

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sinhc_is_one_at_zero() {
        assert_eq!(sinhc(0.0), 1.0);
        assert_relative_eq!(sinhc(1e-5), 1.0, epsilon = 1e-6);
        assert_relative_eq!(sinhc(2.0), 2.0_f32.sinh() / 2.0);
    }

    #[test]
    fn recovers_known_roots() {
        let config = SolverConfig::default();
        for s in [0.05_f32, 0.5, 1.0, 2.0, 7.5, 20.0] {
            let found = solve_shape(sinhc(s), &config);
            assert_relative_eq!(found, s, max_relative = 1e-3);
        }
    }

    #[test]
    fn no_root_at_or_below_one() {
        let config = SolverConfig::default();
        assert_eq!(solve_shape(1.0, &config), 0.0);
        assert_eq!(solve_shape(0.5, &config), 0.0);
        assert_eq!(solve_shape(-3.0, &config), 0.0);
        assert_eq!(solve_shape(f32::NAN, &config), 0.0);
    }

    #[test]
    fn huge_ratio_is_capped() {
        let config = SolverConfig::default();
        assert_eq!(solve_shape(f32::MAX, &config), MAX_SHAPE);
        assert_eq!(solve_shape(f32::INFINITY, &config), MAX_SHAPE);
    }

    #[test]
    fn iteration_budget_is_respected() {
        let config = SolverConfig::new(0, 1e-6);
        let s = solve_shape(sinhc(3.0), &config);
        // Without iterations the bracket midpoint is returned.
        assert_eq!(s, 3.0);
        assert!(sinhc(s) >= 1.0);
    }
}
