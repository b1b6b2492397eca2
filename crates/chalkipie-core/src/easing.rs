//! Cubic-bezier timing curves, evaluated the way CSS
//! `transition-timing-function: cubic-bezier(...)` does.
//!
//! The lift car is animated by a CSS transition; the character riding inside
//! it is moved by [`CubicBezier::evaluate`] so both follow the same curve.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_PRECISION: f64 = 1e-5;
const MIN_SLOPE: f64 = 1e-6;

/// Timing curve with fixed end points (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p1x: f64,
    pub p1y: f64,
    pub p2x: f64,
    pub p2y: f64,
}

/// The lift's ease-in-out curve
pub const LIFT_EASE: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);

impl Default for CubicBezier {
    fn default() -> Self {
        LIFT_EASE
    }
}

impl CubicBezier {
    pub const fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        Self { p1x, p1y, p2x, p2y }
    }

    /// x control points must stay inside [0, 1] for x(u) to be monotonic
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [self.p1x, self.p1y, self.p2x, self.p2y].iter().all(|v| v.is_finite());
        if !finite {
            return Err(ConfigError::InvalidEasing(self.css()));
        }
        if !(0.0..=1.0).contains(&self.p1x) || !(0.0..=1.0).contains(&self.p2x) {
            return Err(ConfigError::InvalidEasing(self.css()));
        }
        Ok(())
    }

    /// CSS function notation, e.g. `cubic-bezier(0.4, 0, 0.2, 1)`
    pub fn css(&self) -> String {
        format!("cubic-bezier({}, {}, {}, {})", self.p1x, self.p1y, self.p2x, self.p2y)
    }

    /// y of the curve at time fraction `t` (clamped to [0, 1])
    pub fn evaluate(&self, t: f64) -> f64 {
        evaluate(t, self.p1x, self.p1y, self.p2x, self.p2y)
    }
}

// Polynomial coefficients for one axis: B(u) = ((a*u + b)*u + c)*u
#[inline]
fn coefficients(p1: f64, p2: f64) -> (f64, f64, f64) {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (a, b, c)
}

#[inline]
fn sample(u: f64, p1: f64, p2: f64) -> f64 {
    let (a, b, c) = coefficients(p1, p2);
    ((a * u + b) * u + c) * u
}

#[inline]
fn slope(u: f64, p1: f64, p2: f64) -> f64 {
    let (a, b, c) = coefficients(p1, p2);
    (3.0 * a * u + 2.0 * b) * u + c
}

/// Solve x(u) = t for u with Newton-Raphson, then return y(u).
///
/// Stops early on a flat derivative and keeps the best estimate so far.
pub fn evaluate(t: f64, p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> f64 {
    if !t.is_finite() || t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut u = t;
    for _ in 0..NEWTON_ITERATIONS {
        let error = sample(u, p1x, p2x) - t;
        if error.abs() < NEWTON_PRECISION {
            break;
        }
        let d = slope(u, p1x, p2x);
        if d.abs() < MIN_SLOPE {
            break;
        }
        u = (u - error / d).clamp(0.0, 1.0);
    }

    sample(u, p1y, p2y).clamp(0.0, 1.0)
}
