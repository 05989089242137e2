//! Plane geometry primitives: points, angled legs, linear spacing.

use serde::{Deserialize, Serialize};

/// Below this magnitude a sine or cosine is treated as zero.
const DEGENERATE_EPS: f64 = 1e-9;

/// A point on the chart plane (x = time, y = price).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Direction of a straight price leg, precomputed from an angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    pub degrees: f64,
    pub sin: f64,
    pub cos: f64,
    pub tan: f64,
}

impl Heading {
    pub fn from_degrees(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self {
            degrees,
            sin: rad.sin(),
            cos: rad.cos(),
            tan: rad.tan(),
        }
    }

    /// True when the angle is (numerically) a multiple of 90°, i.e. the
    /// slope is vertical or horizontal and one of sin/cos/tan collapses.
    pub fn is_axis_aligned(&self) -> bool {
        self.sin.abs() < DEGENERATE_EPS || self.cos.abs() < DEGENERATE_EPS
    }

    /// X offset needed to move `dy` in price along this heading.
    pub fn run_for_rise(&self, dy: f64) -> f64 {
        dy / self.tan
    }
}

/// `n` evenly spaced samples from `start` to `end`, both ends inclusive.
///
/// A single sample collapses to `end`; zero samples is an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![end],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
