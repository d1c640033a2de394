//! Corner-origin polar lines.
//!
//! A [`Line`] is `x·cos θ + y·sin θ = ρ` with `θ` in degrees and the origin
//! pinned to the top-left pixel of the image, not its center. Detectors report
//! a vote count with each line; lines derived analytically carry zero votes.

use crate::{DoubleCoord, StandardLine};
use log::trace;
use serde::{Deserialize, Serialize};

/// Distance of the auxiliary point used to build the ray toward `theta`.
const RHO_RAY_LENGTH: f64 = 100.0;

/// Offset along the line used when `rho` is too small to span two points.
const DEGENERATE_RHO_STEP: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Angle of the line normal, degrees.
    pub theta: f64,
    /// Distance from the image corner, pixels.
    pub rho: f64,
    pub votes: u32,
}

impl Line {
    pub const fn new(theta: f64, rho: f64) -> Self {
        Self::with_votes(theta, rho, 0)
    }

    pub const fn with_votes(theta: f64, rho: f64, votes: u32) -> Self {
        Self { theta, rho, votes }
    }

    /// Line through two distinct points.
    pub fn from_points(p1: DoubleCoord, p2: DoubleCoord) -> Self {
        Self::from_points_with_votes(p1, p2, 0)
    }

    pub fn from_points_with_votes(p1: DoubleCoord, p2: DoubleCoord, votes: u32) -> Self {
        let (theta, rho) = polar_coords(p1, p2);
        Self { theta, rho, votes }
    }

    /// Two points lying on this line.
    ///
    /// The first is the foot of the normal from the origin. The second sits
    /// 45° further around at distance `√2·ρ`, which is the foot moved `ρ`
    /// along the line. With `ρ ≈ 0` both would coincide, so the second point
    /// is then taken a fixed step along the line instead.
    pub fn two_points(&self) -> (DoubleCoord, DoubleCoord) {
        let (sin, cos) = sin_cos_degrees(self.theta);
        let foot = DoubleCoord::new(self.rho * cos, self.rho * sin);
        let step = if self.rho.abs() < 1e-9 {
            DEGENERATE_RHO_STEP
        } else {
            self.rho
        };
        (foot, foot.translated(-step * sin, step * cos))
    }

    pub fn standard_line(&self) -> StandardLine {
        let (p1, p2) = self.two_points();
        StandardLine::from_points(p1, p2)
    }
}

/// `(sin, cos)` of an angle in degrees, exact on the axes.
pub fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    match degrees.rem_euclid(360.0) {
        r if r == 0.0 => (0.0, 1.0),
        r if r == 90.0 => (1.0, 0.0),
        r if r == 180.0 => (0.0, -1.0),
        r if r == 270.0 => (-1.0, 0.0),
        _ => degrees.to_radians().sin_cos(),
    }
}

/// Corner-origin `(theta, rho)` of the line through `p1` and `p2`.
///
/// `p1 == p2` is undefined. Non-finite inputs propagate into the result, so
/// callers that may see them must check the output before use.
pub fn polar_coords(p1: DoubleCoord, p2: DoubleCoord) -> (f64, f64) {
    if p1.x == p2.x {
        return if p1.x > 0.0 {
            (0.0, p1.x)
        } else {
            (180.0, -p1.x)
        };
    }
    if p1.y == p2.y {
        return if p1.y > 0.0 {
            (90.0, p1.y)
        } else {
            (270.0, -p1.y)
        };
    }

    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let line_theta = (dx.abs() / dx.hypot(dy)).acos().to_degrees();
    let line = StandardLine::from_points(p1, p2);

    let positive_in_both_directions = (dx > 0.0) == (dy > 0.0);
    let mut theta = if positive_in_both_directions {
        if line.y_for_x(0.0) < 0.0 {
            line_theta - 90.0
        } else {
            line_theta + 90.0
        }
    } else {
        90.0 - line_theta
    };

    let (left, right) = if p1.x < p2.x { (p1, p2) } else { (p2, p1) };
    let need_flip = left.y > right.y;
    let traversal_theta = if need_flip {
        360.0 - line_theta
    } else {
        line_theta
    };
    trace!(
        "polar_coords: line_theta={line_theta:.4} traversal_theta={traversal_theta:.4} theta={theta:.4}"
    );

    let (sin, cos) = sin_cos_degrees(theta);
    let ray = StandardLine::from_points(
        DoubleCoord::ORIGIN,
        DoubleCoord::new(RHO_RAY_LENGTH * cos, RHO_RAY_LENGTH * sin),
    );
    let foot = line.intersection(&ray);
    let rho = foot.x.hypot(foot.y);

    // foot behind the origin: the normal points the other way
    if foot.x * cos + foot.y * sin < 0.0 {
        theta += 180.0;
    }

    (theta, rho)
}
