//! Axis-parameterised lines for per-pixel walks.
//!
//! Lines that are closer to horizontal are walked along x, the rest along y,
//! so consecutive samples never skip a pixel.

use crate::{Coord, StandardLine};
use serde::{Deserialize, Serialize};

pub trait HorizontalCartesianLine {
    fn y(&self, x: f64) -> f64;
}

pub trait VerticalCartesianLine {
    fn x(&self, y: f64) -> f64;
}

/// `y = m·x + c`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCartesianLineImpl {
    pub m: f64,
    pub c: f64,
}

impl HorizontalCartesianLine for HorizontalCartesianLineImpl {
    #[inline]
    fn y(&self, x: f64) -> f64 {
        self.m * x + self.c
    }
}

/// `x = (y - c)·m`, where `m` is run over rise (the reciprocal of the slope).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerticalCartesianLineImpl {
    pub m: f64,
    pub c: f64,
}

impl VerticalCartesianLine for VerticalCartesianLineImpl {
    #[inline]
    fn x(&self, y: f64) -> f64 {
        (y - self.c) * self.m
    }
}

/// `x = const`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StraightVerticalCartesianLine {
    pub x: f64,
}

impl VerticalCartesianLine for StraightVerticalCartesianLine {
    #[inline]
    fn x(&self, _y: f64) -> f64 {
        self.x
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CartesianLine {
    Horizontal(HorizontalCartesianLineImpl),
    Vertical(VerticalCartesianLineImpl),
    StraightVertical(StraightVerticalCartesianLine),
}

impl CartesianLine {
    /// Pick the parameterisation with `|dependent / independent| <= 1`.
    ///
    /// Returns `None` for a degenerate line (`a == b == 0`) or non-finite
    /// coefficients.
    pub fn from_standard(line: &StandardLine) -> Option<Self> {
        if !line.is_rational() || (line.a == 0.0 && line.b == 0.0) {
            return None;
        }
        if line.b == 0.0 {
            return Some(Self::StraightVertical(StraightVerticalCartesianLine {
                x: -line.c / line.a,
            }));
        }
        let slope = -line.a / line.b;
        if slope.abs() <= 1.0 {
            Some(Self::Horizontal(HorizontalCartesianLineImpl {
                m: slope,
                c: -line.c / line.b,
            }))
        } else {
            // y = slope·x + k  =>  x = (y - k) / slope
            Some(Self::Vertical(VerticalCartesianLineImpl {
                m: 1.0 / slope,
                c: -line.c / line.b,
            }))
        }
    }

    /// Pixels of a `width × height` frame the line passes through, one per
    /// step along its dominant axis.
    pub fn pixels(&self, width: usize, height: usize) -> Vec<Coord> {
        let in_bounds = |v: f64, limit: usize| v.is_finite() && v >= 0.0 && v < limit as f64;
        match self {
            Self::Horizontal(line) => (0..width)
                .filter_map(|x| {
                    let y = line.y(x as f64).round();
                    in_bounds(y, height).then(|| Coord::new(x as i32, y as i32))
                })
                .collect(),
            Self::Vertical(line) => (0..height)
                .filter_map(|y| {
                    let x = line.x(y as f64).round();
                    in_bounds(x, width).then(|| Coord::new(x as i32, y as i32))
                })
                .collect(),
            Self::StraightVertical(line) => (0..height)
                .filter_map(|y| {
                    let x = line.x(y as f64).round();
                    in_bounds(x, width).then(|| Coord::new(x as i32, y as i32))
                })
                .collect(),
        }
    }
}
