use crate::StandardLine;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two pixel coordinates.
    pub fn distance(&self, other: Coord) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

/// Truncates toward zero, like a plain `as` cast.
impl From<DoubleCoord> for Coord {
    fn from(p: DoubleCoord) -> Self {
        Self {
            x: p.x as i32,
            y: p.y as i32,
        }
    }
}

/// Floating point coordinate, used wherever sub-pixel precision matters.
///
/// Nothing here validates its inputs: coordinates derived from degenerate
/// geometry may carry NaN or infinities, so check [`DoubleCoord::is_rational`]
/// before trusting a computed point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DoubleCoord {
    pub x: f64,
    pub y: f64,
}

impl DoubleCoord {
    pub const ORIGIN: DoubleCoord = DoubleCoord { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn has_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Finite and not NaN: safe to feed into further geometry.
    #[inline]
    pub fn is_rational(&self) -> bool {
        self.is_finite() && !self.has_nan()
    }

    pub fn distance(&self, other: DoubleCoord) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// General-form line through `self` and `other`.
    pub fn standard_line(&self, other: DoubleCoord) -> StandardLine {
        StandardLine::from_points(*self, other)
    }

    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> DoubleCoord {
        DoubleCoord::new(self.x + dx, self.y + dy)
    }
}

impl From<Coord> for DoubleCoord {
    fn from(c: Coord) -> Self {
        Self {
            x: f64::from(c.x),
            y: f64::from(c.y),
        }
    }
}

impl From<Point2<f64>> for DoubleCoord {
    fn from(p: Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<DoubleCoord> for Point2<f64> {
    fn from(p: DoubleCoord) -> Self {
        Point2::new(p.x, p.y)
    }
}
