use crate::{DoubleCoord, GeometryError, Line};
use serde::{Deserialize, Serialize};

/// A line in general form: `a·x + b·y + c = 0`.
///
/// A well-formed line never has `a == b == 0`. Lines built from two identical
/// points are undefined; none of the operations below guard against it and
/// will return NaN or infinite values instead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StandardLine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Coefficient rounding applied by `PartialEq`, in decimal digits.
const EQ_DIGITS: i32 = 8;

#[inline]
fn rounded(v: f64) -> f64 {
    let scale = 10f64.powi(EQ_DIGITS);
    (v * scale).round() / scale
}

impl PartialEq for StandardLine {
    fn eq(&self, other: &Self) -> bool {
        rounded(self.a) == rounded(other.a)
            && rounded(self.b) == rounded(other.b)
            && rounded(self.c) == rounded(other.c)
    }
}

impl StandardLine {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Line through two points, normalised so that non-vertical lines have
    /// `b = 1` and vertical ones `a = 1, b = 0`.
    pub fn from_points(p1: DoubleCoord, p2: DoubleCoord) -> Self {
        let dx = p2.x - p1.x;
        if dx == 0.0 {
            return Self::new(1.0, 0.0, -p1.x);
        }
        let slope = (p2.y - p1.y) / dx;
        Self::new(-slope, 1.0, slope * p1.x - p1.y)
    }

    /// Infinite or NaN when `b == 0`.
    #[inline]
    pub fn y_for_x(&self, x: f64) -> f64 {
        (-self.a * x - self.c) / self.b
    }

    /// Infinite or NaN when `a == 0`.
    #[inline]
    pub fn x_for_y(&self, y: f64) -> f64 {
        (-self.b * y - self.c) / self.a
    }

    /// Perpendicular distance from `point` to this line.
    pub fn distance_to(&self, point: DoubleCoord) -> f64 {
        (self.a * point.x + self.b * point.y + self.c).abs() / self.a.hypot(self.b)
    }

    /// Intersection by Cramer's rule.
    ///
    /// Parallel lines have a zero determinant and yield non-finite
    /// coordinates; test [`DoubleCoord::is_rational`] on the result.
    pub fn intersection(&self, other: &StandardLine) -> DoubleCoord {
        let det = self.a * other.b - other.a * self.b;
        DoubleCoord::new(
            (self.b * other.c - other.b * self.c) / det,
            (other.a * self.c - self.a * other.c) / det,
        )
    }

    /// Intersection with the x axis (`y = 0`).
    #[inline]
    pub fn x_intercept(&self) -> DoubleCoord {
        DoubleCoord::new(self.x_for_y(0.0), 0.0)
    }

    /// Intersection with the y axis (`x = 0`).
    #[inline]
    pub fn y_intercept(&self) -> DoubleCoord {
        DoubleCoord::new(0.0, self.y_for_x(0.0))
    }

    #[inline]
    pub fn is_rational(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }

    /// Corner-origin polar form of this line.
    ///
    /// Built from the axis intercepts. A line reaching neither axis can only
    /// come out of NaN-polluted coefficients and is reported as
    /// [`GeometryError::InvariantViolation`].
    pub fn polar_line(&self) -> Result<Line, GeometryError> {
        let x_int = self.x_intercept();
        let y_int = self.y_intercept();

        match (x_int.is_rational(), y_int.is_rational()) {
            (true, true) => {
                if x_int == y_int {
                    // through the origin: both intercepts are (0, 0)
                    let x = x_int.x + 10.0;
                    let other = DoubleCoord::new(x, self.y_for_x(x));
                    Ok(Line::from_points(x_int, other))
                } else {
                    Ok(Line::from_points(x_int, y_int))
                }
            }
            (true, false) => Ok(Line::from_points(
                x_int,
                DoubleCoord::new(x_int.x, x_int.y + 10.0),
            )),
            (false, true) => Ok(Line::from_points(
                y_int,
                DoubleCoord::new(y_int.x + 10.0, y_int.y),
            )),
            (false, false) => Err(GeometryError::InvariantViolation {
                context: "standard line intersects neither axis",
                a: self.a,
                b: self.b,
                c: self.c,
            }),
        }
    }
}
