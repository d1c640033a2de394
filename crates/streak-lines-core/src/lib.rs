//! Line geometry for streak detection in timelapse frames.
//!
//! This crate is purely geometric and does not depend on any line detector.
//! It provides:
//! - integer and floating point coordinates ([`Coord`], [`DoubleCoord`]),
//! - general-form lines ([`StandardLine`]) with distance and intersection,
//! - corner-origin polar lines ([`Line`]) and their two-point conversions,
//! - axis-parameterised lines for per-pixel walks ([`CartesianLine`]),
//! - a minimal grayscale image type and frame tiling ([`ImageMatrix`]).
//!
//! Degenerate inputs produce NaN or infinite values rather than errors; check
//! [`DoubleCoord::is_rational`] where that can happen.
//!
//! ```
//! use streak_lines_core::{DoubleCoord, Line};
//!
//! let line = Line::from_points(DoubleCoord::new(3.0, 0.0), DoubleCoord::new(3.0, 10.0));
//! assert_eq!((line.theta, line.rho), (0.0, 3.0));
//!
//! let dist = line.standard_line().distance_to(DoubleCoord::new(7.0, 2.0));
//! assert!((dist - 4.0).abs() < 1e-9);
//! ```

mod cartesian;
mod coord;
mod error;
mod image;
mod line;
mod logger;
mod matrix;
mod standard_line;

pub use cartesian::{
    CartesianLine, HorizontalCartesianLine, HorizontalCartesianLineImpl,
    StraightVerticalCartesianLine, VerticalCartesianLine, VerticalCartesianLineImpl,
};
pub use coord::{Coord, DoubleCoord};
pub use error::GeometryError;
pub use image::{GrayImage, GrayImageView};
pub use line::{polar_coords, sin_cos_degrees, Line};
pub use matrix::{ImageMatrix, ImageMatrixElement};
pub use standard_line::StandardLine;

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, init_tracing_with_level};

pub use logger::init_with_level;
