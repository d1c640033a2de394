//! Hough line detection behind a serialized worker.
//!
//! A [`HoughKernel`] is not reentrant, so [`HoughService`] gives it a thread of
//! its own and funnels every request through a channel. Callers receive
//! [`Line`](streak_lines_core::Line)s whose origin is the top-left pixel of the
//! image; kernels report around the image center and [`corner_line`] does the
//! conversion.
//!
//! ```
//! use streak_lines_core::GrayImage;
//! use streak_lines_hough::{HoughParams, HoughService};
//!
//! let mut img = GrayImage::new(64, 48);
//! for y in 0..48 {
//!     img.set(10, y, 255);
//! }
//!
//! let service = HoughService::with_params(HoughParams::default()).unwrap();
//! let lines = service.lines(&img.view(), Some(1)).unwrap();
//! assert_eq!((lines[0].theta, lines[0].rho), (0.0, 10.0));
//! ```

mod convert;
mod error;
mod kernel;
mod params;
mod service;

pub use convert::{corner_line, corner_lines};
pub use error::HoughError;
pub use kernel::{AccumulatorKernel, HoughKernel, RawHoughLine};
pub use params::{HoughParams, MIN_RHO_STEP, MIN_THETA_STEP_DEG};
pub use service::{HoughHandle, HoughService};
