//! High-level facade for the `streak-lines-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry (`streak_lines::core`) and detector
//!   (`streak_lines::hough`) crates,
//! - JSON configuration and report types,
//! - tiled detection over a frame,
//! - (feature `image`) end-to-end helpers from image files or
//!   `image::GrayImage`.
//!
//! ## Quickstart
//!
//! ```no_run
//! use streak_lines::{detect, HoughParams, HoughService};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = detect::load_gray("frame.png")?;
//! let service = HoughService::with_params(HoughParams::default())?;
//!
//! for line in detect::detect_lines(&service.handle(), &img, Some(10))? {
//!     println!("theta={:.1} rho={:.1} votes={}", line.theta, line.rho, line.votes);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `streak_lines::core`: coordinates, standard and polar lines, tiling.
//! - `streak_lines::hough`: the kernel, its parameters and the serialized service.
//! - `streak_lines::detect` (feature `image`): helpers from `image::GrayImage`.

pub use streak_lines_core as core;
pub use streak_lines_hough as hough;

pub use streak_lines_core::{
    Coord, DoubleCoord, GrayImage, GrayImageView, ImageMatrix, ImageMatrixElement, Line,
    StandardLine,
};
pub use streak_lines_hough::{HoughError, HoughHandle, HoughParams, HoughService};

mod config;
mod tiles;

pub use config::{ConfigIoError, DetectConfig, DetectReport};
pub use tiles::{detect_tiles, frame_lines};

#[cfg(feature = "image")]
pub mod detect;
