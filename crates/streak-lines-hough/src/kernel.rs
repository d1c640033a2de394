//! The numerical line detector.
//!
//! Kernels report lines in the center-origin convention: with
//! `xc = x - width/2` and `yc = y - height/2`, a line is
//! `xc·cos θ + yc·sin θ = ρ`, `θ` in degrees within `[0, 180)`.

use crate::HoughParams;
use serde::{Deserialize, Serialize};
use streak_lines_core::{sin_cos_degrees, GrayImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// One ranked vote peak, center-origin polar form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawHoughLine {
    pub rho: f64,
    /// Degrees.
    pub theta: f64,
    pub votes: u32,
}

/// A line detector that may keep mutable scratch state between calls and is
/// therefore not reentrant. Results are ranked, strongest first.
///
/// Kernels are only ever driven from the [`HoughService`](crate::HoughService)
/// worker thread.
pub trait HoughKernel: Send {
    fn detect(&mut self, image: &GrayImageView<'_>) -> Vec<RawHoughLine>;
}

/// Classic voting Hough transform over bright pixels.
///
/// Every pixel at or above `pixel_threshold` votes once per theta bin. Peaks
/// are local maxima of the accumulator (ties resolved toward the earlier bin,
/// theta wrapping at 180° with rho mirrored) with at least `min_votes`.
pub struct AccumulatorKernel {
    params: HoughParams,
    accumulator: Vec<u32>,
}

impl AccumulatorKernel {
    pub fn new(params: HoughParams) -> Self {
        Self {
            params,
            accumulator: Vec::new(),
        }
    }

    pub fn params(&self) -> &HoughParams {
        &self.params
    }
}

impl Default for AccumulatorKernel {
    fn default() -> Self {
        Self::new(HoughParams::default())
    }
}

/// Accumulator dimensions for one image.
#[derive(Clone, Copy, Debug)]
struct Grid {
    n_theta: usize,
    n_rho: usize,
    /// Bin index of `rho == 0`.
    rho_zero: usize,
    theta_step: f64,
    rho_step: f64,
}

impl Grid {
    fn new(params: &HoughParams, width: usize, height: usize) -> Self {
        let n_theta = params.theta_bins();
        let max_rho = (width as f64 / 2.0).hypot(height as f64 / 2.0);
        let rho_zero = (max_rho / params.rho_step).ceil() as usize;
        Self {
            n_theta,
            n_rho: 2 * rho_zero + 1,
            rho_zero,
            theta_step: 180.0 / n_theta as f64,
            rho_step: params.rho_step,
        }
    }

    #[inline]
    fn rho_bin(&self, rho: f64) -> Option<usize> {
        let bin = (rho / self.rho_step).round() as isize + self.rho_zero as isize;
        (0..self.n_rho as isize)
            .contains(&bin)
            .then_some(bin as usize)
    }

    /// Flat index of `(t, r)`, wrapping theta past either end of `[0, 180)`.
    fn wrapped_index(&self, t: isize, r: isize) -> Option<usize> {
        let n_theta = self.n_theta as isize;
        let mirror = self.n_rho as isize - 1;
        let (t, r) = if t < 0 {
            (t + n_theta, mirror - r)
        } else if t >= n_theta {
            (t - n_theta, mirror - r)
        } else {
            (t, r)
        };
        if !(0..n_theta).contains(&t) || !(0..self.n_rho as isize).contains(&r) {
            return None;
        }
        Some(t as usize * self.n_rho + r as usize)
    }
}

impl HoughKernel for AccumulatorKernel {
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(width = image.width, height = image.height))
    )]
    fn detect(&mut self, image: &GrayImageView<'_>) -> Vec<RawHoughLine> {
        if image.width == 0 || image.height == 0 {
            return Vec::new();
        }
        if let Err(err) = self.params.validate() {
            log::warn!("hough: {err}");
            return Vec::new();
        }

        let params = &self.params;
        let grid = Grid::new(params, image.width, image.height);
        let trig: Vec<(f64, f64)> = (0..grid.n_theta)
            .map(|t| sin_cos_degrees(t as f64 * grid.theta_step))
            .collect();

        let acc = &mut self.accumulator;
        acc.clear();
        acc.resize(grid.n_theta * grid.n_rho, 0);

        let cx = image.width as f64 / 2.0;
        let cy = image.height as f64 / 2.0;
        let rows = image.data.chunks_exact(image.width).take(image.height);
        for (y, row) in rows.enumerate() {
            let yc = y as f64 - cy;
            for (x, &value) in row.iter().enumerate() {
                if value < params.pixel_threshold {
                    continue;
                }
                let xc = x as f64 - cx;
                for (t, &(sin, cos)) in trig.iter().enumerate() {
                    if let Some(r) = grid.rho_bin(xc * cos + yc * sin) {
                        acc[t * grid.n_rho + r] += 1;
                    }
                }
            }
        }

        let mut peaks = Vec::new();
        for t in 0..grid.n_theta {
            for r in 0..grid.n_rho {
                let votes = acc[t * grid.n_rho + r];
                if votes == 0 || votes < params.min_votes || !is_peak(acc, &grid, params, t, r) {
                    continue;
                }
                peaks.push(RawHoughLine {
                    rho: (r as f64 - grid.rho_zero as f64) * grid.rho_step,
                    theta: t as f64 * grid.theta_step,
                    votes,
                });
            }
        }

        // stable: equal votes keep accumulator order
        peaks.sort_by(|a, b| b.votes.cmp(&a.votes));
        peaks.truncate(params.max_lines);
        log::debug!(
            "hough: {}x{} image, {} peaks kept",
            image.width,
            image.height,
            peaks.len()
        );
        peaks
    }
}

fn is_peak(acc: &[u32], grid: &Grid, params: &HoughParams, t: usize, r: usize) -> bool {
    let idx = t * grid.n_rho + r;
    let votes = acc[idx];
    let dt_max = params.nms_theta_bins as isize;
    let dr_max = params.nms_rho_bins as isize;

    for dt in -dt_max..=dt_max {
        for dr in -dr_max..=dr_max {
            if dt == 0 && dr == 0 {
                continue;
            }
            let Some(other_idx) = grid.wrapped_index(t as isize + dt, r as isize + dr) else {
                continue;
            };
            let other = acc[other_idx];
            if other > votes || (other == votes && other_idx < idx) {
                return false;
            }
        }
    }
    true
}
