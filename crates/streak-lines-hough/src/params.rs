use crate::HoughError;
use serde::{Deserialize, Serialize};

/// Accumulator Hough transform settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Pixels at or above this intensity vote.
    pub pixel_threshold: u8,
    /// Rho bin size, pixels.
    pub rho_step: f64,
    /// Theta bin size, degrees. Rounded so that a whole number of bins spans 180°.
    pub theta_step_deg: f64,
    /// Peaks with fewer votes are dropped.
    pub min_votes: u32,
    /// Non-maximum suppression half-window along rho, in bins.
    pub nms_rho_bins: usize,
    /// Non-maximum suppression half-window along theta, in bins.
    pub nms_theta_bins: usize,
    /// Maximum number of lines one call returns.
    pub max_lines: usize,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            pixel_threshold: 128,
            rho_step: 1.0,
            theta_step_deg: 1.0,
            min_votes: 20,
            nms_rho_bins: 3,
            nms_theta_bins: 3,
            max_lines: 64,
        }
    }
}

/// Finest rho bin, pixels. Smaller steps make the accumulator unbounded.
pub const MIN_RHO_STEP: f64 = 0.01;

/// Finest theta bin, degrees.
pub const MIN_THETA_STEP_DEG: f64 = 0.01;

impl HoughParams {
    pub fn validate(&self) -> Result<(), HoughError> {
        if !(self.rho_step.is_finite() && self.rho_step >= MIN_RHO_STEP) {
            return Err(HoughError::InvalidParams(format!(
                "rho_step must be at least {MIN_RHO_STEP}, got {}",
                self.rho_step
            )));
        }
        if !(self.theta_step_deg.is_finite()
            && self.theta_step_deg >= MIN_THETA_STEP_DEG
            && self.theta_step_deg <= 90.0)
        {
            return Err(HoughError::InvalidParams(format!(
                "theta_step_deg must be in [{MIN_THETA_STEP_DEG}, 90], got {}",
                self.theta_step_deg
            )));
        }
        Ok(())
    }

    /// Number of theta bins covering `[0, 180)`.
    pub fn theta_bins(&self) -> usize {
        ((180.0 / self.theta_step_deg).round() as usize).max(2)
    }
}
