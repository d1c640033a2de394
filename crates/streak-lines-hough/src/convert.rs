//! Center-origin kernel output to corner-origin [`Line`]s.

use crate::RawHoughLine;
use streak_lines_core::{sin_cos_degrees, DoubleCoord, Line};

/// Convert one kernel line found in a `width × height` image.
///
/// Two points are placed on the line in center-origin coordinates (spanning
/// the image height for vertical lines, its width otherwise), shifted by half
/// the image size, and turned back into polar form around the corner.
pub fn corner_line(raw: &RawHoughLine, width: usize, height: usize) -> Line {
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;
    let (sin, cos) = sin_cos_degrees(raw.theta);

    let (p1, p2) = if sin.abs() < 1e-12 {
        let x = raw.rho / cos;
        (DoubleCoord::new(x, -half_h), DoubleCoord::new(x, half_h))
    } else {
        let y_at = |x: f64| (raw.rho - x * cos) / sin;
        (
            DoubleCoord::new(-half_w, y_at(-half_w)),
            DoubleCoord::new(half_w, y_at(half_w)),
        )
    };

    Line::from_points_with_votes(
        p1.translated(half_w, half_h),
        p2.translated(half_w, half_h),
        raw.votes,
    )
}

/// Convert kernel output in rank order, stopping once `max_results` lines
/// were produced.
pub fn corner_lines(
    raw: &[RawHoughLine],
    width: usize,
    height: usize,
    max_results: Option<usize>,
) -> Vec<Line> {
    let cap = max_results.unwrap_or(usize::MAX);
    let mut lines = Vec::with_capacity(raw.len().min(cap));
    for r in raw {
        if lines.len() >= cap {
            break;
        }
        lines.push(corner_line(r, width, height));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn raw(rho: f64, theta: f64) -> RawHoughLine {
        RawHoughLine {
            rho,
            theta,
            votes: 9,
        }
    }

    #[test]
    fn vertical_line_moves_to_corner_origin() {
        let line = corner_line(&raw(-10.0, 0.0), 60, 40);
        assert_eq!((line.theta, line.rho, line.votes), (0.0, 20.0, 9));
    }

    #[test]
    fn mirrored_vertical_line() {
        // theta 180 flips the sign of rho: x = -10 around the center
        let line = corner_line(&raw(10.0, 180.0), 60, 40);
        assert_eq!((line.theta, line.rho), (0.0, 20.0));
    }

    #[test]
    fn horizontal_line_moves_to_corner_origin() {
        let line = corner_line(&raw(-10.0, 90.0), 100, 80);
        assert_eq!((line.theta, line.rho), (90.0, 30.0));
    }

    #[test]
    fn diagonal_through_center() {
        // y = x - 20 once shifted into a 100x60 frame
        let line = corner_line(&raw(0.0, 135.0), 100, 60);
        assert_abs_diff_eq!(line.theta, -45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(line.rho, 200f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn general_line_gains_half_diagonal_offset() {
        // (x-50)cos45 + (y-50)sin45 = 10  =>  x cos45 + y sin45 = 10 + 50·√2
        let line = corner_line(&raw(10.0, 45.0), 100, 100);
        assert_abs_diff_eq!(line.theta, 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(line.rho, 10.0 + 50.0 * 2f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn truncates_in_rank_order() {
        let ranked: Vec<RawHoughLine> = (0..10)
            .map(|i| RawHoughLine {
                rho: i as f64,
                theta: 90.0,
                votes: 100 - i,
            })
            .collect();
        let lines = corner_lines(&ranked, 20, 20, Some(3));
        let votes: Vec<u32> = lines.iter().map(|l| l.votes).collect();
        assert_eq!(votes, vec![100, 99, 98]);

        assert_eq!(corner_lines(&ranked, 20, 20, None).len(), 10);
        assert!(corner_lines(&ranked, 20, 20, Some(0)).is_empty());
        assert!(corner_lines(&[], 20, 20, Some(5)).is_empty());
    }
}
