//! Detection over a tiled frame.

use log::debug;
use streak_lines_core::{GrayImageView, ImageMatrix, Line};
use streak_lines_hough::{HoughError, HoughHandle};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Split `frame` into tiles of at most `tile_size` pixels per side and run
/// the detector on each one.
///
/// Every returned element carries its cropped pixels and `Some` list of lines
/// in tile-local coordinates, possibly empty. A zero `tile_size` produces a
/// single tile covering the frame.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(handle, frame),
        fields(width = frame.width, height = frame.height)
    )
)]
pub fn detect_tiles(
    handle: &HoughHandle,
    frame: &GrayImageView<'_>,
    tile_size: usize,
    max_results: Option<usize>,
) -> Result<ImageMatrix, HoughError> {
    if !frame.is_consistent() {
        return Err(HoughError::InvalidImage {
            width: frame.width,
            height: frame.height,
            len: frame.data.len(),
        });
    }

    let mut matrix = ImageMatrix::new(frame.width, frame.height, tile_size);
    for element in &mut matrix.elements {
        element.crop_from(frame);
        let lines = match &element.image {
            Some(tile) => handle.lines(&tile.view(), max_results)?,
            None => Vec::new(),
        };
        debug!(
            "tile ({}, {}) {}x{}: {} lines",
            element.x,
            element.y,
            element.width,
            element.height,
            lines.len()
        );
        element.lines = Some(lines);
    }
    Ok(matrix)
}

/// Lines of every tile moved into frame coordinates, strongest first.
pub fn frame_lines(matrix: &ImageMatrix, max_results: Option<usize>) -> Vec<Line> {
    let mut lines: Vec<Line> = matrix
        .elements
        .iter()
        .flat_map(|element| element.frame_lines())
        .collect();
    lines.sort_by(|a, b| b.votes.cmp(&a.votes));
    if let Some(max) = max_results {
        lines.truncate(max);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use streak_lines_core::GrayImage;
    use streak_lines_hough::{HoughParams, HoughService};

    fn frame() -> GrayImage {
        // one column in the top-left tile, one row in the bottom-right tile
        let mut img = GrayImage::new(80, 80);
        for y in 0..40 {
            img.set(15, y, 255);
        }
        for x in 40..80 {
            img.set(x, 70, 255);
        }
        img
    }

    #[test]
    fn each_tile_reports_local_lines() {
        let service = HoughService::with_params(HoughParams::default()).unwrap();
        let img = frame();
        let matrix = detect_tiles(&service.handle(), &img.view(), 40, Some(1)).unwrap();

        assert_eq!(matrix.len(), 4);
        assert!(matrix.elements.iter().all(|e| e.lines.is_some()));

        let top_left = matrix.element_at(0, 0).unwrap();
        let line = top_left.lines.as_ref().unwrap()[0];
        assert_eq!((line.theta, line.rho, line.votes), (0.0, 15.0, 40));

        let bottom_right = matrix.element_at(79, 79).unwrap();
        let line = bottom_right.lines.as_ref().unwrap()[0];
        assert_eq!((line.theta, line.rho, line.votes), (90.0, 30.0, 40));

        assert!(matrix.element_at(50, 10).unwrap().lines.as_ref().unwrap().is_empty());
    }

    #[test]
    fn frame_lines_are_translated_and_ranked() {
        let service = HoughService::with_params(HoughParams::default()).unwrap();
        let img = frame();
        let matrix = detect_tiles(&service.handle(), &img.view(), 40, Some(1)).unwrap();

        let lines = frame_lines(&matrix, None);
        assert_eq!(lines.len(), 2);
        let mut positions: Vec<(f64, f64)> = lines.iter().map(|l| (l.theta, l.rho)).collect();
        positions.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert_eq!(positions, vec![(0.0, 15.0), (90.0, 70.0)]);

        assert_eq!(frame_lines(&matrix, Some(1)).len(), 1);
    }

    #[test]
    fn zero_tile_size_is_whole_frame() {
        let service = HoughService::with_params(HoughParams::default()).unwrap();
        let img = frame();
        let matrix = detect_tiles(&service.handle(), &img.view(), 0, None).unwrap();
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.elements[0].width, 80);
    }

    #[test]
    fn inconsistent_frame_is_rejected() {
        let service = HoughService::with_params(HoughParams::default()).unwrap();
        let data = vec![0u8; 5];
        let view = GrayImageView {
            width: 3,
            height: 3,
            data: &data,
        };
        assert!(matches!(
            detect_tiles(&service.handle(), &view, 2, None),
            Err(HoughError::InvalidImage { .. })
        ));
    }
}
