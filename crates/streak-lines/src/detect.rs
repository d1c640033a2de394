//! End-to-end helpers over `image::GrayImage`.

use crate::config::{DetectConfig, DetectReport};
use crate::tiles::{detect_tiles, frame_lines};
use log::info;
use std::path::Path;
use streak_lines_core::{GrayImageView, Line};
use streak_lines_hough::{HoughError, HoughHandle};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("failed to load image {path}")]
    Image {
        path: String,
        #[source]
        source: ::image::ImageError,
    },

    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Hough(#[from] HoughError),
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Decode any supported image file and convert it to 8-bit luma.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, DetectError> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| DetectError::Image {
        path: path.display().to_string(),
        source,
    })?;
    Ok(img.to_luma8())
}

/// Build an `image::GrayImage` from a raw grayscale buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some(expected) = w.zip(h).and_then(|(w, h)| w.checked_mul(h)) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidGrayDimensions { width, height })
}

/// Lines in `img`, corner-origin, strongest first.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(handle, img), fields(width = img.width(), height = img.height()))
)]
pub fn detect_lines(
    handle: &HoughHandle,
    img: &::image::GrayImage,
    max_results: Option<usize>,
) -> Result<Vec<Line>, DetectError> {
    Ok(handle.lines(&gray_view(img), max_results)?)
}

/// Same as [`detect_lines`] on a raw row-major grayscale buffer.
pub fn detect_lines_from_gray_u8(
    handle: &HoughHandle,
    width: u32,
    height: u32,
    pixels: &[u8],
    max_results: Option<usize>,
) -> Result<Vec<Line>, DetectError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    detect_lines(handle, &img, max_results)
}

/// Run a whole configured detection: load, detect (tiled or not), report.
///
/// Every kernel call goes through `handle`, so concurrent runs sharing one
/// [`HoughService`](streak_lines_hough::HoughService) still reach the kernel one
/// at a time. The service is expected to be built from `config.hough`.
pub fn run(config: &DetectConfig, handle: &HoughHandle) -> Result<DetectReport, DetectError> {
    info!("loading image: {}", config.image_path);
    let img = load_gray(&config.image_path)?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    info!("image size: {width}x{height}");

    let (lines, tiles) = if config.tile_size == 0 {
        (detect_lines(handle, &img, config.max_results)?, None)
    } else {
        let matrix = detect_tiles(handle, &gray_view(&img), config.tile_size, config.max_results)?;
        info!("{} tiles of up to {} px", matrix.len(), config.tile_size);
        (frame_lines(&matrix, config.max_results), Some(matrix.elements))
    };
    info!("detected {} lines", lines.len());

    Ok(DetectReport {
        image_path: config.image_path.clone(),
        width,
        height,
        tile_size: config.tile_size,
        lines,
        tiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use streak_lines_hough::{
        AccumulatorKernel, HoughKernel, HoughParams, HoughService, RawHoughLine,
    };

    /// Accumulator kernel that records how many calls overlap.
    struct Tracked {
        inner: AccumulatorKernel,
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        calls: Arc<AtomicUsize>,
    }

    impl HoughKernel for Tracked {
        fn detect(&mut self, image: &GrayImageView<'_>) -> Vec<RawHoughLine> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(2));
            let lines = self.inner.detect(image);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.active.fetch_sub(1, Ordering::SeqCst);
            lines
        }
    }

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(matches!(
            gray_image_from_slice(4, 4, &[0; 15]),
            Err(DetectError::InvalidGrayBuffer {
                expected: 16,
                got: 15
            })
        ));
    }

    #[test]
    fn raw_buffer_detection() {
        let (w, h) = (50u32, 30u32);
        let mut pixels = vec![0u8; (w * h) as usize];
        for x in 0..w as usize {
            pixels[12 * w as usize + x] = 200;
        }
        let service = HoughService::with_params(HoughParams::default()).unwrap();
        let lines = detect_lines_from_gray_u8(&service.handle(), w, h, &pixels, Some(1)).unwrap();
        assert_eq!((lines[0].theta, lines[0].rho, lines[0].votes), (90.0, 12.0, 50));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_gray("/definitely/not/here.png").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }

    #[test]
    fn concurrent_runs_share_one_kernel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        ::image::GrayImage::from_fn(64, 64, |x, _| ::image::Luma([if x == 9 { 255 } else { 0 }]))
            .save(&path)
            .unwrap();

        let peak = Arc::new(AtomicUsize::new(0));
        let calls = Arc::new(AtomicUsize::new(0));
        let service = HoughService::spawn(Tracked {
            inner: AccumulatorKernel::default(),
            active: Arc::new(AtomicUsize::new(0)),
            peak: peak.clone(),
            calls: calls.clone(),
        })
        .unwrap();

        let runs: Vec<_> = [0usize, 32, 0, 32]
            .into_iter()
            .map(|tile_size| {
                let handle = service.handle();
                let mut config = DetectConfig::new(path.display().to_string());
                config.tile_size = tile_size;
                std::thread::spawn(move || run(&config, &handle).unwrap())
            })
            .collect();
        for report in runs {
            let report = report.join().unwrap();
            assert_eq!((report.lines[0].theta, report.lines[0].rho), (0.0, 9.0));
        }

        // two whole-frame runs plus two runs over four tiles each
        assert_eq!(calls.load(Ordering::SeqCst), 10);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
