/// Errors returned by the Hough service.
///
/// An image without lines is not an error; it yields an empty list.
#[derive(thiserror::Error, Debug)]
pub enum HoughError {
    #[error("failed to start the hough worker thread")]
    Spawn(#[from] std::io::Error),
    #[error("hough worker is not running")]
    WorkerUnavailable,
    #[error("invalid image buffer (width={width}, height={height}, len={len})")]
    InvalidImage {
        width: usize,
        height: usize,
        len: usize,
    },
    #[error("invalid hough parameters: {0}")]
    InvalidParams(String),
}
