//! Serialized access to a [`HoughKernel`].
//!
//! One worker thread owns the kernel. Callers, from any thread, send a copy of
//! their image over a channel and block on a per-request reply channel, so at
//! most one kernel invocation runs at any time and requests are served in
//! arrival order.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use streak_lines_core::{GrayImage, GrayImageView, Line};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::convert::corner_lines;
use crate::{AccumulatorKernel, HoughError, HoughKernel, HoughParams, RawHoughLine};

const WORKER_NAME: &str = "hough-kernel";

struct Job {
    image: GrayImage,
    reply: mpsc::Sender<Vec<RawHoughLine>>,
}

enum Message {
    Detect(Job),
    Shutdown,
}

/// Owner of the kernel worker thread.
///
/// Dropping the service lets already queued requests finish, then stops and
/// joins the worker. [`HoughHandle`]s that outlive it get
/// [`HoughError::WorkerUnavailable`].
pub struct HoughService {
    handle: HoughHandle,
    worker: Option<JoinHandle<()>>,
}

impl HoughService {
    /// Start a worker thread that exclusively owns `kernel`.
    pub fn spawn<K: HoughKernel + 'static>(kernel: K) -> Result<Self, HoughError> {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_owned())
            .spawn(move || run_worker(kernel, rx))?;
        Ok(Self {
            handle: HoughHandle { tx },
            worker: Some(worker),
        })
    }

    /// Start the service around an [`AccumulatorKernel`].
    pub fn with_params(params: HoughParams) -> Result<Self, HoughError> {
        params.validate()?;
        Self::spawn(AccumulatorKernel::new(params))
    }

    /// A cloneable, thread-safe entry point to this service.
    pub fn handle(&self) -> HoughHandle {
        self.handle.clone()
    }

    /// See [`HoughHandle::lines`].
    pub fn lines(
        &self,
        image: &GrayImageView<'_>,
        max_results: Option<usize>,
    ) -> Result<Vec<Line>, HoughError> {
        self.handle.lines(image, max_results)
    }
}

impl Drop for HoughService {
    fn drop(&mut self) {
        let _ = self.handle.tx.send(Message::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("{WORKER_NAME} thread panicked");
            }
        }
    }
}

/// Request side of a [`HoughService`].
#[derive(Clone)]
pub struct HoughHandle {
    tx: mpsc::Sender<Message>,
}

impl HoughHandle {
    /// Lines detected in `image`, corner-origin, in kernel rank order.
    ///
    /// At most `max_results` lines are returned. An image without lines gives
    /// an empty list. The image is copied; the caller's buffer is never
    /// touched by the worker.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, image),
            fields(width = image.width, height = image.height)
        )
    )]
    pub fn lines(
        &self,
        image: &GrayImageView<'_>,
        max_results: Option<usize>,
    ) -> Result<Vec<Line>, HoughError> {
        if !image.is_consistent() {
            return Err(HoughError::InvalidImage {
                width: image.width,
                height: image.height,
                len: image.data.len(),
            });
        }

        let raw = self.raw_lines(image)?;
        Ok(corner_lines(&raw, image.width, image.height, max_results))
    }

    /// Unconverted kernel output for `image`.
    pub fn raw_lines(&self, image: &GrayImageView<'_>) -> Result<Vec<RawHoughLine>, HoughError> {
        let (reply, response) = mpsc::channel();
        let job = Job {
            image: image.to_owned_image(),
            reply,
        };
        self.tx
            .send(Message::Detect(job))
            .map_err(|_| HoughError::WorkerUnavailable)?;
        response.recv().map_err(|_| HoughError::WorkerUnavailable)
    }
}

fn run_worker<K: HoughKernel>(mut kernel: K, rx: mpsc::Receiver<Message>) {
    debug!("{WORKER_NAME} started");
    while let Ok(message) = rx.recv() {
        match message {
            Message::Detect(job) => {
                let raw = kernel.detect(&job.image.view());
                debug!(
                    "{}x{} image: {} raw lines",
                    job.image.width,
                    job.image.height,
                    raw.len()
                );
                if job.reply.send(raw).is_err() {
                    debug!("caller went away before the reply");
                }
            }
            Message::Shutdown => break,
        }
    }
    debug!("{WORKER_NAME} stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct Ranked(Vec<RawHoughLine>);

    impl HoughKernel for Ranked {
        fn detect(&mut self, _image: &GrayImageView<'_>) -> Vec<RawHoughLine> {
            self.0.clone()
        }
    }

    struct Panicking;

    impl HoughKernel for Panicking {
        fn detect(&mut self, _image: &GrayImageView<'_>) -> Vec<RawHoughLine> {
            panic!("kernel failure");
        }
    }

    #[derive(Default)]
    struct Counters {
        active: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    struct Exclusive(Arc<Counters>);

    impl HoughKernel for Exclusive {
        fn detect(&mut self, _image: &GrayImageView<'_>) -> Vec<RawHoughLine> {
            let now = self.0.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.0.peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(2));
            self.0.calls.fetch_add(1, Ordering::SeqCst);
            self.0.active.fetch_sub(1, Ordering::SeqCst);
            Vec::new()
        }
    }

    fn ten_ranked() -> Vec<RawHoughLine> {
        (0..10)
            .map(|i| RawHoughLine {
                rho: 2.0 * i as f64,
                theta: 90.0,
                votes: 50 - i,
            })
            .collect()
    }

    #[test]
    fn truncates_to_max_results_in_rank_order() {
        let service = HoughService::spawn(Ranked(ten_ranked())).unwrap();
        let img = GrayImage::new(40, 40);

        let lines = service.lines(&img.view(), Some(3)).unwrap();
        let votes: Vec<u32> = lines.iter().map(|l| l.votes).collect();
        assert_eq!(votes, vec![50, 49, 48]);
        // rho 0 and 2 around the center => rows 20 and 22
        assert_eq!(lines[0].rho, 20.0);
        assert_eq!(lines[1].rho, 22.0);

        assert_eq!(service.lines(&img.view(), None).unwrap().len(), 10);
    }

    #[test]
    fn empty_kernel_output_is_not_an_error() {
        let service = HoughService::spawn(Ranked(Vec::new())).unwrap();
        let img = GrayImage::new(8, 8);
        assert!(service.lines(&img.view(), Some(4)).unwrap().is_empty());
    }

    #[test]
    fn rejects_inconsistent_buffers() {
        let service = HoughService::spawn(Ranked(ten_ranked())).unwrap();
        let data = [0u8; 10];
        let view = GrayImageView {
            width: 4,
            height: 4,
            data: &data,
        };
        assert!(matches!(
            service.lines(&view, None),
            Err(HoughError::InvalidImage { len: 10, .. })
        ));
    }

    #[test]
    fn kernel_is_never_entered_concurrently() {
        let counters = Arc::new(Counters::default());
        let service = HoughService::spawn(Exclusive(counters.clone())).unwrap();

        let callers: Vec<_> = (0..8)
            .map(|_| {
                let handle = service.handle();
                thread::spawn(move || {
                    let img = GrayImage::new(16, 16);
                    for _ in 0..5 {
                        handle.lines(&img.view(), None).unwrap();
                    }
                })
            })
            .collect();
        for caller in callers {
            caller.join().unwrap();
        }

        assert_eq!(counters.calls.load(Ordering::SeqCst), 40);
        assert_eq!(counters.peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dead_worker_is_reported() {
        let service = HoughService::spawn(Panicking).unwrap();
        let img = GrayImage::new(8, 8);
        assert!(matches!(
            service.lines(&img.view(), None),
            Err(HoughError::WorkerUnavailable)
        ));
        assert!(matches!(
            service.lines(&img.view(), None),
            Err(HoughError::WorkerUnavailable)
        ));
    }

    #[test]
    fn handles_outliving_the_service_fail_cleanly() {
        let service = HoughService::spawn(Ranked(ten_ranked())).unwrap();
        let handle = service.handle();
        drop(service);
        let img = GrayImage::new(8, 8);
        assert!(matches!(
            handle.lines(&img.view(), None),
            Err(HoughError::WorkerUnavailable)
        ));
    }
}
