use super::blob::{BlobTracker, DEFAULT_MIN_AREA};
use super::channel::TrackingChannel;
use super::frame::FrameSource;
use super::segment::{Thresholds, Tunables, segment};
use crate::error::Result;
use image::{RgbImage, imageops};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct TrackerConfig {
    pub min_area: usize,
    /// Flip frames left-right first, so the preview behaves like a mirror.
    pub mirror: bool,
    /// Pause between attempts to (re)open or read a failing source.
    pub retry_delay: Duration,
    /// Clear the channel after this many frames in a row without a blob.
    /// Zero keeps the last position forever.
    pub lost_after: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_area: DEFAULT_MIN_AREA,
            mirror: true,
            retry_delay: Duration::from_millis(500),
            lost_after: 0,
        }
    }
}

// ── Per-frame work ──────────────────────────────────────────────────────────

/// Segment, extract and locate: one frame in, at most one position out.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline {
    tracker: BlobTracker,
    mirror: bool,
}

impl Pipeline {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            tracker: BlobTracker::new(config.min_area),
            mirror: config.mirror,
        }
    }

    /// Vertical centroid of the dominant blob as a fraction of frame height,
    /// 0.0 at the top edge.
    pub fn locate(&self, mut frame: RgbImage, thresholds: &Thresholds) -> Option<f32> {
        if frame.height() == 0 {
            return None;
        }
        if self.mirror {
            imageops::flip_horizontal_in_place(&mut frame);
        }
        let mask = segment(&frame, thresholds);
        let (_, cy) = self.tracker.track(&mask)?.centroid()?;
        Some((cy / frame.height() as f32).clamp(0.0, 1.0))
    }
}

// ── Tracking thread ─────────────────────────────────────────────────────────

/// Owns the tracking thread. Dropping it stops the loop, releases the frame
/// source and waits for the thread to exit.
pub struct TrackerHandle {
    stop: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl TrackerHandle {
    pub fn spawn<S>(
        source: S,
        config: TrackerConfig,
        tunables: Arc<Tunables>,
        channel: Arc<TrackingChannel>,
    ) -> Result<Self>
    where
        S: FrameSource + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));
        let worker = Worker {
            pipeline: Pipeline::new(&config),
            config,
            tunables,
            channel,
            stop: Arc::clone(&stop),
            frames: Arc::clone(&frames),
        };
        let thread = thread::Builder::new()
            .name("tracker".into())
            .spawn(move || worker.run(source))?;
        Ok(Self {
            stop,
            frames,
            thread: Some(thread),
        })
    }

    /// Frames successfully read from the source so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("tracking thread panicked");
            }
        }
    }
}

struct Worker {
    pipeline: Pipeline,
    config: TrackerConfig,
    tunables: Arc<Tunables>,
    channel: Arc<TrackingChannel>,
    stop: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
}

impl Worker {
    fn run<S: FrameSource>(self, mut source: S) {
        tracing::info!("tracker started on {}", source.describe());
        let mut failures = 0u32;
        let mut misses = 0u32;

        while !self.stopped() {
            if !source.is_open() {
                if let Err(e) = source.open() {
                    self.report_failure(&mut failures, &e);
                    self.pause();
                    continue;
                }
            }

            let frame = match source.read_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    self.report_failure(&mut failures, &e);
                    self.pause();
                    continue;
                }
            };
            if failures > 0 {
                tracing::info!("{} recovered after {failures} failures", source.describe());
                failures = 0;
            }
            self.frames.fetch_add(1, Ordering::Relaxed);

            match self.pipeline.locate(frame, &self.tunables.snapshot()) {
                Some(y) => {
                    misses = 0;
                    self.channel.publish(y);
                }
                None => {
                    misses = misses.saturating_add(1);
                    if self.config.lost_after > 0 && misses == self.config.lost_after {
                        tracing::debug!("target lost for {misses} frames");
                        self.channel.clear();
                    }
                }
            }
        }

        source.close();
        tracing::info!("tracker stopped");
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    fn report_failure(&self, failures: &mut u32, e: &crate::Error) {
        *failures += 1;
        if *failures == 1 {
            tracing::warn!("{e}; retrying");
        } else {
            tracing::debug!("{e} (failure {failures})");
        }
    }

    /// Sleep out the retry delay, waking early if asked to stop.
    fn pause(&self) {
        let until = Instant::now() + self.config.retry_delay;
        while !self.stopped() {
            let now = Instant::now();
            if now >= until {
                break;
            }
            thread::sleep((until - now).min(Duration::from_millis(20)));
        }
    }
}
