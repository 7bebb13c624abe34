use flappy_cam::vision::{
    ChannelRange, FrameSource, Thresholds, TrackerConfig, TrackerHandle, TrackingChannel, Tunables,
};
use flappy_cam::{Error, Result};
use image::{Rgb, RgbImage};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

const W: u32 = 160;
const H: u32 = 240;

fn red() -> Thresholds {
    Thresholds {
        hue: ChannelRange::new(170, 10),
        saturation: ChannelRange::new(100, 255),
        value: ChannelRange::new(100, 255),
    }
}

fn disk(cx: i32, cy: i32, r: i32) -> RgbImage {
    let mut img = RgbImage::new(W, H);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let (dx, dy) = (x as i32 - cx, y as i32 - cy);
        if dx * dx + dy * dy <= r * r {
            *px = Rgb([230, 20, 20]);
        }
    }
    img
}

fn config() -> TrackerConfig {
    TrackerConfig {
        retry_delay: Duration::from_millis(10),
        ..TrackerConfig::default()
    }
}

fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !cond() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(2));
    }
}

#[derive(Default)]
struct Probe {
    show: AtomicBool,
    opens: AtomicU32,
    reads: AtomicU32,
    closed: AtomicBool,
}

/// Shows a red disk while `show` is set, fails every `fail_every`-th read.
struct Scripted {
    probe: Arc<Probe>,
    fail_every: u32,
    fail_opens: u32,
    open: bool,
}

impl Scripted {
    fn new(probe: &Arc<Probe>) -> Self {
        Self {
            probe: Arc::clone(probe),
            fail_every: 0,
            fail_opens: 0,
            open: false,
        }
    }
}

impl FrameSource for Scripted {
    fn open(&mut self) -> Result<()> {
        let n = self.probe.opens.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= self.fail_opens {
            return Err(Error::CameraOpen {
                index: 7,
                reason: "busy".into(),
            });
        }
        self.open = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn read_frame(&mut self) -> Result<RgbImage> {
        let n = self.probe.reads.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_every > 0 && n % self.fail_every == 0 {
            self.open = false;
            return Err(Error::CameraRead("unplugged".into()));
        }
        thread::sleep(Duration::from_millis(1));
        if self.probe.show.load(Ordering::SeqCst) {
            Ok(disk(80, 180, 10))
        } else {
            Ok(RgbImage::new(W, H))
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.probe.closed.store(true, Ordering::SeqCst);
    }

    fn describe(&self) -> String {
        "scripted".into()
    }
}

fn spawn(source: Scripted, config: TrackerConfig) -> (TrackerHandle, Arc<TrackingChannel>) {
    let channel = Arc::new(TrackingChannel::new());
    let tunables = Arc::new(Tunables::new(red()));
    let handle = TrackerHandle::spawn(source, config, tunables, Arc::clone(&channel)).unwrap();
    (handle, channel)
}

#[test]
fn publishes_the_disk_centre_as_a_fraction_of_height() {
    let probe = Arc::new(Probe::default());
    probe.show.store(true, Ordering::SeqCst);
    let (handle, channel) = spawn(Scripted::new(&probe), config());

    wait_until("a position", || channel.latest().is_some());
    let y = channel.latest().unwrap();
    assert!((y - 0.75).abs() < 0.01, "y = {y}");
    assert!(handle.frames() >= 1);
}

#[test]
fn empty_frames_keep_the_last_position_by_default() {
    let probe = Arc::new(Probe::default());
    probe.show.store(true, Ordering::SeqCst);
    let (handle, channel) = spawn(Scripted::new(&probe), config());

    wait_until("a position", || channel.latest().is_some());
    probe.show.store(false, Ordering::SeqCst);
    let seen = handle.frames();
    wait_until("more frames", || handle.frames() > seen + 20);
    assert!(channel.latest().is_some());
}

#[test]
fn lost_after_forgets_the_target() {
    let probe = Arc::new(Probe::default());
    probe.show.store(true, Ordering::SeqCst);
    let cfg = TrackerConfig {
        lost_after: 3,
        ..config()
    };
    let (_handle, channel) = spawn(Scripted::new(&probe), cfg);

    wait_until("a position", || channel.latest().is_some());
    probe.show.store(false, Ordering::SeqCst);
    wait_until("the target to be dropped", || channel.latest().is_none());

    probe.show.store(true, Ordering::SeqCst);
    wait_until("the target to come back", || channel.latest().is_some());
}

#[test]
fn failed_opens_are_retried() {
    let probe = Arc::new(Probe::default());
    probe.show.store(true, Ordering::SeqCst);
    let source = Scripted {
        fail_opens: 3,
        ..Scripted::new(&probe)
    };
    let (_handle, channel) = spawn(source, config());

    wait_until("a position", || channel.latest().is_some());
    assert!(probe.opens.load(Ordering::SeqCst) >= 4);
}

#[test]
fn read_failures_reopen_the_source() {
    let probe = Arc::new(Probe::default());
    probe.show.store(true, Ordering::SeqCst);
    let source = Scripted {
        fail_every: 5,
        ..Scripted::new(&probe)
    };
    let (handle, _channel) = spawn(source, config());

    wait_until("several reopens", || probe.opens.load(Ordering::SeqCst) >= 3);
    assert!(handle.frames() >= 8);
}

#[test]
fn dropping_the_handle_stops_and_closes_the_source() {
    let probe = Arc::new(Probe::default());
    let (handle, _channel) = spawn(Scripted::new(&probe), config());
    wait_until("the first frame", || handle.frames() > 0);

    drop(handle);
    assert!(probe.closed.load(Ordering::SeqCst));
    let reads = probe.reads.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(probe.reads.load(Ordering::SeqCst), reads);
}

#[test]
fn drop_does_not_wait_out_a_long_retry_delay() {
    let probe = Arc::new(Probe::default());
    let source = Scripted {
        fail_opens: u32::MAX,
        ..Scripted::new(&probe)
    };
    let cfg = TrackerConfig {
        retry_delay: Duration::from_secs(30),
        ..config()
    };
    let (handle, _channel) = spawn(source, cfg);
    wait_until("the first open attempt", || probe.opens.load(Ordering::SeqCst) > 0);

    let start = Instant::now();
    drop(handle);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn threshold_changes_apply_to_the_next_frame() {
    let probe = Arc::new(Probe::default());
    probe.show.store(true, Ordering::SeqCst);
    let channel = Arc::new(TrackingChannel::new());
    // Hue window that excludes red.
    let tunables = Arc::new(Tunables::new(Thresholds {
        hue: ChannelRange::new(40, 80),
        ..red()
    }));
    let handle = TrackerHandle::spawn(
        Scripted::new(&probe),
        config(),
        Arc::clone(&tunables),
        Arc::clone(&channel),
    )
    .unwrap();

    wait_until("some frames", || handle.frames() > 10);
    assert_eq!(channel.latest(), None);

    use flappy_cam::vision::Slider;
    tunables.set(Slider::HueMin, 170);
    tunables.set(Slider::HueMax, 10);
    wait_until("a position", || channel.latest().is_some());
}
