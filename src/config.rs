use crate::vision::blob::DEFAULT_MIN_AREA;
use crate::vision::{CameraConfig, ChannelRange, Thresholds, TrackerConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Flappy Bird in the terminal, flown by holding a colored object up to your webcam.
///
/// Keys: space/up/click flap, 1-6 pick a threshold slider, +/- and [/]
/// adjust it, t toggles the slider overlay, q or Esc quits.
///
/// Webcam input needs a build with `--features camera`; otherwise only flaps steer.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Camera device index.
    #[arg(short = 'c', long, default_value_t = 0)]
    pub camera: u32,

    /// Requested capture width; the device may pick the closest it supports.
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    #[arg(long, default_value_t = 480)]
    pub height: u32,

    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Play with keyboard/mouse flaps only.
    #[arg(long)]
    pub no_camera: bool,

    /// Hue lower bound (0-180). A lower bound >= the upper bound wraps through red.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=180))]
    pub hmin: u8,

    #[arg(long, default_value_t = 180, value_parser = clap::value_parser!(u8).range(0..=180))]
    pub hmax: u8,

    #[arg(long, default_value_t = 0)]
    pub smin: u8,

    #[arg(long, default_value_t = 255)]
    pub smax: u8,

    #[arg(long, default_value_t = 0)]
    pub vmin: u8,

    #[arg(long, default_value_t = 255)]
    pub vmax: u8,

    /// Blobs of this many pixels or fewer are ignored.
    #[arg(long, default_value_t = DEFAULT_MIN_AREA)]
    pub min_area: usize,

    /// Do not flip camera frames horizontally.
    #[arg(long)]
    pub no_mirror: bool,

    /// Forget the target after this many frames without a blob (0 = never).
    #[arg(long, default_value_t = 0)]
    pub lost_after: u32,

    /// Milliseconds to wait before reopening a failed camera.
    #[arg(long, default_value_t = 500)]
    pub retry_ms: u64,

    /// No sound; skips opening an audio device.
    #[arg(long)]
    pub mute: bool,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,
}

impl Args {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            hue: ChannelRange::new(self.hmin, self.hmax),
            saturation: ChannelRange::new(self.smin, self.smax),
            value: ChannelRange::new(self.vmin, self.vmax),
        }
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            min_area: self.min_area,
            mirror: !self.no_mirror,
            retry_delay: Duration::from_millis(self.retry_ms),
            lost_after: self.lost_after,
        }
    }

    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig {
            index: self.camera,
            width: self.width,
            height: self.height,
            fps: self.fps,
        }
    }
}
