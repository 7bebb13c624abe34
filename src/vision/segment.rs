use image::RgbImage;
use std::sync::atomic::{AtomicU8, Ordering};

// ── Channel ranges ──────────────────────────────────────────────────────────

/// Inclusive `{min, max}` bounds for one HSV channel. No ordering between the
/// two is enforced; the tests below decide what an inverted range means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Closed-interval membership. An inverted range accepts nothing.
    pub fn contains(&self, v: u8) -> bool {
        self.min <= v && v <= self.max
    }

    /// Membership for a circular channel (hue). `min >= max` describes an
    /// interval that wraps through zero, e.g. reds at 170..=180 and 0..=10.
    pub fn contains_cyclic(&self, v: u8) -> bool {
        if self.min < self.max {
            self.min <= v && v <= self.max
        } else {
            v >= self.min || v <= self.max
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub hue: ChannelRange,
    pub saturation: ChannelRange,
    pub value: ChannelRange,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hue: ChannelRange::new(0, HUE_MAX),
            saturation: ChannelRange::new(0, 255),
            value: ChannelRange::new(0, 255),
        }
    }
}

impl Thresholds {
    pub fn accepts(&self, hsv: [u8; 3]) -> bool {
        self.hue.contains_cyclic(hsv[0])
            && self.saturation.contains(hsv[1])
            && self.value.contains(hsv[2])
    }
}

// ── Live tuning sliders ─────────────────────────────────────────────────────

pub const HUE_MAX: u8 = 180;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slider {
    HueMin,
    HueMax,
    SatMin,
    SatMax,
    ValMin,
    ValMax,
}

impl Slider {
    pub const ALL: [Slider; 6] = [
        Slider::HueMin,
        Slider::HueMax,
        Slider::SatMin,
        Slider::SatMax,
        Slider::ValMin,
        Slider::ValMax,
    ];

    pub fn limit(self) -> u8 {
        match self {
            Slider::HueMin | Slider::HueMax => HUE_MAX,
            _ => 255,
        }
    }

    /// Letters for the on-screen tuner, channel then `-`/`+` for min/max.
    pub fn label(self) -> &'static str {
        match self {
            Slider::HueMin => "H-",
            Slider::HueMax => "H+",
            Slider::SatMin => "S-",
            Slider::SatMax => "S+",
            Slider::ValMin => "V-",
            Slider::ValMax => "V+",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The six threshold sliders, written by the tuner on the game thread and
/// read by the tracking thread once per frame. Each value is its own relaxed
/// atomic: a snapshot may mix two adjacent edits, never a half-written one.
#[derive(Debug)]
pub struct Tunables {
    values: [AtomicU8; 6],
}

impl Tunables {
    pub fn new(initial: Thresholds) -> Self {
        let t = Self {
            values: Default::default(),
        };
        t.set(Slider::HueMin, initial.hue.min);
        t.set(Slider::HueMax, initial.hue.max);
        t.set(Slider::SatMin, initial.saturation.min);
        t.set(Slider::SatMax, initial.saturation.max);
        t.set(Slider::ValMin, initial.value.min);
        t.set(Slider::ValMax, initial.value.max);
        t
    }

    pub fn get(&self, slider: Slider) -> u8 {
        self.values[slider.index()].load(Ordering::Relaxed)
    }

    pub fn set(&self, slider: Slider, v: u8) {
        self.values[slider.index()].store(v.min(slider.limit()), Ordering::Relaxed);
    }

    pub fn adjust(&self, slider: Slider, delta: i16) -> u8 {
        let v = (self.get(slider) as i32 + delta as i32).clamp(0, slider.limit() as i32) as u8;
        self.set(slider, v);
        v
    }

    pub fn snapshot(&self) -> Thresholds {
        Thresholds {
            hue: ChannelRange::new(self.get(Slider::HueMin), self.get(Slider::HueMax)),
            saturation: ChannelRange::new(self.get(Slider::SatMin), self.get(Slider::SatMax)),
            value: ChannelRange::new(self.get(Slider::ValMin), self.get(Slider::ValMax)),
        }
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

// ── Color conversion ────────────────────────────────────────────────────────

/// 8-bit RGB to HSV with hue halved into 0..=180, saturation and value in
/// 0..=255 (the usual OpenCV convention, so slider values carry over).
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = v - min;

    let s = if v > 0.0 { diff * 255.0 / v } else { 0.0 };

    let mut h = if diff == 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / diff
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    [
        (h / 2.0).round().min(HUE_MAX as f32) as u8,
        s.round() as u8,
        v as u8,
    ]
}

// ── Mask ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.bits[y * self.width + x] = on;
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Threshold every pixel of `frame` against all three channel ranges.
pub fn segment(frame: &RgbImage, thresholds: &Thresholds) -> Mask {
    let (w, h) = frame.dimensions();
    let mut mask = Mask::new(w as usize, h as usize);
    for (i, px) in frame.pixels().enumerate() {
        let hsv = rgb_to_hsv(px[0], px[1], px[2]);
        mask.bits[i] = thresholds.accepts(hsv);
    }
    mask
}
