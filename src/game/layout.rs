/// Screen geometry and physics tuned to the current pixel buffer size.
///
/// Everything scales off a 48-pixel-tall reference screen (one 24-row
/// terminal drawn with half blocks).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub scale: f64,
    pub ground_h: usize,
    pub pipe_w: usize,
    pub pipe_gap: usize,
    pub pipe_speed: f64,
    pub pipe_spacing: f64,
    pub bird_x: f64,
    pub half_w: f64,
    pub half_h: f64,
    pub gravity: f64,
    pub flap_vel: f64,
    pub max_fall: f64,
    /// Fraction of the distance to the tracked target covered per tick.
    pub follow_gain: f64,
    /// Speed cap while following the tracked target, per tick.
    pub max_follow: f64,
}

const MIN_WIDTH: usize = 20;
const MIN_HEIGHT: usize = 24;

impl Layout {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(MIN_WIDTH);
        let height = height.max(MIN_HEIGHT);
        let scale = height as f64 / 48.0;
        Self {
            width,
            height,
            scale,
            ground_h: (8.0 * scale).max(6.0) as usize,
            pipe_w: (8.0 * scale).clamp(5.0, 14.0) as usize,
            pipe_gap: (15.0 * scale).max(11.0) as usize,
            pipe_speed: 1.1 * (width as f64 / 80.0).max(0.8),
            pipe_spacing: (width as f64 * 0.42).max(28.0),
            bird_x: (width as f64 * 0.22).max(10.0),
            half_w: 2.0 * scale,
            half_h: 1.5 * scale,
            gravity: 0.20 * scale,
            flap_vel: -2.0 * scale,
            max_fall: 3.5 * scale,
            follow_gain: 0.35,
            max_follow: 3.0 * scale,
        }
    }

    /// Top edge of the ground strip; everything above it is sky.
    pub fn floor_y(&self) -> f64 {
        (self.height - self.ground_h) as f64
    }

    pub fn rest_y(&self) -> f64 {
        self.floor_y() * 0.4
    }

    /// Highest centre the bird may reach without leaving the screen.
    pub fn top_y(&self) -> f64 {
        self.half_h
    }

    /// Lowest centre, with the bird resting on the floor.
    pub fn bottom_y(&self) -> f64 {
        self.floor_y() - self.half_h
    }

    /// Map a tracked position (0.0 top of camera frame, 1.0 bottom) linearly
    /// onto the bird's movable range.
    pub fn map_tracked(&self, t: f32) -> f64 {
        let t = (t as f64).clamp(0.0, 1.0);
        self.top_y() + t * (self.bottom_y() - self.top_y())
    }
}

/// Axis-aligned box in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}
