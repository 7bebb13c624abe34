use super::layout::{Layout, Rect};
use super::obstacles::{ObstacleField, ObstaclePair};

/// Nose-up limit, in degrees.
pub const ROT_MAX: f64 = 20.0;
/// Nose-down limit, in degrees.
pub const ROT_MIN: f64 = -90.0;
const ROT_CRASH_STEP: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerMode {
    /// Bobbing on the title screen.
    SplashHover,
    /// In play: follows the tracked target, or gravity when there is none.
    Normal,
    /// Falling after a hit. Only a fresh round leaves this mode.
    Crashed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crash {
    Floor,
    Pipe,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub vy: f64,
    /// Degrees, positive is nose up.
    pub rot: f64,
    mode: PlayerMode,
    crash: Option<Crash>,
    flapped: bool,
    frame: u64,
}

impl Player {
    pub fn new(layout: &Layout) -> Self {
        Self {
            x: layout.bird_x,
            y: layout.rest_y(),
            vy: 0.0,
            rot: 0.0,
            mode: PlayerMode::SplashHover,
            crash: None,
            flapped: false,
            frame: 0,
        }
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    pub fn crash_cause(&self) -> Option<Crash> {
        self.crash
    }

    /// Switch modes and load that mode's starting values.
    ///
    /// | from \ to   | SplashHover | Normal | Crashed |
    /// |-------------|-------------|--------|---------|
    /// | SplashHover | reset       | hop    | fall    |
    /// | Normal      | reset       | hop    | fall    |
    /// | Crashed     | ignored     | ignored| ignored |
    ///
    /// Leaving `Crashed` takes a new `Player`.
    pub fn set_mode(&mut self, mode: PlayerMode, layout: &Layout) {
        if self.mode == PlayerMode::Crashed {
            return;
        }
        self.mode = mode;
        self.flapped = false;
        match mode {
            PlayerMode::SplashHover => {
                self.y = layout.rest_y();
                self.vy = 0.0;
                self.rot = 0.0;
            }
            PlayerMode::Normal => {
                self.vy = layout.flap_vel;
                self.rot = ROT_MAX;
                self.flapped = true;
            }
            PlayerMode::Crashed => {
                self.vy = layout.flap_vel * 0.6;
            }
        }
    }

    pub fn crash(&mut self, cause: Crash, layout: &Layout) {
        self.set_mode(PlayerMode::Crashed, layout);
        self.crash.get_or_insert(cause);
    }

    /// Upward impulse for this tick. Returns whether it took effect.
    pub fn flap(&mut self, layout: &Layout) -> bool {
        if self.mode != PlayerMode::Normal || self.y <= layout.top_y() {
            return false;
        }
        self.vy = layout.flap_vel;
        self.rot = ROT_MAX;
        self.flapped = true;
        true
    }

    /// Advance one tick. `target` is the tracked centre in screen pixels.
    pub fn tick(&mut self, layout: &Layout, target: Option<f64>) {
        self.frame += 1;
        match self.mode {
            PlayerMode::SplashHover => {
                self.y = layout.rest_y() + (self.frame as f64 * 0.08).sin() * 3.0 * layout.scale;
            }
            PlayerMode::Normal => {
                if self.flapped {
                    self.flapped = false;
                } else if let Some(target) = target {
                    self.vy = ((target - self.y) * layout.follow_gain)
                        .clamp(-layout.max_follow, layout.max_follow);
                } else {
                    self.vy = (self.vy + layout.gravity).min(layout.max_fall);
                }
                self.y = (self.y + self.vy).clamp(layout.top_y(), layout.bottom_y());
                let tilt = -self.vy / layout.max_fall * 90.0;
                self.rot = tilt.clamp(ROT_MIN, ROT_MAX);
            }
            PlayerMode::Crashed => {
                self.vy = (self.vy + layout.gravity).min(layout.max_fall);
                self.y = (self.y + self.vy).clamp(layout.top_y(), layout.bottom_y());
                // A floor crash lands at whatever angle it hit with.
                if self.crash != Some(Crash::Floor) {
                    self.rot = (self.rot - ROT_CRASH_STEP).max(ROT_MIN);
                }
            }
        }
    }

    pub fn bounds(&self, layout: &Layout) -> Rect {
        Rect {
            left: self.x - layout.half_w,
            top: self.y - layout.half_h,
            right: self.x + layout.half_w,
            bottom: self.y + layout.half_h,
        }
    }

    /// What the bird is hitting right now, floor first.
    pub fn collision(&self, layout: &Layout, obstacles: &ObstacleField) -> Option<Crash> {
        let bounds = self.bounds(layout);
        if bounds.bottom >= layout.floor_y() {
            return Some(Crash::Floor);
        }
        let floor_y = layout.floor_y();
        obstacles
            .pairs()
            .iter()
            .any(|p| bounds.overlaps(&p.upper()) || bounds.overlaps(&p.lower(floor_y)))
            .then_some(Crash::Pipe)
    }

    pub fn collided(&self, layout: &Layout, obstacles: &ObstacleField) -> bool {
        self.collision(layout, obstacles).is_some()
    }

    /// True the first tick the bird is past `pair`'s centre; the caller marks
    /// the pair so it never counts twice.
    pub fn crossed(&self, pair: &ObstaclePair) -> bool {
        !pair.is_crossed() && pair.center_x() < self.x
    }

    pub fn on_floor(&self, layout: &Layout) -> bool {
        self.y + layout.half_h >= layout.floor_y() - 1.0
    }
}
