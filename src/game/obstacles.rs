use super::layout::{Layout, Rect};
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// An upper and lower pipe sharing one column and one gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstaclePair {
    /// Left edge of the column.
    pub x: f64,
    pub width: f64,
    pub gap_center: f64,
    /// Same for every pair in a field.
    pub gap_height: f64,
    crossed: bool,
}

impl ObstaclePair {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn gap_top(&self) -> f64 {
        self.gap_center - self.gap_height / 2.0
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_center + self.gap_height / 2.0
    }

    pub fn is_crossed(&self) -> bool {
        self.crossed
    }

    pub fn mark_crossed(&mut self) {
        self.crossed = true;
    }

    pub fn upper(&self) -> Rect {
        Rect {
            left: self.x,
            top: f64::NEG_INFINITY,
            right: self.x + self.width,
            bottom: self.gap_top(),
        }
    }

    pub fn lower(&self, floor_y: f64) -> Rect {
        Rect {
            left: self.x,
            top: self.gap_bottom(),
            right: self.x + self.width,
            bottom: floor_y,
        }
    }
}

/// Scrolling pipes, oldest (leftmost) first.
pub struct ObstacleField {
    pairs: VecDeque<ObstaclePair>,
    rng: StdRng,
    width: f64,
    sky_h: f64,
    pipe_w: f64,
    gap: f64,
    speed: f64,
    spacing: f64,
    stopped: bool,
}

impl ObstacleField {
    pub fn new(layout: &Layout, rng: StdRng) -> Self {
        Self {
            pairs: VecDeque::new(),
            rng,
            width: layout.width as f64,
            sky_h: layout.floor_y(),
            pipe_w: layout.pipe_w as f64,
            gap: layout.pipe_gap as f64,
            speed: layout.pipe_speed,
            spacing: layout.pipe_spacing,
            stopped: false,
        }
    }

    pub fn pairs(&self) -> &VecDeque<ObstaclePair> {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> impl Iterator<Item = &mut ObstaclePair> {
        self.pairs.iter_mut()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Freeze scrolling and spawning. Existing pairs stay where they are.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Place a pair with its gap centred on `gap_center`.
    pub fn spawn_at(&mut self, x: f64, gap_center: f64) {
        self.pairs.push_back(ObstaclePair {
            x,
            width: self.pipe_w,
            gap_center,
            gap_height: self.gap,
            crossed: false,
        });
    }

    /// One tick of scrolling: spawn on the right, move left, retire off the left.
    pub fn advance(&mut self) {
        if self.stopped {
            return;
        }

        let due = match self.pairs.back() {
            None => true,
            Some(last) => last.x < self.width - self.spacing,
        };
        if due {
            let margin = self.gap * 0.7;
            let low = margin;
            let high = (self.sky_h - margin).max(low);
            let center = self.rng.random_range(low..=high);
            self.spawn_at(self.width + 2.0, center);
        }

        for pair in &mut self.pairs {
            pair.x -= self.speed;
        }
        while self
            .pairs
            .front()
            .is_some_and(|p| p.x + p.width < 0.0)
        {
            self.pairs.pop_front();
        }
    }
}
