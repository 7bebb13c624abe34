//! The game tick: phases, scoring and the bird's reaction to tracked input.

mod draw;
pub mod layout;
pub mod obstacles;
pub mod player;
pub mod ticker;

pub use layout::{Layout, Rect};
pub use obstacles::{ObstacleField, ObstaclePair};
pub use player::{Crash, Player, PlayerMode};
pub use ticker::Ticker;

use crate::audio::{Sfx, Sound};
use crate::input::InputEvent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const TICK_HZ: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Splash,
    Play,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything that belongs to one attempt. Replaced wholesale between rounds.
pub struct Round {
    pub phase: Phase,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub score: u32,
    ground_x: f64,
    ground_moving: bool,
    phase_ticks: u32,
}

impl Round {
    fn new(layout: &Layout, rng: StdRng) -> Self {
        Self {
            phase: Phase::Splash,
            player: Player::new(layout),
            obstacles: ObstacleField::new(layout, rng),
            score: 0,
            ground_x: 0.0,
            ground_moving: true,
            phase_ticks: 0,
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_ticks = 0;
    }
}

pub struct Game {
    layout: Layout,
    round: Round,
    best: u32,
    rng: StdRng,
}

impl Game {
    pub fn new(pw: usize, ph: usize) -> Self {
        Self::with_rng(pw, ph, StdRng::from_os_rng())
    }

    /// Reproducible obstacle layouts, for tests and demos.
    pub fn with_seed(pw: usize, ph: usize, seed: u64) -> Self {
        Self::with_rng(pw, ph, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pw: usize, ph: usize, mut rng: StdRng) -> Self {
        let layout = Layout::new(pw, ph);
        let round = Round::new(&layout, StdRng::seed_from_u64(rng.random()));
        Self {
            layout,
            round,
            best: 0,
            rng,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Direct access for scripted scenarios.
    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// New geometry means a new round; only the best score survives.
    pub fn resize(&mut self, pw: usize, ph: usize) {
        self.layout = Layout::new(pw, ph);
        self.new_round();
    }

    fn new_round(&mut self) {
        let rng = StdRng::seed_from_u64(self.rng.random());
        self.round = Round::new(&self.layout, rng);
    }

    /// One fixed-rate step. `tracked` is the camera position (0.0 top of
    /// frame, 1.0 bottom) if the tracker has produced one.
    pub fn tick(&mut self, events: &[InputEvent], tracked: Option<f32>, sfx: &mut dyn Sfx) -> Flow {
        let mut tapped = false;
        for e in events {
            match e {
                InputEvent::Quit | InputEvent::Escape => return Flow::Quit,
                InputEvent::FlapOrTap => tapped = true,
                _ => {}
            }
        }

        match self.round.phase {
            Phase::Splash => self.tick_splash(tapped, sfx),
            Phase::Play => self.tick_play(tapped, tracked, sfx),
            Phase::GameOver => self.tick_game_over(tapped, sfx),
        }
        self.round.phase_ticks = self.round.phase_ticks.saturating_add(1);
        Flow::Continue
    }

    fn tick_splash(&mut self, tapped: bool, sfx: &mut dyn Sfx) {
        let l = &self.layout;
        let r = &mut self.round;
        if tapped {
            r.score = 0;
            r.player.set_mode(PlayerMode::Normal, l);
            sfx.play(Sound::Wing);
            r.enter(Phase::Play);
            return;
        }
        r.player.tick(l, None);
        r.ground_x += 0.5;
    }

    fn tick_play(&mut self, tapped: bool, tracked: Option<f32>, sfx: &mut dyn Sfx) {
        let l = &self.layout;
        let r = &mut self.round;

        if let Some(crash) = r.player.collision(l, &r.obstacles) {
            r.player.crash(crash, l);
            r.obstacles.stop();
            r.ground_moving = false;
            sfx.play(Sound::Hit);
            if crash == Crash::Pipe {
                sfx.play(Sound::Die);
            }
            self.best = self.best.max(r.score);
            tracing::info!("round over: {crash:?}, score {} (best {})", r.score, self.best);
            r.enter(Phase::GameOver);
            return;
        }

        for pair in r.obstacles.pairs_mut() {
            if r.player.crossed(pair) {
                pair.mark_crossed();
                r.score += 1;
                sfx.play(Sound::Point);
            }
        }

        if tapped && r.player.flap(l) {
            sfx.play(Sound::Wing);
        }

        let target = tracked.map(|t| l.map_tracked(t));
        r.player.tick(l, target);
        r.obstacles.advance();
        r.ground_x += l.pipe_speed;
    }

    fn tick_game_over(&mut self, tapped: bool, sfx: &mut dyn Sfx) {
        let l = &self.layout;
        let r = &mut self.round;
        if tapped && r.player.on_floor(l) {
            sfx.play(Sound::Swoosh);
            self.new_round();
            return;
        }
        r.player.tick(l, None);
        r.obstacles.advance();
        if r.ground_moving {
            r.ground_x += l.pipe_speed;
        }
    }
}
