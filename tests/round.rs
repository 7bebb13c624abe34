use flappy_cam::audio::{Sfx, Sound};
use flappy_cam::game::{Crash, Flow, Game, Phase, PlayerMode};
use flappy_cam::input::InputEvent;
use flappy_cam::render::PixelBuf;

#[derive(Default)]
struct Recorder(Vec<Sound>);

impl Sfx for Recorder {
    fn play(&mut self, sound: Sound) {
        self.0.push(sound);
    }
}

impl Recorder {
    fn count(&self, sound: Sound) -> usize {
        self.0.iter().filter(|s| **s == sound).count()
    }
}

const TAP: [InputEvent; 1] = [InputEvent::FlapOrTap];

/// What a perfectly steady hand would report: the centre of the next gap,
/// as a fraction of the bird's range.
fn autopilot(game: &Game) -> f32 {
    let l = game.layout();
    let bird = &game.round().player;
    let target = game
        .round()
        .obstacles
        .pairs()
        .iter()
        .find(|p| p.x + p.width > bird.x - l.half_w)
        .map_or(l.rest_y(), |p| p.gap_center);
    ((target - l.top_y()) / (l.bottom_y() - l.top_y())) as f32
}

fn start(game: &mut Game, sfx: &mut Recorder) {
    assert_eq!(game.phase(), Phase::Splash);
    game.tick(&TAP, None, sfx);
    assert_eq!(game.phase(), Phase::Play);
}

#[test]
fn steering_through_gaps_scores_points() {
    let mut game = Game::with_seed(80, 48, 42);
    let mut sfx = Recorder::default();
    let mut buf = PixelBuf::new(80, 48);
    start(&mut game, &mut sfx);

    for _ in 0..600 {
        let t = autopilot(&game);
        assert_eq!(game.tick(&[], Some(t), &mut sfx), Flow::Continue);
        game.draw(&mut buf, Some(t));
    }

    assert_eq!(game.phase(), Phase::Play, "crashed with score {}", game.score());
    assert!(game.score() >= 10, "score {}", game.score());
    assert_eq!(sfx.count(Sound::Point), game.score() as usize);
    assert_eq!(sfx.count(Sound::Hit), 0);
}

#[test]
fn without_tracking_the_bird_falls_to_the_floor() {
    let mut game = Game::with_seed(80, 48, 1);
    let mut sfx = Recorder::default();
    start(&mut game, &mut sfx);

    let mut ticks = 0;
    while game.phase() == Phase::Play {
        game.tick(&[], None, &mut sfx);
        ticks += 1;
        assert!(ticks < 200, "never landed");
    }
    assert_eq!(game.round().player.crash_cause(), Some(Crash::Floor));
    assert_eq!(sfx.count(Sound::Hit), 1);
    assert_eq!(sfx.count(Sound::Die), 0);
    assert_eq!(game.best(), 0);
}

#[test]
fn losing_the_target_hands_over_to_gravity() {
    let mut game = Game::with_seed(80, 48, 2);
    let mut sfx = Recorder::default();
    start(&mut game, &mut sfx);
    for _ in 0..20 {
        game.tick(&[], Some(0.3), &mut sfx);
    }
    let settled = game.round().player.vy;
    assert!(settled.abs() < 0.1);

    game.tick(&[], None, &mut sfx);
    game.tick(&[], None, &mut sfx);
    assert!(game.round().player.vy > settled + 0.3);
}

#[test]
fn flap_input_still_works_alongside_tracking() {
    let mut game = Game::with_seed(80, 48, 2);
    let mut sfx = Recorder::default();
    start(&mut game, &mut sfx);
    for _ in 0..10 {
        game.tick(&[], Some(0.5), &mut sfx);
    }
    let y = game.round().player.y;
    game.tick(&TAP, Some(0.5), &mut sfx);
    assert!(game.round().player.y < y);
    assert_eq!(sfx.count(Sound::Wing), 2);
}

#[test]
fn best_score_survives_rounds() {
    let mut game = Game::with_seed(80, 48, 42);
    let mut sfx = Recorder::default();
    start(&mut game, &mut sfx);

    while game.score() < 2 {
        let t = autopilot(&game);
        game.tick(&[], Some(t), &mut sfx);
        assert_eq!(game.phase(), Phase::Play);
    }
    let first = game.score();

    // Dive into the ground.
    while game.phase() == Phase::Play {
        game.tick(&[], Some(1.0), &mut sfx);
    }
    assert_eq!(game.best(), first);
    while !game.round().player.on_floor(game.layout()) {
        game.tick(&[], None, &mut sfx);
    }
    game.tick(&TAP, None, &mut sfx);
    assert_eq!(game.phase(), Phase::Splash);
    assert_eq!(sfx.0.last(), Some(&Sound::Swoosh));

    start(&mut game, &mut sfx);
    while game.phase() == Phase::Play {
        game.tick(&[], None, &mut sfx);
    }
    assert_eq!(game.score(), 0);
    assert_eq!(game.best(), first);
    assert_eq!(game.round().player.mode(), PlayerMode::Crashed);
}
