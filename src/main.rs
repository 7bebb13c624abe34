use anyhow::Context;
use clap::Parser;
use crossterm::{cursor, event, execute, terminal};
use flappy_cam::audio::{Audio, Mute, Sfx};
use flappy_cam::config::Args;
use flappy_cam::game::{Flow, Game, TICK_HZ, Ticker};
use flappy_cam::input::{self, InputEvent};
use flappy_cam::render::PixelBuf;
use flappy_cam::tuner::Tuner;
use flappy_cam::vision::{TrackerHandle, TrackingChannel, Tunables};
use std::fs::File;
use std::io::{self, Stdout, stdout};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Raw mode and the alternate screen for as long as it lives.
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::DisableLineWrap,
        )?;
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            terminal::EnableLineWrap,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}

// The screen belongs to the game, so logs only go to a file when asked for.
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let Some(path) = &args.log else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .init();
    Ok(())
}

fn open_audio(args: &Args) -> anyhow::Result<Box<dyn Sfx>> {
    if args.mute {
        return Ok(Box::new(Mute));
    }
    let audio = Audio::new().context("no audio output (use --mute to play silently)")?;
    Ok(Box::new(audio))
}

#[cfg(feature = "camera")]
fn start_tracker(
    args: &Args,
    tunables: &Arc<Tunables>,
    channel: &Arc<TrackingChannel>,
) -> anyhow::Result<Option<TrackerHandle>> {
    use flappy_cam::vision::camera::Camera;

    if args.no_camera {
        tracing::info!("camera disabled, flap input only");
        return Ok(None);
    }
    let handle = TrackerHandle::spawn(
        Camera::new(args.camera_config()),
        args.tracker_config(),
        Arc::clone(tunables),
        Arc::clone(channel),
    )
    .context("starting the tracking thread")?;
    Ok(Some(handle))
}

#[cfg(not(feature = "camera"))]
fn start_tracker(
    args: &Args,
    _tunables: &Arc<Tunables>,
    _channel: &Arc<TrackingChannel>,
) -> anyhow::Result<Option<TrackerHandle>> {
    if !args.no_camera {
        tracing::warn!("built without the `camera` feature, flap input only");
    }
    Ok(None)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    tracing::info!(?args, "starting");

    let tunables = Arc::new(Tunables::new(args.thresholds()));
    let channel = Arc::new(TrackingChannel::new());
    let mut sfx = open_audio(&args)?;

    // Declared before the terminal guard so the screen is restored before
    // the tracking thread is joined.
    let tracker = start_tracker(&args, &tunables, &channel)?;
    let mut term = TerminalGuard::enter().context("setting up the terminal")?;

    let (cols, rows) = terminal::size()?;
    let (pw, ph) = (cols as usize, rows as usize * 2);
    let mut buf = PixelBuf::new(pw, ph);
    let mut game = Game::new(pw, ph);
    let mut tuner = Tuner::new(Arc::clone(&tunables));
    let mut ticker = Ticker::new(TICK_HZ);

    loop {
        let events = input::poll()?;
        for e in &events {
            match *e {
                InputEvent::Resize(c, r) => {
                    let (npw, nph) = (c as usize, r as usize * 2);
                    buf.resize(npw, nph);
                    game.resize(npw, nph);
                }
                InputEvent::Tune(cmd) => tuner.apply(cmd),
                _ => {}
            }
        }

        let tracked = channel.latest();
        if game.tick(&events, tracked, sfx.as_mut()) == Flow::Quit {
            break;
        }

        game.draw(&mut buf, tracked);
        tuner.draw(&mut buf);
        buf.render(&mut term.out)?;
        ticker.wait();
    }

    drop(term);
    if let Some(tracker) = tracker {
        tracing::info!("tracker read {} frames", tracker.frames());
    }
    tracing::info!(best = game.best(), "bye");
    Ok(())
}
