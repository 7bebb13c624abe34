use crate::error::{Error, Result};
use fundsp::prelude32::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

const SAMPLE_RATE: u32 = 44_100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Wing,
    Point,
    Hit,
    Die,
    Swoosh,
}

/// Fire-and-forget sound effects.
pub trait Sfx {
    fn play(&mut self, sound: Sound);
}

pub struct Mute;

impl Sfx for Mute {
    fn play(&mut self, _: Sound) {}
}

// ── Synthesis ───────────────────────────────────────────────────────────────

fn render(mut unit: impl AudioUnit, secs: f64) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let n = (secs * SAMPLE_RATE as f64) as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}

/// Linear ramp from `a` to `b` over `dur` seconds, then hold.
fn ramp(a: f32, b: f32, dur: f32, t: f32) -> f32 {
    a + (b - a) * (t / dur).min(1.0)
}

fn wing() -> Vec<f32> {
    let freq = lfo(|t: f32| ramp(280.0, 720.0, 0.08, t));
    let gain = lfo(|t: f32| ramp(0.12, 0.0, 0.1, t));
    render((freq >> sine()) * gain, 0.1)
}

fn point() -> Vec<f32> {
    let freq = lfo(|t: f32| if t < 0.07 { 988.0 } else { 1319.0 });
    let gain = lfo(|t: f32| ramp(0.12, 0.0, 0.25, t));
    render((freq >> square()) * gain, 0.25)
}

fn hit() -> Vec<f32> {
    let gain = lfo(|t: f32| ramp(0.3, 0.0, 0.12, t));
    render((noise() >> lowpass_hz(900.0, 1.0)) * gain, 0.12)
}

// Sawtooth dropping 400Hz to 80Hz while fading out.
fn die() -> Vec<f32> {
    let freq = lfo(|t: f32| ramp(400.0, 80.0, 0.4, t));
    let gain = lfo(|t: f32| ramp(0.15, 0.0, 0.5, t));
    render((freq >> saw()) * gain, 0.5)
}

fn swoosh() -> Vec<f32> {
    let gain = lfo(|t: f32| 0.2 * (t / 0.05).min(1.0) * ramp(1.0, 0.0, 0.3, t));
    render((noise() >> lowpass_hz(1800.0, 0.7)) * gain, 0.3)
}

// ── Playback ────────────────────────────────────────────────────────────────

/// Pre-rendered effects played through the default output device.
pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clips: Vec<(Sound, Vec<f32>)>,
}

impl Audio {
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| Error::AudioInit(e.to_string()))?;
        let clips = vec![
            (Sound::Wing, wing()),
            (Sound::Point, point()),
            (Sound::Hit, hit()),
            (Sound::Die, die()),
            (Sound::Swoosh, swoosh()),
        ];
        tracing::info!("audio ready, {} clips", clips.len());
        Ok(Self {
            _stream: stream,
            handle,
            clips,
        })
    }
}

impl Sfx for Audio {
    fn play(&mut self, sound: Sound) {
        let Some((_, clip)) = self.clips.iter().find(|(s, _)| *s == sound) else {
            return;
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, clip.clone()));
                sink.detach();
            }
            Err(e) => tracing::warn!("could not play {sound:?}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_have_expected_length_and_level() {
        for (clip, secs) in [(wing(), 0.1), (point(), 0.25), (die(), 0.5)] {
            assert_eq!(clip.len(), (secs * SAMPLE_RATE as f64) as usize);
            assert!(clip.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
            assert!(clip.iter().any(|s| s.abs() > 0.01));
        }
    }

    #[test]
    fn ramp_holds_after_duration() {
        assert_eq!(ramp(400.0, 80.0, 0.4, 0.0), 400.0);
        assert_eq!(ramp(400.0, 80.0, 0.4, 0.2), 240.0);
        assert_eq!(ramp(400.0, 80.0, 0.4, 1.0), 80.0);
    }
}
