use std::thread;
use std::time::{Duration, Instant};

/// Fixed-rate loop pacing. `wait` is the loop's only suspension point.
///
/// A tick that overruns its period is not made up for: the schedule restarts
/// from the late tick instead of bursting to catch up.
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(hz: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / hz.max(1),
            next: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn wait(&mut self) {
        self.next += self.period;
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        } else {
            self.next = now;
        }
    }
}
