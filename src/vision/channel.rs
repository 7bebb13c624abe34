use std::sync::atomic::{AtomicU64, Ordering};

const PRESENT: u64 = 1 << 32;

/// Latest tracked vertical position, most recent wins.
///
/// The slot packs a presence bit and the `f32` bits into one `AtomicU64`, so
/// readers see either the previous value or the new one and never wait.
#[derive(Debug, Default)]
pub struct TrackingChannel {
    slot: AtomicU64,
}

impl TrackingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, y: f32) {
        self.slot.store(PRESENT | y.to_bits() as u64, Ordering::Release);
    }

    /// `None` until the first publish (or after a `clear`).
    pub fn latest(&self) -> Option<f32> {
        let raw = self.slot.load(Ordering::Acquire);
        (raw & PRESENT != 0).then(|| f32::from_bits(raw as u32))
    }

    pub fn clear(&self) {
        self.slot.store(0, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn empty_until_first_publish() {
        let ch = TrackingChannel::new();
        assert_eq!(ch.latest(), None);
        ch.publish(0.0);
        assert_eq!(ch.latest(), Some(0.0));
        ch.clear();
        assert_eq!(ch.latest(), None);
    }

    #[test]
    fn reads_repeat_the_last_write() {
        let ch = TrackingChannel::new();
        ch.publish(0.25);
        ch.publish(0.75);
        for _ in 0..10 {
            assert_eq!(ch.latest(), Some(0.75));
        }
    }

    #[test]
    fn concurrent_reader_only_sees_published_values() {
        let ch = Arc::new(TrackingChannel::new());
        let writer = {
            let ch = Arc::clone(&ch);
            thread::spawn(move || {
                for i in 0..10_000u32 {
                    ch.publish(i as f32);
                }
            })
        };
        let mut last = -1.0f32;
        while !writer.is_finished() {
            if let Some(v) = ch.latest() {
                assert_eq!(v.fract(), 0.0);
                assert!(v >= last);
                last = v;
            }
        }
        writer.join().unwrap();
        assert_eq!(ch.latest(), Some(9_999.0));
    }
}
