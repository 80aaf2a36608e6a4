//! Rotary encoder abstraction

use crate::config::ENCODER_DEBOUNCE_MS;

/// Rotary encoder with an integrated push button.
pub trait EncoderSource {
    /// Poll for an event (non-blocking). `None` when nothing happened.
    fn poll_event(&mut self) -> Option<EncoderEvent>;
}

/// Events produced by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderEvent {
    /// One detent clockwise
    Clockwise,
    /// One detent counter-clockwise
    CounterClockwise,
    /// Push button pressed
    Enter,
}

impl EncoderEvent {
    /// Map a signed detent delta to a rotation event.
    ///
    /// Positive deltas are clockwise; zero yields `None`.
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta {
            0 => None,
            d if d > 0 => Some(Self::Clockwise),
            _ => Some(Self::CounterClockwise),
        }
    }

    /// Signed step for value editing: `+1`, `-1`, or `0` for Enter.
    pub fn step(self) -> i32 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
            Self::Enter => 0,
        }
    }
}

// ── Debounce ─────────────────────────────────────────────────────────────────

/// Enforces a minimum spacing between accepted events.
///
/// Timestamps are caller-supplied milliseconds from a free-running counter;
/// wrap-around is handled with wrapping subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u32,
    last_ms: Option<u32>,
}

impl Debouncer {
    /// Create a debouncer with the given window.
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_ms: None,
        }
    }

    /// Debounce window in milliseconds.
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Returns `true` and records `now_ms` when the window has elapsed since
    /// the last accepted event.
    pub fn accept(&mut self, now_ms: u32) -> bool {
        let ready = match self.last_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.window_ms,
        };
        if ready {
            self.last_ms = Some(now_ms);
        }
        ready
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(ENCODER_DEBOUNCE_MS)
    }
}

/// Wraps a raw encoder and drops events arriving inside the debounce window.
pub struct DebouncedEncoder<E> {
    inner: E,
    debouncer: Debouncer,
}

impl<E: EncoderSource> DebouncedEncoder<E> {
    /// Wrap `inner` with the given debounce window.
    pub fn new(inner: E, window_ms: u32) -> Self {
        Self {
            inner,
            debouncer: Debouncer::new(window_ms),
        }
    }

    /// Poll the wrapped encoder, discarding bounced events.
    pub fn poll_at(&mut self, now_ms: u32) -> Option<EncoderEvent> {
        let event = self.inner.poll_event()?;
        if self.debouncer.accept(now_ms) {
            Some(event)
        } else {
            None
        }
    }

    /// Borrow the wrapped encoder.
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mocks::MockEncoder;

    #[test]
    fn test_from_delta() {
        assert_eq!(EncoderEvent::from_delta(0), None);
        assert_eq!(EncoderEvent::from_delta(3), Some(EncoderEvent::Clockwise));
        assert_eq!(
            EncoderEvent::from_delta(-1),
            Some(EncoderEvent::CounterClockwise)
        );
    }

    #[test]
    fn test_debouncer_default_window_is_20ms() {
        assert_eq!(Debouncer::default().window_ms(), 20);
    }

    #[test]
    fn test_debouncer_rejects_inside_window() {
        let mut d = Debouncer::new(20);
        assert!(d.accept(100));
        assert!(!d.accept(110));
        assert!(!d.accept(119));
        assert!(d.accept(120));
    }

    #[test]
    fn test_debouncer_handles_wraparound() {
        let mut d = Debouncer::new(20);
        assert!(d.accept(u32::MAX - 5));
        assert!(!d.accept(5));
        assert!(d.accept(15));
    }

    #[test]
    fn test_debounced_encoder_drops_bounce() {
        let mut raw = MockEncoder::new();
        raw.add_event(EncoderEvent::Clockwise).unwrap();
        raw.add_event(EncoderEvent::Clockwise).unwrap();
        raw.add_event(EncoderEvent::Enter).unwrap();
        let mut enc = DebouncedEncoder::new(raw, 20);

        assert_eq!(enc.poll_at(0), Some(EncoderEvent::Clockwise));
        assert_eq!(enc.poll_at(5), None, "second detent bounced");
        assert_eq!(enc.poll_at(40), Some(EncoderEvent::Enter));
        assert_eq!(enc.poll_at(80), None, "queue drained");
    }
}
