//! Scroll clock driving the marquee.

use tracing::trace;

/// Default amount of animation time added per tick.
pub const DEFAULT_STEP: f64 = 0.1;

/// Default tick period in milliseconds.
pub const DEFAULT_INTERVAL_MS: u32 = 100;

/// Monotonic animation-time counter.
///
/// The clock does not own a timer. The host calls [`tick`](Self::tick)
/// (or [`advance`](Self::advance)) from its own periodic timer at
/// [`interval_ms`](Self::interval_ms); missed ticks are not made up.
///
/// ## Example
///
/// ```rust
/// use pipe_strip_view::ScrollClock;
///
/// let mut clock = ScrollClock::default();
/// for _ in 0..25 {
///     clock.tick();
/// }
/// // ~2.5 time units elapsed, so the marquee is 2 columns in
/// assert_eq!(clock.offset(10), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollClock {
    time: f64,
    step: f64,
    interval_ms: u32,
}

impl Default for ScrollClock {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl ScrollClock {
    /// Create a clock advancing by `step` per tick.
    ///
    /// Non-finite or negative steps fall back to [`DEFAULT_STEP`].
    pub fn new(step: f64) -> Self {
        Self {
            time: 0.0,
            step: sanitize_step(step),
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }

    /// Set the tick period the host should use.
    #[must_use]
    pub fn with_interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms.max(1);
        self
    }

    /// Tick period in milliseconds.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time added per tick.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Elapsed animation time.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advance by the configured step.
    pub fn tick(&mut self) {
        self.advance(self.step);
    }

    /// Advance by `dt`. Negative or non-finite values are ignored so the
    /// clock never runs backwards.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
            trace!(time = self.time, "scroll clock advanced");
        }
    }

    /// Column offset into content of `width` columns: `floor(t) mod width`,
    /// or 0 for zero-width content.
    pub fn offset(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        // `as` saturates, so huge times stay in range after the modulo.
        (self.time.floor() as u64 % width as u64) as usize
    }

    /// Restart from zero.
    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

fn sanitize_step(step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        DEFAULT_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ticks_accumulate() {
        let mut clock = ScrollClock::default();
        for _ in 0..10 {
            clock.tick();
        }
        assert!((clock.time() - 1.0).abs() < 1e-9);
        assert_eq!(clock.interval_ms(), 100);
    }

    #[test]
    fn offset_wraps() {
        let mut clock = ScrollClock::new(1.0);
        clock.advance(13.7);
        assert_eq!(clock.offset(5), 3);
        assert_eq!(clock.offset(100), 13);
        assert_eq!(clock.offset(0), 0);
    }

    #[test]
    fn rejects_backwards_time() {
        let mut clock = ScrollClock::default();
        clock.advance(2.0);
        clock.advance(-1.0);
        clock.advance(f64::NAN);
        clock.advance(f64::INFINITY);
        assert_eq!(clock.time(), 2.0);
    }

    #[test]
    fn bad_step_uses_default() {
        assert_eq!(ScrollClock::new(-3.0).step(), DEFAULT_STEP);
        assert_eq!(ScrollClock::new(f64::NAN).step(), DEFAULT_STEP);
        assert_eq!(ScrollClock::new(0.5).step(), 0.5);
        assert_eq!(ScrollClock::default().with_interval_ms(0).interval_ms(), 1);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut clock = ScrollClock::default();
        clock.advance(42.0);
        clock.reset();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.offset(7), 0);
    }

    proptest! {
        #[test]
        fn offset_is_periodic(
            whole in 0u32..10_000,
            frac in 0.0f64..0.99,
            width in 1usize..500,
            k in 0usize..20,
        ) {
            let t = f64::from(whole) + frac;
            let mut a = ScrollClock::default();
            a.advance(t);
            let mut b = ScrollClock::default();
            b.advance(t + (k * width) as f64);
            prop_assert!(a.offset(width) < width);
            prop_assert_eq!(a.offset(width), b.offset(width));
        }
    }
}
