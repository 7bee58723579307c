//! Non-blocking blink scheduler.
//!
//! Derives the indicator level from wall-clock time instead of sleeping
//! between edges, so the control loop keeps sampling the button while a
//! pattern plays.  The caller passes `now_ms` on every query; the
//! scheduler only remembers when the current pattern started.
//!
//! | Pattern        | On     | Off    | Repeat  |
//! |----------------|--------|--------|---------|
//! | HOLD_FEEDBACK  | 250 ms | 250 ms | forever |
//! | BOOT_STEP      | 250 ms | 150 ms | 5       |
//! | SHUTDOWN_STEP  | 150 ms | 100 ms | 5       |
//! | ALARM_FAST     | 100 ms | 100 ms | forever |
//! | ACK_PULSE      | 100 ms | 100 ms | 1       |

/// How many on/off cycles a pattern runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Times(u32),
}

/// One on/off cadence.  Immutable once selected; swap it for a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern {
    pub on_ms: u32,
    pub off_ms: u32,
    pub repeat: Repeat,
}

impl BlinkPattern {
    /// Indicator dark.
    pub const OFF: Self = Self::forever(0, 1000);

    /// "How long have you been holding" feedback while a long press times.
    pub const HOLD_FEEDBACK: Self = Self::forever(250, 250);
    /// One pulse per boot progress step.
    pub const BOOT_STEP: Self = Self::times(250, 150, 5);
    /// One pulse per shutdown progress step.
    pub const SHUTDOWN_STEP: Self = Self::times(150, 100, 5);
    /// Critical alarm cadence.
    pub const ALARM_FAST: Self = Self::forever(100, 100);
    /// Acknowledge a mode change before the new cadence starts.
    pub const ACK_PULSE: Self = Self::times(100, 100, 1);

    pub const fn forever(on_ms: u32, off_ms: u32) -> Self {
        Self {
            on_ms,
            off_ms,
            repeat: Repeat::Forever,
        }
    }

    pub const fn times(on_ms: u32, off_ms: u32, count: u32) -> Self {
        Self {
            on_ms,
            off_ms,
            repeat: Repeat::Times(count),
        }
    }

    /// Symmetric cadence: equal on and off half-periods.
    pub const fn square(half_period_ms: u32) -> Self {
        Self::forever(half_period_ms, half_period_ms)
    }

    pub const fn period_ms(&self) -> u64 {
        self.on_ms as u64 + self.off_ms as u64
    }

    /// Total run time, `None` for patterns that never finish.
    pub const fn total_ms(&self) -> Option<u64> {
        match self.repeat {
            Repeat::Forever => None,
            Repeat::Times(n) => Some(self.period_ms() * n as u64),
        }
    }
}

/// Plays one [`BlinkPattern`] against a monotonic millisecond clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkScheduler {
    pattern: BlinkPattern,
    started_ms: u64,
}

impl BlinkScheduler {
    pub fn new(pattern: BlinkPattern, now_ms: u64) -> Self {
        Self {
            pattern,
            started_ms: now_ms,
        }
    }

    pub fn pattern(&self) -> BlinkPattern {
        self.pattern
    }

    /// Replace the pattern and restart its phase at `now_ms`.
    pub fn swap(&mut self, pattern: BlinkPattern, now_ms: u64) {
        self.pattern = pattern;
        self.started_ms = now_ms;
    }

    /// When a finite pattern ends, `None` for patterns that never finish.
    pub fn ends_at_ms(&self) -> Option<u64> {
        self.pattern.total_ms().map(|total| self.started_ms + total)
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms)
    }

    /// Index of the on/off cycle in progress at `now_ms` (0-based).
    pub fn cycle(&self, now_ms: u64) -> u64 {
        match self.pattern.period_ms() {
            0 => 0,
            period => self.elapsed_ms(now_ms) / period,
        }
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.pattern
            .total_ms()
            .is_some_and(|total| self.elapsed_ms(now_ms) >= total)
    }

    /// Indicator level the pattern asks for at `now_ms`.
    pub fn level(&self, now_ms: u64) -> bool {
        let period = self.pattern.period_ms();
        if period == 0 || self.is_finished(now_ms) {
            return false;
        }
        self.elapsed_ms(now_ms) % period < self.pattern.on_ms as u64
    }
}
