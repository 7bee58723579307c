//! Operating-mode selector.
//!
//! ```text
//!   MANUAL ──press──▶ AUTO ──press──▶ MAINTENANCE ──press──┐
//!     ▲                                                     │
//!     └─────────────────────────────────────────────────────┘
//! ```
//!
//! Each mode has its own symmetric blink cadence.  A mode change plays one
//! short acknowledge pulse, then the new cadence starts from its lit half.

use core::fmt;

use crate::app::events::PanelEvent;
use crate::app::ports::EventSink;
use crate::drivers::blink::{BlinkPattern, BlinkScheduler};
use crate::drivers::button::{DebouncedEdgeDetector, EdgeEvent};

use super::context::PanelContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeState {
    #[default]
    Manual,
    Auto,
    Maintenance,
}

impl ModeState {
    pub const ALL: [Self; 3] = [Self::Manual, Self::Auto, Self::Maintenance];

    /// Next mode in the cycle, wrapping back to `Manual`.
    pub fn next(self) -> Self {
        match self {
            Self::Manual => Self::Auto,
            Self::Auto => Self::Maintenance,
            Self::Maintenance => Self::Manual,
        }
    }

    /// On and off half-period of this mode's cadence.
    pub fn half_period_ms(self) -> u32 {
        match self {
            Self::Manual => 1000,
            Self::Auto => 500,
            Self::Maintenance => 200,
        }
    }

    pub fn cadence(self) -> BlinkPattern {
        BlinkPattern::square(self.half_period_ms())
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Auto => "AUTO",
            Self::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for ModeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct CycleMachine {
    detector: DebouncedEdgeDetector,
    cadence: BlinkScheduler,
    ack: Option<BlinkScheduler>,
}

impl CycleMachine {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            detector: DebouncedEdgeDetector::new(debounce_ms),
            cadence: BlinkScheduler::new(ModeState::Manual.cadence(), 0),
            ack: None,
        }
    }

    /// Restart the current mode's cadence at `now_ms`.
    pub fn start(&mut self, ctx: &PanelContext) {
        self.cadence.swap(ctx.mode.cadence(), ctx.now_ms);
        self.ack = None;
    }

    /// True while the acknowledge pulse is playing.
    pub fn is_acknowledging(&self) -> bool {
        self.ack.is_some()
    }

    pub fn poll(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        let now = ctx.now_ms;

        if let Some(EdgeEvent::PressConfirmed { .. }) = self.detector.poll(ctx.input, now) {
            let from = ctx.mode;
            ctx.mode = from.next();
            sink.emit(&PanelEvent::ModeChanged { from, to: ctx.mode });

            let ack = BlinkScheduler::new(BlinkPattern::ACK_PULSE, now);
            let resume_at = now + BlinkPattern::ACK_PULSE.total_ms().unwrap_or(0);
            self.ack = Some(ack);
            self.cadence.swap(ctx.mode.cadence(), resume_at);
        }

        if self.ack.is_some_and(|ack| ack.is_finished(now)) {
            self.ack = None;
        }

        ctx.indicator = match self.ack {
            Some(ack) => ack.level(now),
            None => self.cadence.level(now),
        };
    }
}
