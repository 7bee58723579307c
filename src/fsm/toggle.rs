//! Emergency alarm toggle.
//!
//! Every confirmed press flips the alarm.  While active the indicator runs
//! the fast alarm cadence; while inactive it stays dark.  A press raises or
//! clears the alarm exactly once because the edge detector only reports a
//! new press after the button has been seen released.

use log::debug;

use crate::app::events::PanelEvent;
use crate::app::ports::EventSink;
use crate::drivers::blink::{BlinkPattern, BlinkScheduler};
use crate::drivers::button::{DebouncedEdgeDetector, EdgeEvent};

use super::context::PanelContext;

/// Alarm flag plus a running count of confirmed presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmState {
    pub active: bool,
    /// Incremented on every confirmed press, raise or clear.
    pub activations: u32,
}

pub struct ToggleMachine {
    detector: DebouncedEdgeDetector,
    blink: BlinkScheduler,
}

impl ToggleMachine {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            detector: DebouncedEdgeDetector::new(debounce_ms),
            blink: BlinkScheduler::new(BlinkPattern::OFF, 0),
        }
    }

    pub fn poll(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        if let Some(EdgeEvent::PressConfirmed { .. }) = self.detector.poll(ctx.input, ctx.now_ms) {
            let alarm = &mut ctx.alarm;
            alarm.activations = alarm.activations.saturating_add(1);
            alarm.active = !alarm.active;

            let pattern = if alarm.active {
                BlinkPattern::ALARM_FAST
            } else {
                BlinkPattern::OFF
            };
            self.blink.swap(pattern, ctx.now_ms);
            debug!("toggle: alarm {}", if alarm.active { "raised" } else { "cleared" });

            sink.emit(&PanelEvent::AlarmChanged {
                active: alarm.active,
                activations: alarm.activations,
            });
        }

        ctx.indicator = ctx.alarm.active && self.blink.level(ctx.now_ms);
    }
}
