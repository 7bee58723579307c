//! Hold-to-alarm emergency button.
//!
//! The alarm follows the button: active from the confirmed press until the
//! release, with the fast alarm cadence while active and a slow heartbeat
//! otherwise.

use crate::app::events::PanelEvent;
use crate::app::ports::EventSink;
use crate::drivers::blink::{BlinkPattern, BlinkScheduler};
use crate::drivers::button::{DebouncedEdgeDetector, EdgeEvent};

use super::context::PanelContext;

/// Slow "system normal" cadence while the button is released.
pub const NORMAL_HEARTBEAT: BlinkPattern = BlinkPattern::square(1000);

pub struct HoldAlarmMachine {
    detector: DebouncedEdgeDetector,
    blink: BlinkScheduler,
}

impl HoldAlarmMachine {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            detector: DebouncedEdgeDetector::new(debounce_ms),
            blink: BlinkScheduler::new(NORMAL_HEARTBEAT, 0),
        }
    }

    pub fn start(&mut self, ctx: &PanelContext) {
        self.blink.swap(NORMAL_HEARTBEAT, ctx.now_ms);
    }

    pub fn poll(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        let now = ctx.now_ms;

        match self.detector.poll(ctx.input, now) {
            Some(EdgeEvent::PressConfirmed { .. }) => {
                ctx.alarm.active = true;
                ctx.alarm.activations = ctx.alarm.activations.saturating_add(1);
                self.blink.swap(BlinkPattern::ALARM_FAST, now);
                sink.emit(&PanelEvent::AlarmChanged {
                    active: true,
                    activations: ctx.alarm.activations,
                });
            }
            Some(EdgeEvent::ReleaseConfirmed { .. }) => {
                ctx.alarm.active = false;
                self.blink.swap(NORMAL_HEARTBEAT, now);
                sink.emit(&PanelEvent::AlarmChanged {
                    active: false,
                    activations: ctx.alarm.activations,
                });
            }
            None => {}
        }

        ctx.indicator = self.blink.level(now);
    }
}
