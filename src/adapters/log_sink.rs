//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured panel events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).  Severity
//! follows the event: alarm entry and critical pattern stages at error,
//! shutdown and warning stages at warn, everything else at info.

use log::{Level, log};

use crate::app::events::{PanelEvent, Severity};
use crate::app::ports::EventSink;
use crate::fsm::power::LifecycleState;

/// Adapter that logs every [`PanelEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written since construction.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

/// Log level an event is written at.
pub fn event_level(event: &PanelEvent) -> Level {
    match *event {
        PanelEvent::AlarmChanged { active: true, .. } => Level::Error,
        PanelEvent::LifecycleChanged {
            to: LifecycleState::ShuttingDown,
            ..
        }
        | PanelEvent::ShutdownProgress { .. } => Level::Warn,
        PanelEvent::PatternStage { severity, .. } => match severity {
            Severity::Normal => Level::Info,
            Severity::Warning => Level::Warn,
            Severity::Critical => Level::Error,
        },
        PanelEvent::Started(_)
        | PanelEvent::PressConfirmed { .. }
        | PanelEvent::ShortPressIgnored { .. }
        | PanelEvent::LongPressReached { .. }
        | PanelEvent::LifecycleChanged { .. }
        | PanelEvent::BootProgress { .. }
        | PanelEvent::AwaitingRelease
        | PanelEvent::AlarmChanged { active: false, .. }
        | PanelEvent::ModeChanged { .. }
        | PanelEvent::PatternMilestone { .. } => Level::Info,
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PanelEvent) {
        self.emitted += 1;
        let level = event_level(event);
        match *event {
            PanelEvent::Started(behavior) => {
                log!(level, "PANEL | START | behavior={}", behavior);
            }
            PanelEvent::PressConfirmed { at_ms } => {
                log!(level, "PANEL | PRESS | confirmed (edge at {}ms)", at_ms);
            }
            PanelEvent::ShortPressIgnored {
                held_ms,
                required_ms,
            } => {
                log!(
                    level,
                    "PANEL | PRESS | short press ignored (held {}ms, need {}ms)",
                    held_ms,
                    required_ms
                );
            }
            PanelEvent::LongPressReached { held_ms } => {
                log!(level, "PANEL | PRESS | long press after {}ms", held_ms);
            }
            PanelEvent::LifecycleChanged { from, to } => {
                log!(level, "PANEL | POWER | {} -> {}", from, to);
            }
            PanelEvent::BootProgress {
                boot_cycle,
                percent,
            } => {
                log!(level, "PANEL | BOOT | progress {}% (boot #{})", percent, boot_cycle);
            }
            PanelEvent::ShutdownProgress { percent } => {
                log!(level, "PANEL | SHUTDOWN | progress {}%", percent);
            }
            PanelEvent::AwaitingRelease => {
                log!(level, "PANEL | POWER | release button to continue");
            }
            PanelEvent::AlarmChanged {
                active: true,
                activations,
            } => {
                log!(level, "PANEL | ALARM | !!! ALARM ACTIVATED !!! (press #{})", activations);
            }
            PanelEvent::AlarmChanged {
                active: false,
                activations,
            } => {
                log!(level, "PANEL | ALARM | cleared, system normal (press #{})", activations);
            }
            PanelEvent::ModeChanged { from, to } => {
                log!(
                    level,
                    "PANEL | MODE | {} -> {} (blink {}ms)",
                    from,
                    to,
                    to.half_period_ms()
                );
            }
            PanelEvent::PatternStage { label, .. } => {
                log!(level, "PANEL | PATTERN | {}", label);
            }
            PanelEvent::PatternMilestone { label, cycles } => {
                log!(level, "PANEL | PATTERN | {} milestone: {} cycles", label, cycles);
            }
        }
    }
}
