//! Outbound panel events.
//!
//! The [`ControlPanel`](super::service::ControlPanel) and its state machines
//! emit these through the [`EventSink`](super::ports::EventSink) port.
//! Adapters on the other side decide what to do with them, usually logging
//! to the serial console or recording them in a test.

use crate::config::PanelBehavior;
pub use crate::drivers::led_patterns::Severity;
use crate::fsm::cycle::ModeState;
use crate::fsm::power::LifecycleState;

/// Structured events emitted by the panel core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The panel has started (carries the selected behaviour).
    Started(PanelBehavior),

    /// A press survived the debounce window.
    PressConfirmed { at_ms: u64 },

    /// A press released before the long-press threshold; rejected by policy.
    ShortPressIgnored { held_ms: u64, required_ms: u64 },

    /// A press was held past the long-press threshold.
    LongPressReached { held_ms: u64 },

    /// The power lifecycle moved between states.
    LifecycleChanged {
        from: LifecycleState,
        to: LifecycleState,
    },

    /// One boot progress pulse started.
    BootProgress { boot_cycle: u32, percent: u8 },

    /// One shutdown progress pulse started.
    ShutdownProgress { percent: u8 },

    /// Boot/shutdown finished while the button is still held; waiting for release.
    AwaitingRelease,

    /// The alarm was raised or cleared.
    AlarmChanged { active: bool, activations: u32 },

    /// The operating mode advanced.
    ModeChanged { from: ModeState, to: ModeState },

    /// A scripted indicator pattern entered a new stage.
    PatternStage {
        label: &'static str,
        severity: Severity,
    },

    /// A scripted indicator pattern completed another block of cycles.
    PatternMilestone { label: &'static str, cycles: u64 },
}
