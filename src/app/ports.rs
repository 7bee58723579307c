//! Port traits: the hexagonal boundary between panel logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlPanel (domain)
//! ```
//!
//! Driven adapters (button sampler, indicator driver, event sinks, clock)
//! implement these traits.  The [`ControlPanel`](super::service::ControlPanel)
//! consumes them via generics, so the state machines never touch GPIO directly.

use crate::drivers::input::InputLevel;

use super::events::PanelEvent;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one button sample per control tick.
pub trait InputPort {
    /// Current logical level, already inverted for pull-up wiring.
    fn sample(&mut self) -> InputLevel;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the single indicator output.
pub trait IndicatorPort {
    /// Energise (`true`) or de-energise the indicator.
    fn set_indicator(&mut self, on: bool);

    /// Last level written.
    fn indicator(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Receives every structured event the panel emits.
pub trait EventSink {
    fn emit(&mut self, event: &PanelEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock and control-loop pacing.
pub trait TimePort {
    /// Milliseconds since boot (monotonic).
    fn now_ms(&self) -> u64;

    /// Yield to the scheduler for `ms` milliseconds.
    fn sleep_ms(&self, ms: u32);
}
