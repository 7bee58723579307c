//! Control panel service: the hexagonal core.
//!
//! [`ControlPanel`] owns the active state machine and the shared
//! [`PanelContext`].  All I/O flows through port traits injected at call
//! sites, so the whole panel runs against mock adapters in tests.
//!
//! ```text
//!   InputPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      ControlPanel       │
//! IndicatorPort ◀─│  PanelMachine · Context │ ◀── TimePort
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::config::{ConfigError, PanelBehavior, PanelConfig};
use crate::drivers::input::InputLevel;
use crate::fsm::PanelMachine;
use crate::fsm::context::PanelContext;
use crate::fsm::cycle::ModeState;
use crate::fsm::power::LifecycleState;
use crate::fsm::toggle::AlarmState;

use super::events::PanelEvent;
use super::ports::{EventSink, IndicatorPort, InputPort, TimePort};

// ───────────────────────────────────────────────────────────────
// ControlPanel
// ───────────────────────────────────────────────────────────────

pub struct ControlPanel {
    machine: PanelMachine,
    ctx: PanelContext,
    tick_count: u64,
}

impl ControlPanel {
    /// Validate `config` and build the machine for its behaviour.
    ///
    /// Does **not** drive the indicator; call [`start`](Self::start) next.
    pub fn new(config: PanelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let machine = PanelMachine::for_config(&config);
        Ok(Self {
            machine,
            ctx: PanelContext::new(config),
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the behaviour and apply the initial indicator level.
    pub fn start(&mut self, hw: &mut impl IndicatorPort, now_ms: u64, sink: &mut impl EventSink) {
        self.ctx.now_ms = now_ms;
        sink.emit(&PanelEvent::Started(self.behavior()));
        self.machine.start(&mut self.ctx, sink);
        hw.set_indicator(self.ctx.indicator);
        info!(
            "ControlPanel started: behavior={} button=GPIO{} indicator=GPIO{}",
            self.behavior(),
            self.ctx.config.button_gpio,
            self.ctx.config.indicator_gpio
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control tick: sample → state machine → indicator.
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`IndicatorPort`], avoiding a double mutable borrow.
    pub fn tick(
        &mut self,
        hw: &mut (impl InputPort + IndicatorPort),
        now_ms: u64,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.ctx.total_ticks = self.tick_count;
        self.ctx.now_ms = now_ms;

        // 1. Sample (script behaviours leave the button alone)
        self.ctx.input = if self.behavior().uses_input() {
            hw.sample()
        } else {
            InputLevel::Released
        };

        // 2. Edge detection, timing and transitions
        self.machine.poll(&mut self.ctx, sink);

        // 3. Output
        hw.set_indicator(self.ctx.indicator);
    }

    /// [`tick`](Self::tick) at the time reported by `clock`.
    pub fn tick_with_clock(
        &mut self,
        hw: &mut (impl InputPort + IndicatorPort),
        clock: &impl TimePort,
        sink: &mut impl EventSink,
    ) {
        self.tick(hw, clock.now_ms(), sink);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn behavior(&self) -> PanelBehavior {
        self.ctx.config.behavior
    }

    pub fn config(&self) -> &PanelConfig {
        &self.ctx.config
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.ctx.lifecycle
    }

    pub fn mode(&self) -> ModeState {
        self.ctx.mode
    }

    pub fn alarm(&self) -> AlarmState {
        self.ctx.alarm
    }

    /// Boot sequences started since power-up.
    pub fn boot_cycles(&self) -> u32 {
        self.ctx.boot_cycles
    }

    /// Indicator level commanded by the last tick.
    pub fn indicator(&self) -> bool {
        self.ctx.indicator
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn machine(&self) -> &PanelMachine {
        &self.machine
    }
}
