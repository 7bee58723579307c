//! Shared mutable context threaded through every panel state machine.
//!
//! `PanelContext` is the single struct the machines read from and write
//! to: the latest button sample, the indicator command, the panel-wide
//! state (lifecycle, mode, alarm), timing and configuration.  There is one
//! instance, owned by the control panel and lent out per tick, so each
//! piece of state has exactly one writer.

use crate::config::PanelConfig;
use crate::drivers::input::InputLevel;

use super::cycle::ModeState;
use super::power::LifecycleState;
use super::toggle::AlarmState;

pub struct PanelContext {
    // -- Timing --
    /// Monotonic time of the current tick.
    pub now_ms: u64,
    /// Ticks run since start.
    pub total_ticks: u64,

    // -- Input --
    /// Button level sampled at the top of this tick.
    pub input: InputLevel,

    // -- Output --
    /// Indicator level to apply after the machine has run.
    pub indicator: bool,

    // -- Panel state --
    pub lifecycle: LifecycleState,
    pub mode: ModeState,
    pub alarm: AlarmState,
    /// Boot sequences started since power-up (diagnostic).
    pub boot_cycles: u32,

    // -- Configuration --
    pub config: PanelConfig,
}

impl PanelContext {
    /// Fresh context: everything resets to `Off` / `Manual` / alarm inactive.
    pub fn new(config: PanelConfig) -> Self {
        Self {
            now_ms: 0,
            total_ticks: 0,
            input: InputLevel::Released,
            indicator: false,
            lifecycle: LifecycleState::Off,
            mode: ModeState::Manual,
            alarm: AlarmState::default(),
            boot_cycles: 0,
            config,
        }
    }
}
