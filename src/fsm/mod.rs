//! Panel state machines.
//!
//! One machine runs per panel, selected from the configured behaviour:
//!
//! ```text
//! ┌────────────┬──────────────────────┬────────────────────────────────┐
//! │ Behaviour  │ Machine              │ Driven by                      │
//! ├────────────┼──────────────────────┼────────────────────────────────┤
//! │ power      │ PowerMachine         │ long press (3 s)               │
//! │ mode       │ CycleMachine         │ confirmed press                │
//! │ alarm      │ ToggleMachine        │ confirmed press                │
//! │ hold       │ HoldAlarmMachine     │ press and release              │
//! │ heartbeat, │ ScriptPlayer         │ clock only                     │
//! │ escalating,│                      │                                │
//! │ siren,     │                      │                                │
//! │ alarm-demo │                      │                                │
//! └────────────┴──────────────────────┴────────────────────────────────┘
//! ```
//!
//! Every machine receives the same `&mut PanelContext` each tick, reads
//! `ctx.input` and `ctx.now_ms`, and leaves the indicator level it wants in
//! `ctx.indicator`.  Machines never touch hardware.

pub mod context;
pub mod cycle;
pub mod hold;
pub mod power;
pub mod scripted;
pub mod toggle;

use log::info;

use crate::app::ports::EventSink;
use crate::config::{PanelBehavior, PanelConfig};
use crate::drivers::led_patterns::PatternScript;

use context::PanelContext;
use cycle::CycleMachine;
use hold::HoldAlarmMachine;
use power::PowerMachine;
use scripted::ScriptPlayer;
use toggle::ToggleMachine;

/// The active panel machine.
pub enum PanelMachine {
    Power(PowerMachine),
    Mode(CycleMachine),
    Alarm(ToggleMachine),
    Hold(HoldAlarmMachine),
    Scripted(ScriptPlayer),
}

impl PanelMachine {
    /// Build the machine for `config.behavior`.
    pub fn for_config(config: &PanelConfig) -> Self {
        match config.behavior {
            PanelBehavior::Power => {
                Self::Power(PowerMachine::new(config.debounce_ms, config.long_press_ms))
            }
            PanelBehavior::Mode => Self::Mode(CycleMachine::new(config.debounce_ms)),
            PanelBehavior::Alarm => Self::Alarm(ToggleMachine::new(config.debounce_ms)),
            PanelBehavior::Hold => Self::Hold(HoldAlarmMachine::new(config.debounce_ms)),
            PanelBehavior::Heartbeat => Self::Scripted(ScriptPlayer::new(PatternScript::heartbeat())),
            PanelBehavior::Escalating => {
                Self::Scripted(ScriptPlayer::new(PatternScript::escalating()))
            }
            PanelBehavior::Siren => Self::Scripted(ScriptPlayer::new(PatternScript::siren())),
            PanelBehavior::AlarmDemo => {
                Self::Scripted(ScriptPlayer::new(PatternScript::alarm_demo()))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Power(_) => "power",
            Self::Mode(_) => "mode",
            Self::Alarm(_) => "alarm",
            Self::Hold(_) => "hold",
            Self::Scripted(player) => player.script().name(),
        }
    }

    /// Put the machine into its initial output state.  Call once before the
    /// first [`poll`](Self::poll).
    pub fn start(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        info!("panel machine starting: {}", self.name());
        match self {
            Self::Power(_) | Self::Alarm(_) => ctx.indicator = false,
            Self::Mode(m) => m.start(ctx),
            Self::Hold(m) => m.start(ctx),
            Self::Scripted(p) => p.start(ctx, sink),
        }
    }

    /// Advance one control tick.
    pub fn poll(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        match self {
            Self::Power(m) => m.poll(ctx, sink),
            Self::Mode(m) => m.poll(ctx, sink),
            Self::Alarm(m) => m.poll(ctx, sink),
            Self::Hold(m) => m.poll(ctx, sink),
            Self::Scripted(p) => p.poll(ctx, sink),
        }
    }
}
