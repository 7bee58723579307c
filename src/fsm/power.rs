//! Long-press power lifecycle.
//!
//! One push button safely powers a controller on and off:
//!
//! ```text
//!   OFF ──[long press]──▶ BOOTING ──[5 progress pulses]──▶ ON
//!    ▲                                                     │
//!    └──[5 progress pulses]── SHUTTING DOWN ◀──[long press]┘
//! ```
//!
//! Short presses are rejected on purpose so a bump cannot change power
//! state.  Boot and shutdown run as a `RunningSequence` sub-state that owns
//! the indicator until it completes; afterwards `WaitingForRelease` holds
//! classification off until the button is seen released, so one long hold
//! produces exactly one transition.

use core::fmt;

use log::{debug, warn};

use crate::app::events::PanelEvent;
use crate::app::ports::EventSink;
use crate::drivers::blink::{BlinkPattern, BlinkScheduler};
use crate::drivers::button::{DebouncedEdgeDetector, EdgeEvent, LongPressTimer, PressClass};
use crate::drivers::input::InputLevel;

use super::context::PanelContext;

/// Power state of the simulated controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Off,
    Booting,
    On,
    ShuttingDown,
}

impl LifecycleState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Booting => "BOOTING",
            Self::On => "ON",
            Self::ShuttingDown => "SHUTTING DOWN",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress pulses per boot or shutdown.
pub const SEQUENCE_STEPS: u8 = 5;
/// Percent advanced per progress pulse.
const PERCENT_PER_STEP: u8 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceKind {
    Boot,
    Shutdown,
}

impl SequenceKind {
    fn pattern(self) -> BlinkPattern {
        match self {
            Self::Boot => BlinkPattern::BOOT_STEP,
            Self::Shutdown => BlinkPattern::SHUTDOWN_STEP,
        }
    }

    /// Boot counts up 0..=100, shutdown counts down 100..=0.
    fn percent(self, step: u8) -> u8 {
        match self {
            Self::Boot => step * PERCENT_PER_STEP,
            Self::Shutdown => 100 - step * PERCENT_PER_STEP,
        }
    }

    fn transient_state(self) -> LifecycleState {
        match self {
            Self::Boot => LifecycleState::Booting,
            Self::Shutdown => LifecycleState::ShuttingDown,
        }
    }

    fn settled_state(self) -> LifecycleState {
        match self {
            Self::Boot => LifecycleState::On,
            Self::Shutdown => LifecycleState::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PowerPhase {
    /// Classifying presses.
    Ready,
    /// Boot or shutdown pulses playing; input is not classified.
    RunningSequence {
        kind: SequenceKind,
        blink: BlinkScheduler,
        /// Progress steps already announced.
        announced: u8,
    },
    /// Sequence done, button still held.
    WaitingForRelease,
}

pub struct PowerMachine {
    detector: DebouncedEdgeDetector,
    timer: LongPressTimer,
    phase: PowerPhase,
}

impl PowerMachine {
    pub fn new(debounce_ms: u32, long_press_ms: u32) -> Self {
        Self {
            detector: DebouncedEdgeDetector::new(debounce_ms),
            timer: LongPressTimer::new(long_press_ms),
            phase: PowerPhase::Ready,
        }
    }

    /// True while boot/shutdown pulses are playing.
    pub fn is_running_sequence(&self) -> bool {
        matches!(self.phase, PowerPhase::RunningSequence { .. })
    }

    /// True while the re-trigger guard is waiting for the button to open.
    pub fn is_waiting_for_release(&self) -> bool {
        self.phase == PowerPhase::WaitingForRelease
    }

    /// True while a press is being timed toward the threshold.
    pub fn is_timing_press(&self) -> bool {
        self.timer.is_timing()
    }

    /// One control tick: edge detection, then timing / sequencing, then
    /// the indicator level.
    pub fn poll(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        let now = ctx.now_ms;

        // 1. Edge detection runs every tick so `last_level` stays current,
        //    even while a sequence owns the panel.
        let edge = self.detector.poll(ctx.input, now);

        // 2. Timing and lifecycle.
        match self.phase {
            PowerPhase::Ready => {
                let class = match edge {
                    Some(edge) => self.classify_edge(edge, sink),
                    None => None,
                };
                // A release on the threshold poll is classified by the edge.
                let class = class.or_else(|| self.timer.evaluate(now));
                if let Some(PressClass::LongPressReached { held_ms }) = class {
                    sink.emit(&PanelEvent::LongPressReached { held_ms });
                    self.begin_sequence(ctx, sink);
                }
            }
            PowerPhase::RunningSequence { .. } => {
                if let Some(EdgeEvent::PressConfirmed { .. }) = edge {
                    debug!("power: press during {} ignored", ctx.lifecycle);
                }
                self.advance_sequence(ctx, sink);
            }
            PowerPhase::WaitingForRelease => {}
        }

        if self.phase == PowerPhase::WaitingForRelease && ctx.input == InputLevel::Released {
            debug!("power: button released, accepting presses again");
            self.phase = PowerPhase::Ready;
        }

        // 3. Indicator.
        ctx.indicator = self.indicator_level(ctx);
    }

    /// Feed a confirmed edge to the timer.  Short presses are reported and
    /// dropped here; a long press is handed back to the caller.
    fn classify_edge(&mut self, edge: EdgeEvent, sink: &mut impl EventSink) -> Option<PressClass> {
        if let EdgeEvent::PressConfirmed { at_ms } = edge {
            sink.emit(&PanelEvent::PressConfirmed { at_ms });
        }
        match self.timer.on_edge(edge)? {
            PressClass::ShortPress { held_ms } => {
                sink.emit(&PanelEvent::ShortPressIgnored {
                    held_ms,
                    required_ms: self.timer.threshold_ms(),
                });
                None
            }
            long @ PressClass::LongPressReached { .. } => Some(long),
        }
    }

    fn begin_sequence(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        let kind = match ctx.lifecycle {
            LifecycleState::Off => SequenceKind::Boot,
            LifecycleState::On => SequenceKind::Shutdown,
            LifecycleState::Booting | LifecycleState::ShuttingDown => {
                // Ready is never entered while a sequence runs.
                warn!("power: long press ignored while {}", ctx.lifecycle);
                return;
            }
        };

        if kind == SequenceKind::Boot {
            ctx.boot_cycles = ctx.boot_cycles.saturating_add(1);
        }

        let from = ctx.lifecycle;
        ctx.lifecycle = kind.transient_state();
        sink.emit(&PanelEvent::LifecycleChanged {
            from,
            to: ctx.lifecycle,
        });

        self.phase = PowerPhase::RunningSequence {
            kind,
            blink: BlinkScheduler::new(kind.pattern(), ctx.now_ms),
            announced: 0,
        };
        self.advance_sequence(ctx, sink);
    }

    fn advance_sequence(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        let PowerPhase::RunningSequence {
            kind,
            blink,
            mut announced,
        } = self.phase
        else {
            return;
        };

        // Announce every step that has begun, even if ticks were late.
        let current = blink.cycle(ctx.now_ms);
        while announced < SEQUENCE_STEPS && u64::from(announced) <= current {
            let percent = kind.percent(announced);
            sink.emit(&match kind {
                SequenceKind::Boot => PanelEvent::BootProgress {
                    boot_cycle: ctx.boot_cycles,
                    percent,
                },
                SequenceKind::Shutdown => PanelEvent::ShutdownProgress { percent },
            });
            announced += 1;
        }

        if !blink.is_finished(ctx.now_ms) {
            self.phase = PowerPhase::RunningSequence {
                kind,
                blink,
                announced,
            };
            return;
        }

        let from = ctx.lifecycle;
        ctx.lifecycle = kind.settled_state();
        sink.emit(&PanelEvent::LifecycleChanged {
            from,
            to: ctx.lifecycle,
        });

        self.phase = PowerPhase::WaitingForRelease;
        if ctx.input == InputLevel::Asserted {
            sink.emit(&PanelEvent::AwaitingRelease);
        }
    }

    fn indicator_level(&self, ctx: &PanelContext) -> bool {
        if let PowerPhase::RunningSequence { blink, .. } = self.phase {
            return blink.level(ctx.now_ms);
        }

        match ctx.lifecycle {
            LifecycleState::On => true,
            LifecycleState::Off => match self.timer.session() {
                Some(session) if session.active => {
                    BlinkScheduler::new(BlinkPattern::HOLD_FEEDBACK, session.start_ms)
                        .level(ctx.now_ms)
                }
                _ => false,
            },
            // Sequences own the indicator; this arm is only reached
            // between phases within a single tick.
            LifecycleState::Booting | LifecycleState::ShuttingDown => false,
        }
    }
}
