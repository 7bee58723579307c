//! Scripted indicator patterns.
//!
//! A script is a list of [`Burst`]s, each one a finite or endless
//! [`BlinkPattern`] plus how it is announced.  Scripts need no input; the
//! player in [`crate::fsm::scripted`] walks the list against the clock and
//! loops back to `loop_from` after the last burst.
//!
//! | Script      | Bursts                                               | Loops |
//! |-------------|------------------------------------------------------|-------|
//! | heartbeat   | 1000/1000 forever                                    | n/a   |
//! | escalating  | 10 × 1000/1000, 10 × 500/500, 200/200 forever        | n/a   |
//! | siren       | 8 rising steps 50..120 ms, 8 falling, 1000 ms pause  | yes   |
//! | alarm-demo  | 5 × 100/100, 1000 pause, 1 × 500/500, 1000 pause     | yes   |

use heapless::Vec;

use super::blink::BlinkPattern;
use crate::config::PanelBehavior;

/// How loudly a burst is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// One stage of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Burst {
    pub pattern: BlinkPattern,
    /// Announced when the burst starts; `None` for silent gaps.
    pub label: Option<&'static str>,
    pub severity: Severity,
    /// Report a milestone every n completed cycles.
    pub milestone_every: Option<u32>,
}

impl Burst {
    pub const fn new(pattern: BlinkPattern, label: &'static str, severity: Severity) -> Self {
        Self {
            pattern,
            label: Some(label),
            severity,
            milestone_every: None,
        }
    }

    /// Unannounced `pattern`.
    pub const fn quiet(pattern: BlinkPattern) -> Self {
        Self {
            pattern,
            label: None,
            severity: Severity::Normal,
            milestone_every: None,
        }
    }

    /// Dark gap of `ms`.
    pub const fn pause(ms: u32) -> Self {
        Self::quiet(BlinkPattern::times(0, ms, 1))
    }

    pub fn with_milestones(mut self, every: u32) -> Self {
        self.milestone_every = Some(every.max(1));
        self
    }
}

/// Upper bound on bursts per script.
pub const MAX_BURSTS: usize = 20;

const SIREN_STEPS: u32 = 8;
const SIREN_BASE_MS: u32 = 50;
const SIREN_STEP_MS: u32 = 10;
const SIREN_BLINKS_PER_STEP: u32 = 5;
const LOOP_PAUSE_MS: u32 = 1000;

pub struct PatternScript {
    name: &'static str,
    bursts: Vec<Burst, MAX_BURSTS>,
    loop_from: usize,
    report_loops: bool,
}

impl PatternScript {
    /// Build a script.  Bursts beyond [`MAX_BURSTS`] are dropped.
    pub fn new<I>(name: &'static str, bursts: I, loop_from: usize, report_loops: bool) -> Self
    where
        I: IntoIterator<Item = Burst>,
    {
        let bursts: Vec<Burst, MAX_BURSTS> = bursts.into_iter().take(MAX_BURSTS).collect();
        let loop_from = loop_from.min(bursts.len().saturating_sub(1));
        Self {
            name,
            bursts,
            loop_from,
            report_loops,
        }
    }

    /// Script for an input-free behaviour, `None` for button-driven ones.
    pub fn for_behavior(behavior: PanelBehavior) -> Option<Self> {
        match behavior {
            PanelBehavior::Heartbeat => Some(Self::heartbeat()),
            PanelBehavior::Escalating => Some(Self::escalating()),
            PanelBehavior::Siren => Some(Self::siren()),
            PanelBehavior::AlarmDemo => Some(Self::alarm_demo()),
            PanelBehavior::Power
            | PanelBehavior::Mode
            | PanelBehavior::Alarm
            | PanelBehavior::Hold => None,
        }
    }

    /// Steady "machine running" blink.
    pub fn heartbeat() -> Self {
        Self::new(
            "heartbeat",
            [Burst::new(BlinkPattern::square(1000), "NORMAL", Severity::Normal).with_milestones(10)],
            0,
            false,
        )
    }

    /// Heartbeat that degrades to a warning then a critical alarm.
    pub fn escalating() -> Self {
        Self::new(
            "escalating",
            [
                Burst::new(BlinkPattern::times(1000, 1000, 10), "NORMAL", Severity::Normal),
                Burst::new(BlinkPattern::times(500, 500, 10), "WARNING", Severity::Warning)
                    .with_milestones(5),
                Burst::new(BlinkPattern::square(200), "ALARM", Severity::Critical)
                    .with_milestones(5),
            ],
            2,
            false,
        )
    }

    /// Rising then falling blink rate, one pause, repeat.
    pub fn siren() -> Self {
        let step = |i: u32| {
            let half_ms = SIREN_BASE_MS + i * SIREN_STEP_MS;
            BlinkPattern::times(half_ms, half_ms, SIREN_BLINKS_PER_STEP)
        };

        let rising = (0..SIREN_STEPS).map(move |i| {
            if i == 0 {
                Burst::new(step(i), "SIREN RISING", Severity::Warning)
            } else {
                Burst::quiet(step(i))
            }
        });
        let falling = (0..SIREN_STEPS).rev().map(move |i| {
            if i == SIREN_STEPS - 1 {
                Burst::new(step(i), "SIREN FALLING", Severity::Warning)
            } else {
                Burst::quiet(step(i))
            }
        });

        Self::new(
            "siren",
            rising
                .chain(falling)
                .chain(core::iter::once(Burst::pause(LOOP_PAUSE_MS))),
            0,
            true,
        )
    }

    /// Critical burst, pause, single warning blink, pause.
    pub fn alarm_demo() -> Self {
        Self::new(
            "alarm-demo",
            [
                Burst::new(BlinkPattern::times(100, 100, 5), "CRITICAL", Severity::Critical),
                Burst::pause(LOOP_PAUSE_MS),
                Burst::new(BlinkPattern::times(500, 500, 1), "WARNING", Severity::Warning),
                Burst::pause(LOOP_PAUSE_MS),
            ],
            0,
            true,
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    /// Burst to resume from after the last one ends.
    pub fn loop_from(&self) -> usize {
        self.loop_from
    }

    /// Whether each completed pass is reported as a milestone.
    pub fn reports_loops(&self) -> bool {
        self.report_loops
    }

    /// Length of one pass from `loop_from`, `None` if any burst is endless.
    pub fn loop_ms(&self) -> Option<u64> {
        self.bursts[self.loop_from.min(self.bursts.len())..]
            .iter()
            .map(|b| b.pattern.total_ms())
            .sum()
    }
}
