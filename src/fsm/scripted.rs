//! Player for input-free indicator scripts.
//!
//! Walks a [`PatternScript`] against the clock.  Burst boundaries are
//! computed from when the previous burst *should* have ended, not from when
//! the tick that noticed it ran, so a late tick never stretches the script.

use log::debug;

use crate::app::events::PanelEvent;
use crate::app::ports::EventSink;
use crate::drivers::blink::{BlinkPattern, BlinkScheduler};
use crate::drivers::led_patterns::PatternScript;

use super::context::PanelContext;

pub struct ScriptPlayer {
    script: PatternScript,
    index: usize,
    blink: BlinkScheduler,
    /// Cycles of the current burst already reported as a milestone.
    reported_cycles: u64,
    /// Completed passes through the script.
    loops: u64,
}

impl ScriptPlayer {
    pub fn new(script: PatternScript) -> Self {
        Self {
            script,
            index: 0,
            blink: BlinkScheduler::new(BlinkPattern::OFF, 0),
            reported_cycles: 0,
            loops: 0,
        }
    }

    pub fn script(&self) -> &PatternScript {
        &self.script
    }

    /// Index of the burst playing now.
    pub fn burst_index(&self) -> usize {
        self.index
    }

    pub fn loops(&self) -> u64 {
        self.loops
    }

    /// Begin at the first burst.
    pub fn start(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        self.loops = 0;
        self.enter(0, ctx.now_ms, sink);
        ctx.indicator = self.blink.level(ctx.now_ms);
    }

    pub fn poll(&mut self, ctx: &mut PanelContext, sink: &mut impl EventSink) {
        let now = ctx.now_ms;

        // Bounded so a script of zero-length bursts cannot spin.
        for _ in 0..=self.script.bursts().len() {
            let Some(ends_at) = self.blink.ends_at_ms() else {
                break;
            };
            if now < ends_at {
                break;
            }

            let next = self.index + 1;
            let next = if next < self.script.bursts().len() {
                next
            } else {
                self.loops += 1;
                debug!("script {}: pass {} complete", self.script.name(), self.loops);
                if self.script.reports_loops() {
                    sink.emit(&PanelEvent::PatternMilestone {
                        label: self.script.name(),
                        cycles: self.loops,
                    });
                }
                self.script.loop_from()
            };
            self.enter(next, ends_at, sink);
        }

        self.report_milestone(now, sink);
        ctx.indicator = self.blink.level(now);
    }

    fn enter(&mut self, index: usize, at_ms: u64, sink: &mut impl EventSink) {
        self.index = index;
        self.reported_cycles = 0;

        let Some(burst) = self.script.bursts().get(index).copied() else {
            self.blink = BlinkScheduler::new(BlinkPattern::OFF, at_ms);
            return;
        };

        self.blink = BlinkScheduler::new(burst.pattern, at_ms);
        if let Some(label) = burst.label {
            sink.emit(&PanelEvent::PatternStage {
                label,
                severity: burst.severity,
            });
        }
    }

    fn report_milestone(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        let Some(every) = self
            .script
            .bursts()
            .get(self.index)
            .and_then(|b| b.milestone_every)
        else {
            return;
        };

        let cycles = self.blink.cycle(now_ms);
        if cycles > self.reported_cycles && cycles % u64::from(every) == 0 {
            self.reported_cycles = cycles;
            sink.emit(&PanelEvent::PatternMilestone {
                label: self.script.name(),
                cycles,
            });
        }
    }
}
