//! Mock hardware adapter for integration tests.
//!
//! Plays back a button level chosen by the test and records every
//! indicator write, so tests can assert on the full output history
//! without touching real GPIO registers.

use std::cell::Cell;

use panelctl::app::events::PanelEvent;
use panelctl::app::ports::{EventSink, IndicatorPort, InputPort, TimePort};
use panelctl::app::service::ControlPanel;
use panelctl::config::{PanelBehavior, PanelConfig};
use panelctl::drivers::input::InputLevel;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub level: InputLevel,
    pub writes: Vec<bool>,
    pub samples: u64,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            level: InputLevel::Released,
            writes: Vec::new(),
            samples: 0,
        }
    }

    /// Number of off→on edges written to the indicator.
    pub fn rising_edges(&self) -> usize {
        self.writes
            .windows(2)
            .filter(|w| !w[0] && w[1])
            .count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn sample(&mut self) -> InputLevel {
        self.samples += 1;
        self.level
    }
}

impl IndicatorPort for MockHardware {
    fn set_indicator(&mut self, on: bool) {
        self.writes.push(on);
    }

    fn indicator(&self) -> bool {
        self.writes.last().copied().unwrap_or(false)
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Manual clock: `sleep_ms` advances time instantly.
pub struct MockClock {
    now: Cell<u64>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }
}

impl TimePort for MockClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u32) {
        self.now.set(self.now.get() + u64::from(ms));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<PanelEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&PanelEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PanelEvent) {
        self.events.push(*event);
    }
}

// ── Bench ─────────────────────────────────────────────────────

/// A started panel on mock hardware, driven at the configured poll period.
pub struct Bench {
    pub panel: ControlPanel,
    pub hw: MockHardware,
    pub sink: RecordingSink,
    pub clock: MockClock,
    poll_ms: u32,
}

#[allow(dead_code)]
impl Bench {
    pub fn new(behavior: PanelBehavior) -> Self {
        Self::with_config(PanelConfig::for_behavior(behavior))
    }

    pub fn with_config(config: PanelConfig) -> Self {
        let poll_ms = config.poll_period_ms;
        let mut panel = ControlPanel::new(config).expect("test config must validate");
        let mut hw = MockHardware::new();
        let mut sink = RecordingSink::new();
        let clock = MockClock::new();
        panel.start(&mut hw, clock.now_ms(), &mut sink);
        Self {
            panel,
            hw,
            sink,
            clock,
            poll_ms,
        }
    }

    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Tick every poll period for `ms` with the button at `level`.
    /// The first tick runs at the current time.
    pub fn run(&mut self, ms: u64, level: InputLevel) {
        self.hw.level = level;
        let end = self.now() + ms;
        while self.now() < end {
            self.panel
                .tick_with_clock(&mut self.hw, &self.clock, &mut self.sink);
            self.clock.sleep_ms(self.poll_ms);
        }
    }

    pub fn hold(&mut self, ms: u64) {
        self.run(ms, InputLevel::Asserted);
    }

    pub fn idle(&mut self, ms: u64) {
        self.run(ms, InputLevel::Released);
    }

    /// Hold then release, with enough idle time for the release to register.
    pub fn press(&mut self, hold_ms: u64) {
        self.hold(hold_ms);
        self.idle(200);
    }
}
