//! Integration tests for the long-press power panel.
//!
//! Drive a started `ControlPanel` through the mock hardware at the
//! configured 50 ms poll period and assert on lifecycle, indicator and the
//! emitted event stream.

use crate::mock_hw::Bench;

use panelctl::app::events::PanelEvent;
use panelctl::app::ports::IndicatorPort;
use panelctl::config::{PanelBehavior, PanelConfig};
use panelctl::fsm::power::LifecycleState;

fn power_bench() -> Bench {
    Bench::new(PanelBehavior::Power)
}

/// Hold past the threshold, release, and let the sequence finish.
fn long_press(bench: &mut Bench) {
    bench.hold(3100);
    bench.idle(2500);
}

fn lifecycle_changes(bench: &Bench) -> Vec<(LifecycleState, LifecycleState)> {
    bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::LifecycleChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn held_3100ms_from_off_boots_with_full_event_trace() {
    let mut bench = power_bench();
    bench.hold(3100);
    bench.idle(2500);

    assert_eq!(bench.panel.lifecycle(), LifecycleState::On);
    assert_eq!(
        bench.sink.events,
        vec![
            PanelEvent::Started(PanelBehavior::Power),
            PanelEvent::PressConfirmed { at_ms: 0 },
            PanelEvent::LongPressReached { held_ms: 3000 },
            PanelEvent::LifecycleChanged {
                from: LifecycleState::Off,
                to: LifecycleState::Booting
            },
            PanelEvent::BootProgress { boot_cycle: 1, percent: 0 },
            PanelEvent::BootProgress { boot_cycle: 1, percent: 25 },
            PanelEvent::BootProgress { boot_cycle: 1, percent: 50 },
            PanelEvent::BootProgress { boot_cycle: 1, percent: 75 },
            PanelEvent::BootProgress { boot_cycle: 1, percent: 100 },
            PanelEvent::LifecycleChanged {
                from: LifecycleState::Booting,
                to: LifecycleState::On
            },
        ]
    );
}

#[test]
fn indicator_is_solid_once_on() {
    let mut bench = power_bench();
    long_press(&mut bench);
    assert!(bench.hw.indicator());
    let writes_before = bench.hw.writes.len();
    bench.idle(5000);
    // Every tick re-asserts the same level; none of them go dark.
    assert!(bench.hw.writes[writes_before..].iter().all(|&on| on));
}

#[test]
fn boot_pulses_drive_the_indicator() {
    let mut bench = power_bench();
    bench.hold(3100);
    bench.idle(2500);
    // Hold feedback blinks 250/250 during the 3 s hold, then five boot
    // pulses, then solid on.
    assert!(bench.hw.rising_edges() >= 5 + 5);
}

// ── Short press rejection ─────────────────────────────────────

#[test]
fn short_press_is_logged_and_ignored() {
    let mut bench = power_bench();
    bench.press(1000);

    assert_eq!(bench.panel.lifecycle(), LifecycleState::Off);
    assert!(bench.sink.events.contains(&PanelEvent::ShortPressIgnored {
        held_ms: 1000,
        required_ms: 3000
    }));
    assert!(lifecycle_changes(&bench).is_empty());
    assert!(!bench.hw.indicator());
}

#[test]
fn press_just_under_threshold_is_short() {
    let mut bench = power_bench();
    // Edge at 0, release seen at 2950.
    bench.press(2950);
    assert_eq!(bench.panel.lifecycle(), LifecycleState::Off);
    assert_eq!(
        bench.sink.count(|e| matches!(e, PanelEvent::LongPressReached { .. })),
        0
    );
}

#[test]
fn release_seen_on_threshold_poll_still_boots() {
    let mut bench = power_bench();
    // Last asserted sample at 2950, release first seen at 3000.
    bench.hold(3000);
    bench.idle(2500);

    assert_eq!(bench.panel.lifecycle(), LifecycleState::On);
    assert!(bench.sink.events.contains(&PanelEvent::LongPressReached { held_ms: 3000 }));
    assert_eq!(
        bench.sink.count(|e| matches!(e, PanelEvent::ShortPressIgnored { .. })),
        0
    );
    assert_eq!(lifecycle_changes(&bench).len(), 2);
}

// ── Shutdown ──────────────────────────────────────────────────

#[test]
fn second_long_press_shuts_down() {
    let mut bench = power_bench();
    long_press(&mut bench);
    long_press(&mut bench);

    assert_eq!(bench.panel.lifecycle(), LifecycleState::Off);
    assert!(!bench.hw.indicator());
    assert_eq!(
        lifecycle_changes(&bench),
        vec![
            (LifecycleState::Off, LifecycleState::Booting),
            (LifecycleState::Booting, LifecycleState::On),
            (LifecycleState::On, LifecycleState::ShuttingDown),
            (LifecycleState::ShuttingDown, LifecycleState::Off),
        ]
    );

    let shutdown: Vec<u8> = bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::ShutdownProgress { percent } => Some(*percent),
            _ => None,
        })
        .collect();
    assert_eq!(shutdown, vec![100, 75, 50, 25, 0]);
}

#[test]
fn boot_cycles_count_every_boot() {
    let mut bench = power_bench();
    for _ in 0..4 {
        long_press(&mut bench);
    }
    assert_eq!(bench.panel.lifecycle(), LifecycleState::Off);
    assert_eq!(bench.panel.boot_cycles(), 2);
    assert!(bench.sink.events.contains(&PanelEvent::BootProgress {
        boot_cycle: 2,
        percent: 100
    }));
}

// ── Re-trigger guard ──────────────────────────────────────────

#[test]
fn holding_through_boot_triggers_exactly_once() {
    let mut bench = power_bench();
    bench.hold(12_000);

    assert_eq!(bench.panel.lifecycle(), LifecycleState::On);
    assert_eq!(lifecycle_changes(&bench).len(), 2);
    assert_eq!(
        bench.sink.count(|e| *e == PanelEvent::AwaitingRelease),
        1
    );

    bench.idle(500);
    assert_eq!(bench.panel.lifecycle(), LifecycleState::On);
    assert_eq!(lifecycle_changes(&bench).len(), 2);

    // A fresh long press after release is honoured.
    long_press(&mut bench);
    assert_eq!(bench.panel.lifecycle(), LifecycleState::Off);
}

#[test]
fn press_during_boot_is_not_counted() {
    let mut bench = power_bench();
    bench.hold(3100);
    // Quick tap while booting.
    bench.idle(200);
    bench.hold(300);
    bench.idle(3000);

    assert_eq!(bench.panel.lifecycle(), LifecycleState::On);
    assert_eq!(
        bench.sink.count(|e| matches!(e, PanelEvent::ShortPressIgnored { .. })),
        0
    );
    assert_eq!(
        bench.sink.count(|e| matches!(e, PanelEvent::PressConfirmed { .. })),
        1
    );
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn shorter_threshold_from_json_config() {
    let json = r#"{
        "behavior": "power",
        "button_gpio": 33,
        "indicator_gpio": 26,
        "poll_period_ms": 50,
        "debounce_ms": 50,
        "long_press_ms": 1000
    }"#;
    let config = PanelConfig::from_json(json).expect("valid JSON config");
    let mut bench = Bench::with_config(config);
    bench.hold(1100);
    bench.idle(2500);
    assert_eq!(bench.panel.lifecycle(), LifecycleState::On);
    assert!(bench.sink.events.contains(&PanelEvent::LongPressReached { held_ms: 1000 }));
}

#[test]
fn every_tick_samples_once() {
    let mut bench = power_bench();
    long_press(&mut bench);
    assert_eq!(bench.hw.samples, bench.panel.tick_count());
    assert_eq!(bench.hw.writes.len() as u64, bench.panel.tick_count() + 1);
}
