//! Integration tests for the toggle and hold alarm panels.

use crate::mock_hw::Bench;

use panelctl::app::events::PanelEvent;
use panelctl::config::PanelBehavior;
use panelctl::fsm::toggle::AlarmState;

fn alarm_changes(bench: &Bench) -> Vec<(bool, u32)> {
    bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::AlarmChanged {
                active,
                activations,
            } => Some((*active, *activations)),
            _ => None,
        })
        .collect()
}

// ── Toggle ────────────────────────────────────────────────────

#[test]
fn toggle_starts_dark() {
    let mut bench = Bench::new(PanelBehavior::Alarm);
    bench.idle(2000);
    assert!(bench.hw.writes.iter().all(|&on| !on));
    assert_eq!(bench.panel.alarm(), AlarmState::default());
}

#[test]
fn press_raises_and_second_press_clears() {
    let mut bench = Bench::new(PanelBehavior::Alarm);

    bench.press(100);
    assert!(bench.panel.alarm().active);
    let before = bench.hw.rising_edges();
    bench.idle(2000);
    // 100/100 cadence polled every 50 ms.
    assert!(bench.hw.rising_edges() - before >= 8);

    bench.press(100);
    assert!(!bench.panel.alarm().active);
    let writes_before = bench.hw.writes.len();
    bench.idle(1000);
    assert!(bench.hw.writes[writes_before..].iter().all(|&on| !on));

    assert_eq!(alarm_changes(&bench), vec![(true, 1), (false, 2)]);
    assert_eq!(bench.panel.alarm().activations, 2);
}

#[test]
fn long_hold_toggles_once() {
    let mut bench = Bench::new(PanelBehavior::Alarm);
    bench.hold(6000);
    bench.idle(200);
    assert_eq!(alarm_changes(&bench), vec![(true, 1)]);
}

// ── Hold ──────────────────────────────────────────────────────

#[test]
fn hold_alarm_follows_the_button() {
    let mut bench = Bench::new(PanelBehavior::Hold);

    bench.hold(1000);
    assert!(bench.panel.alarm().active);

    bench.idle(200);
    assert!(!bench.panel.alarm().active);

    bench.hold(500);
    bench.idle(200);

    assert_eq!(
        alarm_changes(&bench),
        vec![(true, 1), (false, 1), (true, 2), (false, 2)]
    );
}

#[test]
fn hold_alarm_blinks_fast_only_while_held() {
    let mut bench = Bench::new(PanelBehavior::Hold);

    let before = bench.hw.rising_edges();
    bench.idle(2000);
    let idle_edges = bench.hw.rising_edges() - before;

    let before = bench.hw.rising_edges();
    bench.hold(2000);
    let held_edges = bench.hw.rising_edges() - before;

    assert!(idle_edges <= 1, "heartbeat edges {idle_edges}");
    assert!(held_edges >= 8, "alarm edges {held_edges}");
}
