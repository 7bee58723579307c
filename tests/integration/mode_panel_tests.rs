//! Integration tests for the mode selector panel.

use crate::mock_hw::Bench;

use panelctl::app::events::PanelEvent;
use panelctl::app::ports::IndicatorPort;
use panelctl::config::PanelBehavior;
use panelctl::fsm::cycle::ModeState;

fn mode_changes(bench: &Bench) -> Vec<(ModeState, ModeState)> {
    bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::ModeChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

/// Off→on edges written while idling for `ms`.
fn rising_edges_while_idle(bench: &mut Bench, ms: u64) -> usize {
    let from = bench.hw.writes.len().saturating_sub(1);
    bench.idle(ms);
    bench.hw.writes[from..]
        .windows(2)
        .filter(|w| !w[0] && w[1])
        .count()
}

#[test]
fn starts_in_manual() {
    let bench = Bench::new(PanelBehavior::Mode);
    assert_eq!(bench.panel.mode(), ModeState::Manual);
    assert_eq!(bench.sink.events, vec![PanelEvent::Started(PanelBehavior::Mode)]);
}

#[test]
fn three_presses_cycle_back_to_manual() {
    let mut bench = Bench::new(PanelBehavior::Mode);
    bench.press(100);
    assert_eq!(bench.panel.mode(), ModeState::Auto);
    bench.press(100);
    assert_eq!(bench.panel.mode(), ModeState::Maintenance);
    bench.press(100);
    assert_eq!(bench.panel.mode(), ModeState::Manual);

    assert_eq!(
        mode_changes(&bench),
        vec![
            (ModeState::Manual, ModeState::Auto),
            (ModeState::Auto, ModeState::Maintenance),
            (ModeState::Maintenance, ModeState::Manual),
        ]
    );
}

#[test]
fn holding_does_not_repeat() {
    let mut bench = Bench::new(PanelBehavior::Mode);
    bench.hold(5000);
    bench.idle(500);
    assert_eq!(mode_changes(&bench).len(), 1);
    assert_eq!(bench.panel.mode(), ModeState::Auto);
}

#[test]
fn bounce_shorter_than_debounce_is_ignored() {
    let mut bench = Bench::new(PanelBehavior::Mode);
    // One asserted sample, released on the next poll.
    bench.hold(20);
    bench.idle(500);
    assert!(mode_changes(&bench).is_empty());
    assert_eq!(bench.panel.mode(), ModeState::Manual);
}

#[test]
fn press_plays_acknowledge_pulse() {
    let mut bench = Bench::new(PanelBehavior::Mode);
    // Let the manual cadence go dark first.
    bench.idle(1050);
    assert!(!bench.hw.indicator());

    // Edge at 1050, confirmed at 1100: the pulse lights immediately.
    bench.hold(100);
    assert!(bench.hw.indicator());
    bench.idle(100);
    assert!(!bench.hw.indicator());
}

#[test]
fn faster_modes_blink_faster() {
    let mut bench = Bench::new(PanelBehavior::Mode);
    let manual = rising_edges_while_idle(&mut bench, 4000);

    bench.press(100);
    let auto = rising_edges_while_idle(&mut bench, 4000);

    bench.press(100);
    let maintenance = rising_edges_while_idle(&mut bench, 4000);

    assert!(manual < auto, "manual {manual} auto {auto}");
    assert!(auto < maintenance, "auto {auto} maintenance {maintenance}");
    assert!(maintenance >= 9);
}
