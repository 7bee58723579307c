//! Integration tests for the input-free indicator scripts.

use crate::mock_hw::Bench;

use panelctl::app::events::{PanelEvent, Severity};
use panelctl::config::PanelBehavior;

fn stages(bench: &Bench) -> Vec<&'static str> {
    bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::PatternStage { label, .. } => Some(*label),
            _ => None,
        })
        .collect()
}

#[test]
fn scripts_never_read_the_button() {
    for behavior in [
        PanelBehavior::Heartbeat,
        PanelBehavior::Escalating,
        PanelBehavior::Siren,
        PanelBehavior::AlarmDemo,
    ] {
        let mut bench = Bench::new(behavior);
        bench.hold(3000);
        assert_eq!(bench.hw.samples, 0, "{behavior}");
        assert_eq!(
            bench.sink.count(|e| matches!(e, PanelEvent::PressConfirmed { .. })),
            0
        );
    }
}

#[test]
fn heartbeat_reports_every_ten_cycles() {
    let mut bench = Bench::new(PanelBehavior::Heartbeat);
    bench.idle(40_050);

    assert_eq!(
        &bench.sink.events[..2],
        &[
            PanelEvent::Started(PanelBehavior::Heartbeat),
            PanelEvent::PatternStage {
                label: "NORMAL",
                severity: Severity::Normal
            },
        ]
    );
    let milestones: Vec<u64> = bench
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            PanelEvent::PatternMilestone { cycles, .. } => Some(*cycles),
            _ => None,
        })
        .collect();
    assert_eq!(milestones, vec![10, 20]);
}

#[test]
fn escalating_settles_in_alarm() {
    let mut bench = Bench::new(PanelBehavior::Escalating);
    // 20 s normal, 10 s warning, then the endless alarm.
    bench.idle(60_000);

    assert_eq!(stages(&bench), vec!["NORMAL", "WARNING", "ALARM"]);
    assert!(bench.sink.events.contains(&PanelEvent::PatternStage {
        label: "ALARM",
        severity: Severity::Critical
    }));
    assert!(bench.sink.events.contains(&PanelEvent::PatternMilestone {
        label: "escalating",
        cycles: 5
    }));
}

#[test]
fn alarm_demo_loops() {
    let mut bench = Bench::new(PanelBehavior::AlarmDemo);
    // One pass is 1 s burst, 1 s pause, 1 s blink, 1 s pause.
    bench.idle(8_050);

    assert_eq!(
        stages(&bench),
        vec!["CRITICAL", "WARNING", "CRITICAL", "WARNING", "CRITICAL"]
    );
    assert!(bench.sink.events.contains(&PanelEvent::PatternMilestone {
        label: "alarm-demo",
        cycles: 2
    }));
}

#[test]
fn siren_rises_falls_and_repeats() {
    let mut bench = Bench::new(PanelBehavior::Siren);
    assert_eq!(bench.panel.config().poll_period_ms, 10);

    // 6.8 s rising, 6.8 s falling, 1 s pause.
    bench.idle(14_610);

    assert_eq!(
        stages(&bench),
        vec!["SIREN RISING", "SIREN FALLING", "SIREN RISING"]
    );
    assert!(bench.sink.events.contains(&PanelEvent::PatternMilestone {
        label: "siren",
        cycles: 1
    }));
}
