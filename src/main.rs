//! Panel firmware: main entry point.
//!
//! Hexagonal layout with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PanelHardware          LogEventSink       Esp32TimeAdapter    │
//! │  (Input + Indicator)    (EventSink)        (TimePort)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ControlPanel (pure logic)                 │    │
//! │  │  Power · Mode · Alarm · Hold · Scripted patterns       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The behaviour is chosen at build time:
//!
//! ```text
//! PANEL_BEHAVIOR=mode cargo build --features espidf
//! PANEL_CONFIG_JSON='{"behavior":"power",...}' cargo build --features espidf
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use panelctl::adapters::hardware::PanelHardware;
use panelctl::adapters::log_sink::LogEventSink;
use panelctl::adapters::time::Esp32TimeAdapter;
use panelctl::app::ports::TimePort;
use panelctl::app::service::ControlPanel;
use panelctl::config::PanelConfig;
use panelctl::drivers::hw_init;
use panelctl::error::Error;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  panelctl v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Build-time configuration ───────────────────────────
    let config = PanelConfig::resolve(option_env!("PANEL_BEHAVIOR"), option_env!("PANEL_CONFIG_JSON"))
        .map_err(Error::from)?;
    info!(
        "Config: behavior={} poll={}ms debounce={}ms long_press={}ms",
        config.behavior, config.poll_period_ms, config.debounce_ms, config.long_press_ms
    );

    // ── 3. Pins and adapters ──────────────────────────────────
    let (button, indicator) = hw_init::init_panel_pins(&config).map_err(Error::from)?;
    let mut hw = PanelHardware::new(button, indicator);
    let clock = Esp32TimeAdapter::new();
    let mut log_sink = LogEventSink::new();

    // ── 4. Control panel ──────────────────────────────────────
    let poll_period_ms = config.poll_period_ms;
    let mut panel = ControlPanel::new(config).map_err(Error::from)?;
    panel.start(&mut hw, clock.now_ms(), &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop (never exits) ─────────────────────────
    loop {
        panel.tick_with_clock(&mut hw, &clock, &mut log_sink);
        clock.sleep_ms(poll_period_ms);
    }
}
