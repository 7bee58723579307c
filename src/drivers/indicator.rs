//! Single-channel indicator output (panel LED, tower lamp, siren driver).
//!
//! ## Dual-target design
//!
//! Generic over an `embedded-hal` output pin.  On ESP-IDF this is the
//! [`PanelGpio`](super::hw_init::PanelGpio) handle from `hw_init`; on
//! host/test any mock pin works.  The last
//! commanded level is tracked in-memory so redundant writes are skipped.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::IndicatorPort;

pub struct OutputDriver<P> {
    pin: P,
    current: Option<bool>,
    write_errors: u32,
}

impl<P: OutputPin> OutputDriver<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            current: None,
            write_errors: 0,
        }
    }

    pub fn set(&mut self, on: bool) {
        if self.current == Some(on) {
            return;
        }
        match self.pin.set_state(PinState::from(on)) {
            Ok(()) => self.current = Some(on),
            Err(e) => {
                self.write_errors = self.write_errors.saturating_add(1);
                warn!("indicator write failed ({:?})", e);
            }
        }
    }

    pub fn is_on(&self) -> bool {
        self.current.unwrap_or(false)
    }

    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }
}

impl<P: OutputPin> IndicatorPort for OutputDriver<P> {
    fn set_indicator(&mut self, on: bool) {
        self.set(on);
    }

    fn indicator(&self) -> bool {
        self.is_on()
    }
}
