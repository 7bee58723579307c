//! Hardware adapter: bridges the panel pins to the domain port traits.
//!
//! Owns the button sampler and the indicator driver and exposes them
//! through [`InputPort`] and [`IndicatorPort`].  This is the only module
//! in the system that touches the pins.  Generic over the `embedded-hal`
//! pin types, so the same adapter runs on target with
//! [`PanelGpio`](crate::drivers::hw_init::PanelGpio) and on host with mock
//! pins.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{IndicatorPort, InputPort};
use crate::drivers::indicator::OutputDriver;
use crate::drivers::input::{DigitalInputSampler, InputLevel};

/// Concrete adapter that combines both panel pins behind port traits.
pub struct PanelHardware<I, O> {
    button: DigitalInputSampler<I>,
    indicator: OutputDriver<O>,
}

impl<I: InputPin, O: OutputPin> PanelHardware<I, O> {
    pub fn new(button: I, indicator: O) -> Self {
        Self {
            button: DigitalInputSampler::new(button),
            indicator: OutputDriver::new(indicator),
        }
    }

    /// Failed pin reads plus failed pin writes since construction.
    pub fn io_errors(&self) -> u32 {
        self.button
            .read_errors()
            .saturating_add(self.indicator.write_errors())
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<I: InputPin, O: OutputPin> InputPort for PanelHardware<I, O> {
    fn sample(&mut self) -> InputLevel {
        self.button.sample()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<I: InputPin, O: OutputPin> IndicatorPort for PanelHardware<I, O> {
    fn set_indicator(&mut self, on: bool) {
        self.indicator.set(on);
    }

    fn indicator(&self) -> bool {
        self.indicator.is_on()
    }
}
