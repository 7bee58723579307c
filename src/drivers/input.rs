//! Pull-up push-button sampler.
//!
//! Reads the raw electrical level once per control tick and inverts it:
//! the switch shorts the pin to GND, so LOW means pressed.  Works with any
//! `embedded-hal` 1.0 input pin (`PanelGpio` on target, mock pins on
//! host).

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::InputPort;

/// Logical button level after pull-up inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputLevel {
    /// Button held (pin reads LOW).
    Asserted,
    /// Button open (pin pulled HIGH).
    #[default]
    Released,
}

impl InputLevel {
    /// Map a raw electrical level (true = HIGH) to a logical level.
    pub fn from_pull_up(pin_high: bool) -> Self {
        if pin_high {
            Self::Released
        } else {
            Self::Asserted
        }
    }

    pub fn is_asserted(self) -> bool {
        self == Self::Asserted
    }
}

pub struct DigitalInputSampler<P> {
    pin: P,
    read_errors: u32,
}

impl<P: InputPin> DigitalInputSampler<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            read_errors: 0,
        }
    }

    /// Read the pin once.  A failed read counts as `Released` so a flaky
    /// line can never fabricate a press.
    pub fn sample(&mut self) -> InputLevel {
        match self.pin.is_high() {
            Ok(high) => InputLevel::from_pull_up(high),
            Err(e) => {
                self.read_errors = self.read_errors.saturating_add(1);
                warn!("button read failed ({:?}), treating as released", e);
                InputLevel::Released
            }
        }
    }

    /// Number of failed pin reads since construction.
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }
}

impl<P: InputPin> InputPort for DigitalInputSampler<P> {
    fn sample(&mut self) -> InputLevel {
        DigitalInputSampler::sample(self)
    }
}
