//! One-shot GPIO initialization for the panel pins.
//!
//! Configures the button as a pulled-up input and the indicator as a
//! push-pull output using raw ESP-IDF sys calls, then hands out
//! [`PanelGpio`] handles that implement the `embedded-hal` digital traits.
//! Called once from `main()` before the control loop starts.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::info;

use crate::config::PanelConfig;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot pin initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    /// GPIO number does not exist on this chip.
    InvalidPin(i32),
    /// GPIO is input-only and cannot drive the indicator.
    NotOutputCapable(i32),
    /// GPIO is wired to the SPI flash.
    ReservedPin(i32),
    /// Button and indicator configured on the same GPIO.
    PinConflict(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPin(pin)       => write!(f, "GPIO{} does not exist", pin),
            Self::NotOutputCapable(pin) => write!(f, "GPIO{} cannot drive an output", pin),
            Self::ReservedPin(pin)      => write!(f, "GPIO{} is reserved for flash", pin),
            Self::PinConflict(pin)      => write!(f, "GPIO{} used for both button and indicator", pin),
            Self::GpioConfigFailed(rc)  => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

// ── Pin checks ────────────────────────────────────────────────

/// Reject pin assignments the chip cannot honour before touching hardware.
pub fn check_panel_pins(config: &PanelConfig) -> Result<(), HwInitError> {
    let button = config.button_gpio;
    let indicator = config.indicator_gpio;

    for pin in [button, indicator] {
        if !(0..=pins::MAX_GPIO).contains(&pin) {
            return Err(HwInitError::InvalidPin(pin));
        }
        if pins::FLASH_GPIOS.contains(&pin) {
            return Err(HwInitError::ReservedPin(pin));
        }
    }
    if pins::INPUT_ONLY_GPIOS.contains(&indicator) {
        return Err(HwInitError::NotOutputCapable(indicator));
    }
    if button == indicator {
        return Err(HwInitError::PinConflict(button));
    }
    Ok(())
}

/// Configure both panel pins and return their handles `(button, indicator)`.
pub fn init_panel_pins(config: &PanelConfig) -> Result<(PanelGpio, PanelGpio), HwInitError> {
    check_panel_pins(config)?;

    // SAFETY: Called once from main() before the control loop; single-threaded.
    #[cfg(target_os = "espidf")]
    unsafe {
        configure_input(config.button_gpio)?;
        configure_output(config.indicator_gpio)?;
    }

    info!(
        "hw_init: button GPIO{} (pull-up), indicator GPIO{}",
        config.button_gpio, config.indicator_gpio
    );
    Ok((
        PanelGpio::new(config.button_gpio),
        PanelGpio::new(config.indicator_gpio),
    ))
}

#[cfg(target_os = "espidf")]
unsafe fn configure_input(pin: i32) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        ..Default::default()
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn configure_output(pin: i32) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        ..Default::default()
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    // Start dark.
    let ret = unsafe { gpio_set_level(pin, 0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    Ok(())
}

// ── Pin handle ────────────────────────────────────────────────

/// A configured panel GPIO.
///
/// On target it reads and writes the pad directly.  Off target it holds
/// the level in memory: an input idles HIGH (pull-up, button open).
pub struct PanelGpio {
    pin: i32,
    #[cfg(not(target_os = "espidf"))]
    level: bool,
}

impl PanelGpio {
    fn new(pin: i32) -> Self {
        Self {
            pin,
            #[cfg(not(target_os = "espidf"))]
            level: true,
        }
    }

    pub fn gpio(&self) -> i32 {
        self.pin
    }
}

impl ErrorType for PanelGpio {
    type Error = Infallible;
}

impl InputPin for PanelGpio {
    #[cfg(target_os = "espidf")]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        // SAFETY: pin configured as input by init_panel_pins().
        Ok(unsafe { gpio_get_level(self.pin) } != 0)
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for PanelGpio {
    #[cfg(target_os = "espidf")]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        // SAFETY: pin configured as output by init_panel_pins().
        unsafe { gpio_set_level(self.pin, 1) };
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        // SAFETY: pin configured as output by init_panel_pins().
        unsafe { gpio_set_level(self.pin, 0) };
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level = true;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level = false;
        Ok(())
    }
}
