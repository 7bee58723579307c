//! GPIO pin assignments for the training panels.
//!
//! Single source of truth: the config presets reference this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Front-panel board (power, mode selector, emergency toggle)
// ---------------------------------------------------------------------------

/// Front-panel push-button.  Internal pull-up, pressed shorts to GND.
pub const PANEL_BUTTON_GPIO: i32 = 33;
/// Front-panel status / power LED (active HIGH).
pub const PANEL_LED_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// Dev-kit on-board parts (hold alarm, scripted indicator patterns)
// ---------------------------------------------------------------------------

/// BOOT strapping button on the dev-kit (active LOW).
pub const BOOT_BUTTON_GPIO: i32 = 0;
/// On-board blue LED.
pub const ONBOARD_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Chip limits (ESP32)
// ---------------------------------------------------------------------------

/// Highest GPIO number on the chip.
pub const MAX_GPIO: i32 = 39;
/// Pads with no output driver.
pub const INPUT_ONLY_GPIOS: core::ops::RangeInclusive<i32> = 34..=39;
/// Pads wired to the SPI flash on the dev-kit modules.
pub const FLASH_GPIOS: core::ops::RangeInclusive<i32> = 6..=11;
