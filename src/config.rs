//! Panel configuration parameters
//!
//! All tunable parameters for the control panel.  Values come from the
//! per-behaviour presets below and can be replaced wholesale at build time
//! with a JSON document (see `main.rs`).  Nothing is persisted.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pins;

/// Which panel behaviour the firmware runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelBehavior {
    /// Long-press power lifecycle (OFF / BOOTING / ON / SHUTTING DOWN).
    Power,
    /// Each press advances MANUAL → AUTO → MAINTENANCE.
    Mode,
    /// Each press toggles the emergency alarm.
    Alarm,
    /// Alarm follows the button: active while held.
    Hold,
    /// Steady 1 s heartbeat, no input.
    Heartbeat,
    /// Heartbeat that escalates NORMAL → WARNING → ALARM.
    Escalating,
    /// Rising/falling siren, no input.
    Siren,
    /// Fast critical burst followed by a slow warning blink, no input.
    AlarmDemo,
}

impl PanelBehavior {
    pub const ALL: [Self; 8] = [
        Self::Power,
        Self::Mode,
        Self::Alarm,
        Self::Hold,
        Self::Heartbeat,
        Self::Escalating,
        Self::Siren,
        Self::AlarmDemo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Mode => "mode",
            Self::Alarm => "alarm",
            Self::Hold => "hold",
            Self::Heartbeat => "heartbeat",
            Self::Escalating => "escalating",
            Self::Siren => "siren",
            Self::AlarmDemo => "alarm-demo",
        }
    }

    /// Whether the behaviour reads the button at all.
    pub fn uses_input(self) -> bool {
        matches!(self, Self::Power | Self::Mode | Self::Alarm | Self::Hold)
    }
}

impl fmt::Display for PanelBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PanelBehavior {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ConfigError::UnknownBehavior)
    }
}

/// Core panel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Behaviour driven by the button.
    pub behavior: PanelBehavior,

    // --- Pins ---
    /// Push-button input (internal pull-up, pressed = LOW)
    pub button_gpio: i32,
    /// Indicator output (HIGH = energised)
    pub indicator_gpio: i32,

    // --- Timing ---
    /// Control loop period (milliseconds)
    pub poll_period_ms: u32,
    /// Settle delay before a press is confirmed (milliseconds)
    pub debounce_ms: u32,
    /// Hold time that counts as a long press (milliseconds)
    pub long_press_ms: u32,
}

/// Default control loop period.
pub const POLL_PERIOD_MS: u32 = 50;
/// Control loop period for the siren pattern.
pub const SIREN_POLL_PERIOD_MS: u32 = 10;
/// Default press settle delay.
pub const DEBOUNCE_MS: u32 = 50;
/// Long-press threshold for the power lifecycle.
pub const LONG_PRESS_MS: u32 = 3000;

impl PanelConfig {
    /// Preset for a behaviour: pins and timing used by that demo board.
    pub fn for_behavior(behavior: PanelBehavior) -> Self {
        let (button_gpio, indicator_gpio) = match behavior {
            PanelBehavior::Power | PanelBehavior::Mode | PanelBehavior::Alarm => {
                (pins::PANEL_BUTTON_GPIO, pins::PANEL_LED_GPIO)
            }
            PanelBehavior::Hold
            | PanelBehavior::Heartbeat
            | PanelBehavior::Escalating
            | PanelBehavior::Siren
            | PanelBehavior::AlarmDemo => (pins::BOOT_BUTTON_GPIO, pins::ONBOARD_LED_GPIO),
        };

        // Siren half-periods step by 10 ms; poll fast enough to render them.
        let poll_period_ms = match behavior {
            PanelBehavior::Siren => SIREN_POLL_PERIOD_MS,
            _ => POLL_PERIOD_MS,
        };

        Self {
            behavior,
            button_gpio,
            indicator_gpio,
            poll_period_ms,
            debounce_ms: DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
        }
    }

    /// Parse a full configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Pick the configuration baked in at build time.
    ///
    /// A full JSON document wins over a behaviour name; with neither the
    /// power panel preset is used.
    pub fn resolve(behavior: Option<&str>, json: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(json) = json.filter(|j| !j.trim().is_empty()) {
            return Self::from_json(json);
        }
        let config = match behavior {
            Some(name) => Self::for_behavior(name.parse()?),
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the timing relationships the panel relies on.
    ///
    /// Debounce and long-press are measured in whole polls, so both must be
    /// an integer multiple of the poll period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_period_ms == 0 {
            return Err(ConfigError::ZeroPollPeriod);
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.debounce_ms % self.poll_period_ms != 0 {
            return Err(ConfigError::DebounceNotPollMultiple {
                debounce_ms: self.debounce_ms,
                poll_period_ms: self.poll_period_ms,
            });
        }
        if self.long_press_ms % self.poll_period_ms != 0 {
            return Err(ConfigError::LongPressNotPollMultiple {
                long_press_ms: self.long_press_ms,
                poll_period_ms: self.poll_period_ms,
            });
        }
        if self.long_press_ms <= self.debounce_ms {
            return Err(ConfigError::LongPressTooShort);
        }
        Ok(())
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::for_behavior(PanelBehavior::Power)
    }
}

// ── Errors ────────────────────────────────────────────────────

/// Errors from parsing or validating a [`PanelConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Poll period of zero would spin the control loop.
    ZeroPollPeriod,
    /// A zero settle delay disables bounce rejection.
    ZeroDebounce,
    DebounceNotPollMultiple { debounce_ms: u32, poll_period_ms: u32 },
    LongPressNotPollMultiple { long_press_ms: u32, poll_period_ms: u32 },
    /// Long-press threshold must exceed the debounce window.
    LongPressTooShort,
    /// Behaviour name not recognised.
    UnknownBehavior,
    /// JSON did not deserialize into a config.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPollPeriod => write!(f, "poll period must be non-zero"),
            Self::ZeroDebounce => write!(f, "debounce must be non-zero"),
            Self::DebounceNotPollMultiple {
                debounce_ms,
                poll_period_ms,
            } => write!(
                f,
                "debounce {}ms is not a multiple of the {}ms poll period",
                debounce_ms, poll_period_ms
            ),
            Self::LongPressNotPollMultiple {
                long_press_ms,
                poll_period_ms,
            } => write!(
                f,
                "long press {}ms is not a multiple of the {}ms poll period",
                long_press_ms, poll_period_ms
            ),
            Self::LongPressTooShort => write!(f, "long press must be longer than debounce"),
            Self::UnknownBehavior => write!(f, "unknown panel behaviour"),
            Self::Malformed => write!(f, "malformed config JSON"),
        }
    }
}

impl core::error::Error for ConfigError {}
