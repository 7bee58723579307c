//! Panel drivers: button sampling and timing, blink scheduling, indicator
//! output, and one-shot pin initialisation.

pub mod blink;
pub mod button;
pub mod hw_init;
pub mod indicator;
pub mod input;
pub mod led_patterns;
