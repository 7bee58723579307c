//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements     | Connects to                  |
//! |-------------|----------------|------------------------------|
//! | `hardware`  | InputPort      | Button GPIO (pull-up)        |
//! |             | IndicatorPort  | Indicator GPIO               |
//! | `log_sink`  | EventSink      | Serial log output            |
//! | `time`      | TimePort       | ESP32 system timer, FreeRTOS |

pub mod hardware;
pub mod log_sink;
pub mod time;
