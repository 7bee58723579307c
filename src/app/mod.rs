//! Application core: pure panel logic, zero I/O.
//!
//! The [`service::ControlPanel`] orchestrates the state machines in
//! [`crate::fsm`].  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
