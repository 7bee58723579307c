//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives a started `ControlPanel`
//! for one behaviour against mock adapters.  All tests run on the host
//! (x86_64) with no real hardware required.

mod alarm_panel_tests;
mod mock_hw;
mod mode_panel_tests;
mod power_panel_tests;
mod scripted_panel_tests;
