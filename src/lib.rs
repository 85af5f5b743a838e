// RazerBattery - lib.rs
//
// Library entry point, exposing the status read path and its helpers for
// integration testing and for front ends other than the bundled CLI.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::app::status::{check_status, get_battery_statuses};
pub use crate::core::model::BatteryStatus;
pub use crate::util::error::StatusError;
