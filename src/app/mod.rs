// RazerBattery - app/mod.rs
//
// Application layer: the composed status check and the background monitor.
// Dependencies: core layer.

pub mod monitor;
pub mod status;
