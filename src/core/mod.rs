// RazerBattery - core/mod.rs
//
// Core logic layer: log location, status extraction, presentation helpers.
// Must NOT depend on: app.

pub mod export;
pub mod extractor;
pub mod locator;
pub mod model;
pub mod summary;
