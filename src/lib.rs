//! TrackCar firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod gps;
pub mod scheduler;

mod pins;

// Hardware-facing layers stay public so the binary and the integration
// tests reach them; the real implementations are cfg-guarded inside.
pub mod adapters;
pub mod drivers;
