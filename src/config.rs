//! System configuration parameters
//!
//! All tunable parameters for the TrackCar firmware. There is no persistent
//! configuration store — the host protocol fixes these at compile time and
//! the struct exists so the loop body and tests receive explicit values
//! instead of reading ambient constants.

/// Core system configuration
#[derive(Debug, Clone)]
pub struct SystemConfig {
    // --- Telemetry intervals ---
    /// Periodic GPS report interval (milliseconds)
    pub gps_report_interval_ms: u32,
    /// Heartbeat report interval (milliseconds)
    pub heartbeat_interval_ms: u32,

    // --- Fix validity ---
    /// Minimum satellites in use for a sample to count as a fix
    pub min_satellites: i32,
    /// Maximum age of the last decoded position (milliseconds)
    pub max_fix_age_ms: u32,

    // --- Restart / supervision ---
    /// Delay between the RESET acknowledgement and the reboot (milliseconds)
    pub restart_delay_ms: u32,
    /// Task watchdog timeout (milliseconds). Must exceed the restart delay
    /// so the ordered reboot path wins over the watchdog panic.
    pub watchdog_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            gps_report_interval_ms: 5_000,
            heartbeat_interval_ms: 30_000,

            min_satellites: 4,
            max_fix_age_ms: 10_000,

            restart_delay_ms: 1_000,
            watchdog_timeout_ms: 10_000,
        }
    }
}
