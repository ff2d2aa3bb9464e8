//! Telemetry report scheduler.
//!
//! Two independent fixed-interval timers (periodic GPS report, heartbeat)
//! polled from the main loop. Non-blocking: `poll` only compares
//! timestamps and never builds reports itself.
//!
//! Elapsed time uses `u32::wrapping_sub`, which stays correct across the
//! millisecond-counter overflow because both operands share the same
//! width. A fired timer's timestamp is reset to `now` *before* the caller
//! assembles the report, so a slow report build cannot re-fire the same
//! due window.

use crate::config::SystemConfig;

/// Which reports are due this iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueReports {
    pub gps: bool,
    pub heartbeat: bool,
}

pub struct ReportScheduler {
    gps_interval_ms: u32,
    heartbeat_interval_ms: u32,
    last_gps_send_ms: u32,
    last_heartbeat_ms: u32,
}

impl ReportScheduler {
    /// Both timers start at zero, so the first GPS report fires one full
    /// interval after boot.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            gps_interval_ms: config.gps_report_interval_ms,
            heartbeat_interval_ms: config.heartbeat_interval_ms,
            last_gps_send_ms: 0,
            last_heartbeat_ms: 0,
        }
    }

    /// Check both timers against `now_ms`, resetting any that fire.
    pub fn poll(&mut self, now_ms: u32) -> DueReports {
        let mut due = DueReports::default();

        if now_ms.wrapping_sub(self.last_gps_send_ms) >= self.gps_interval_ms {
            self.last_gps_send_ms = now_ms;
            due.gps = true;
        }
        if now_ms.wrapping_sub(self.last_heartbeat_ms) >= self.heartbeat_interval_ms {
            self.last_heartbeat_ms = now_ms;
            due.heartbeat = true;
        }

        due
    }
}
