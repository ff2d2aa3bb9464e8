//! Outbound wire reports.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`ReportSink`](super::ports::ReportSink) port; the production adapter
//! serialises each one as a single JSON object line on the host UART.
//!
//! Field names, value phrasing (including the Portuguese relay wording),
//! and the 2-digit zero padding in `gpsTime` are part of the host protocol
//! and must not drift — the host controller matches on them.

use serde::Serialize;

/// One wire message. The `type` tag discriminates on the host side.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Report {
    /// Free-form operator-visible notification.
    System { message: String },

    /// Periodic GPS position/fix report.
    Gps(GpsReport),

    /// Periodic liveness report, independent of GPS content.
    Heartbeat(HeartbeatReport),

    /// On-demand full status (`STATUS` command).
    Status(StatusReport),

    /// Command acknowledgement. Relay commands carry `ignitionState`;
    /// the RESET acknowledgement carries `message` instead.
    Ack {
        #[serde(rename = "ignitionState", skip_serializing_if = "Option::is_none")]
        ignition_state: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        command: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<&'static str>,
    },

    /// Unconditional echo of every received line, before interpretation.
    Debug { received: String },

    /// Unrecognised command (non-fatal).
    Error { message: String },
}

impl Report {
    /// Acknowledgement for a relay command.
    pub fn ignition_ack(on: bool) -> Self {
        Self::Ack {
            ignition_state: Some(if on { "on" } else { "off" }),
            command: Some("executed"),
            message: None,
        }
    }

    /// Acknowledgement for the RESET command.
    pub fn reset_ack() -> Self {
        Self::Ack {
            ignition_state: None,
            command: None,
            message: Some("Reiniciando TrackCar..."),
        }
    }
}

/// Periodic GPS report (5 s cadence).
#[derive(Debug, Clone, Serialize)]
pub struct GpsReport {
    pub lat: f64,
    pub lon: f64,
    pub sats: i32,
    /// Age of the last decoded position at report time (ms).
    pub age: u32,
    #[serde(rename = "ignitionState")]
    pub ignition_state: &'static str,
    pub valid: bool,
    /// Device uptime (ms).
    pub uptime: u32,
    #[serde(rename = "validCount")]
    pub valid_count: u32,
    #[serde(rename = "totalReads")]
    pub total_reads: u32,
    #[serde(rename = "gpsInit")]
    pub gps_init: bool,
    /// `"YYYY-MM-DD HH:MM:SS"`, only present once a calendar date with
    /// year > 2000 has been decoded. Never emitted empty or null.
    #[serde(rename = "gpsTime", skip_serializing_if = "Option::is_none")]
    pub gps_time: Option<String>,
}

/// Heartbeat report (30 s cadence).
#[derive(Debug, Clone, Serialize)]
pub struct HeartbeatReport {
    /// Device uptime (ms).
    pub uptime: u32,
    pub commands: u32,
    /// "ligado" / "desligado"
    pub rele: &'static str,
    /// Module LED phrasing, parallel to `rele`: "aceso" / "apagado"
    #[serde(rename = "releLED")]
    pub rele_led: &'static str,
    /// Free heap bytes on device; 0 on host builds.
    #[serde(rename = "freeRam")]
    pub free_ram: u32,
    /// "fixed" / "searching"
    #[serde(rename = "gpsStatus")]
    pub gps_status: &'static str,
    #[serde(rename = "validGPS")]
    pub valid_gps: u32,
    /// Seconds since the last valid fix; 999 when never valid.
    #[serde(rename = "lastValid")]
    pub last_valid: u32,
}

/// On-demand status report (`STATUS` command).
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// "ligado" / "desligado"
    pub relay: &'static str,
    /// "aceso" / "apagado"
    #[serde(rename = "relayLED")]
    pub relay_led: &'static str,
    /// Physical control-line level: "HIGH" / "LOW".
    #[serde(rename = "relayPin")]
    pub relay_pin: &'static str,
    #[serde(rename = "relayLogic")]
    pub relay_logic: &'static str,
    /// "on" / "off"
    pub ignition: &'static str,
    pub commands: u32,
    #[serde(rename = "validGPS")]
    pub valid_gps: u32,
    #[serde(rename = "gpsInit")]
    pub gps_init: bool,
    /// Device uptime (seconds — unlike the other reports).
    pub uptime: u32,
}
