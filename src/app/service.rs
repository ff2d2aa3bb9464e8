//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the fix tracker and the command counter, and turns
//! host command lines and GPS bytes into relay actuation and wire reports.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  host line ──▶ ┌────────────────────────┐ ──▶ ReportSink
//!  GPS bytes ──▶ │       AppService        │
//!   RelayPort ◀──│  dispatch · fix state   │──▶ SystemPort (RESET)
//!                └────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::gps::decoder::GpsDateTime;
use crate::gps::{FixTracker, NO_POSITION};

use super::commands::Command;
use super::events::{GpsReport, HeartbeatReport, Report, StatusReport};
use super::ports::{PinLevel, RelayPort, ReportSink, SystemPort};

/// Raw readiness line the host waits for after boot, before any JSON.
pub const READY_BANNER: &str = "TRACKCAR_READY_V2.3_INVERTED";

const STARTUP_MESSAGE: &str = "TrackCar inicializado - Módulo relé Active Low detectado";
const RELAY_LOGIC: &str = "Active Low (invertido)";

pub struct AppService {
    tracker: FixTracker,
    commands_received: u32,
}

impl AppService {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            tracker: FixTracker::new(config),
            commands_received: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force the relay into its safe state and announce readiness.
    /// Must run before the first loop iteration.
    pub fn start(&mut self, hw: &mut impl RelayPort, sink: &mut impl ReportSink) {
        hw.actuate(false);
        sink.emit(&Report::System {
            message: STARTUP_MESSAGE.to_string(),
        });
        info!("AppService started, relay de-energised");
    }

    // ── GPS ingestion ─────────────────────────────────────────

    /// Forward one receiver byte to the fix tracker. Returns whether a
    /// full sentence was just parsed.
    pub fn ingest_gps_byte(&mut self, byte: u8, now_ms: u32, sink: &mut impl ReportSink) -> bool {
        self.tracker.ingest_byte(byte, now_ms, sink)
    }

    // ── Command handling ──────────────────────────────────────

    /// Dispatch one trimmed host line. Stateless between lines: the counter
    /// and the debug echo happen unconditionally, before interpretation.
    pub fn handle_line(
        &mut self,
        line: &str,
        now_ms: u32,
        hw: &mut impl RelayPort,
        system: &mut impl SystemPort,
        sink: &mut impl ReportSink,
    ) {
        self.commands_received = self.commands_received.wrapping_add(1);
        sink.emit(&Report::Debug {
            received: line.to_string(),
        });

        match Command::parse(line) {
            Command::IgnitionOn => {
                hw.actuate(true);
                sink.emit(&Report::ignition_ack(true));
                sink.emit(&Report::System {
                    message: "Relé LIGADO - LED aceso (Active Low)".to_string(),
                });
                info!("relay energised by host command");
            }
            Command::IgnitionOff => {
                hw.actuate(false);
                sink.emit(&Report::ignition_ack(false));
                sink.emit(&Report::System {
                    message: "Relé DESLIGADO - LED apagado (Active Low)".to_string(),
                });
                info!("relay de-energised by host command");
            }
            Command::Status => {
                let status = self.build_status(now_ms, hw);
                sink.emit(&Report::Status(status));
            }
            Command::GpsReset => {
                self.tracker.reset();
                sink.emit(&Report::System {
                    message: "GPS resetado - aguardando novo fix".to_string(),
                });
                info!("fix tracker reset by host command");
            }
            Command::Reset => {
                sink.emit(&Report::reset_ack());
                info!("restart requested by host command");
                system.restart();
            }
            Command::TestLedOn => {
                hw.actuate(true);
                sink.emit(&Report::System {
                    message: "Teste: LED ligado (LOW - Active Low)".to_string(),
                });
            }
            Command::TestLedOff => {
                hw.actuate(false);
                sink.emit(&Report::System {
                    message: "Teste: LED desligado (HIGH - Active Low)".to_string(),
                });
            }
            Command::Unknown(text) => {
                sink.emit(&Report::Error {
                    message: format!("Comando desconhecido: {text}"),
                });
            }
        }
    }

    // ── Report building ───────────────────────────────────────

    /// Periodic GPS report. `now_ms` doubles as uptime — the loop clock
    /// starts at zero on boot.
    pub fn build_gps_report(&self, now_ms: u32, relay: &impl RelayPort) -> GpsReport {
        let snap = self.tracker.snapshot();
        let (lat, lon, sats, timestamp) = match &snap.current {
            Some(s) => (s.latitude, s.longitude, s.satellites, s.timestamp),
            None => (NO_POSITION, NO_POSITION, 0, None),
        };

        GpsReport {
            lat: round6(lat),
            lon: round6(lon),
            sats,
            age: self.tracker.age_ms(now_ms),
            ignition_state: if relay.is_energized() { "on" } else { "off" },
            valid: self.tracker.current_validity(now_ms),
            uptime: now_ms,
            valid_count: snap.valid_count,
            total_reads: snap.total_decoded_bytes,
            gps_init: snap.initialized,
            gps_time: timestamp.filter(|t| t.year > 2000).map(format_timestamp),
        }
    }

    /// Heartbeat report. `free_ram` comes from the platform adapter.
    pub fn build_heartbeat(
        &self,
        now_ms: u32,
        relay: &impl RelayPort,
        free_ram: u32,
    ) -> HeartbeatReport {
        let snap = self.tracker.snapshot();
        let on = relay.is_energized();

        HeartbeatReport {
            uptime: now_ms,
            commands: self.commands_received,
            rele: if on { "ligado" } else { "desligado" },
            rele_led: if on { "aceso" } else { "apagado" },
            free_ram,
            gps_status: if snap.initialized { "fixed" } else { "searching" },
            valid_gps: snap.valid_count,
            last_valid: self.tracker.secs_since_last_valid(now_ms),
        }
    }

    fn build_status(&self, now_ms: u32, relay: &impl RelayPort) -> StatusReport {
        let snap = self.tracker.snapshot();
        let on = relay.is_energized();

        StatusReport {
            relay: if on { "ligado" } else { "desligado" },
            relay_led: if on { "aceso" } else { "apagado" },
            relay_pin: match relay.physical_level() {
                PinLevel::High => "HIGH",
                PinLevel::Low => "LOW",
            },
            relay_logic: RELAY_LOGIC,
            ignition: if on { "on" } else { "off" },
            commands: self.commands_received,
            valid_gps: snap.valid_count,
            gps_init: snap.initialized,
            uptime: now_ms / 1000,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Lines received so far, recognised or not.
    pub fn commands_received(&self) -> u32 {
        self.commands_received
    }

    /// Read-only access to the fix tracker (report building, tests).
    pub fn tracker(&self) -> &FixTracker {
        &self.tracker
    }
}

/// Round to the 6 decimal places the wire format carries.
fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// `"YYYY-MM-DD HH:MM:SS"` with fixed 2-digit zero-padded fields.
fn format_timestamp(t: GpsDateTime) -> String {
    format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        t.year, t.month, t.day, t.hour, t.minute, t.second
    )
}
