//! Integration tests: AppService → command dispatch → relay + reports.
//!
//! All tests run on the host with mock adapters; no real hardware required.

use trackcar::app::commands::Command;
use trackcar::app::events::Report;
use trackcar::app::ports::{PinLevel, RelayPort, ReportSink, SystemPort};
use trackcar::app::service::AppService;
use trackcar::config::SystemConfig;

// ── Mock implementations ──────────────────────────────────────

struct MockRelay {
    energized: bool,
    actuations: Vec<bool>,
}

impl MockRelay {
    fn new() -> Self {
        Self {
            energized: false,
            actuations: Vec::new(),
        }
    }
}

impl RelayPort for MockRelay {
    fn actuate(&mut self, on: bool) {
        self.energized = on;
        self.actuations.push(on);
    }
    fn is_energized(&self) -> bool {
        self.energized
    }
    fn physical_level(&self) -> PinLevel {
        if self.energized {
            PinLevel::Low
        } else {
            PinLevel::High
        }
    }
}

struct MockSystem {
    restarts_requested: u32,
}

impl MockSystem {
    fn new() -> Self {
        Self {
            restarts_requested: 0,
        }
    }
}

impl SystemPort for MockSystem {
    fn restart(&mut self) {
        self.restarts_requested += 1;
    }
}

struct RecordingSink {
    reports: Vec<Report>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    fn json(&self, idx: usize) -> String {
        serde_json::to_string(&self.reports[idx]).unwrap()
    }

    fn last_json(&self) -> String {
        serde_json::to_string(self.reports.last().unwrap()).unwrap()
    }
}

impl ReportSink for RecordingSink {
    fn emit(&mut self, report: &Report) {
        self.reports.push(report.clone());
    }
}

fn make_app() -> (AppService, MockRelay, MockSystem, RecordingSink) {
    let mut app = AppService::new(&SystemConfig::default());
    let mut relay = MockRelay::new();
    let system = MockSystem::new();
    let mut sink = RecordingSink::new();
    app.start(&mut relay, &mut sink);
    (app, relay, system, sink)
}

const GGA_FIX: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

fn feed_sentence(app: &mut AppService, sentence: &[u8], now_ms: u32, sink: &mut RecordingSink) {
    for &b in sentence {
        app.ingest_gps_byte(b, now_ms, sink);
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_forces_relay_safe_and_announces() {
    let (_, relay, _, sink) = make_app();
    assert_eq!(relay.actuations, vec![false], "boot must de-energise once");
    assert_eq!(relay.physical_level(), PinLevel::High);
    assert!(sink.json(0).contains("TrackCar inicializado"));
}

// ── Relay commands ────────────────────────────────────────────

#[test]
fn ignition_on_energises_and_acknowledges() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    app.handle_line("RELE_ON", 100, &mut relay, &mut system, &mut sink);

    assert!(relay.is_energized());
    assert_eq!(relay.physical_level(), PinLevel::Low);

    // Emission order: debug echo, ack, system notification.
    assert!(sink.json(1).contains(r#""type":"debug"#));
    let ack = sink.json(2);
    assert!(ack.contains(r#""type":"ack"#));
    assert!(ack.contains(r#""ignitionState":"on"#));
    assert!(ack.contains(r#""command":"executed"#));
    assert!(sink.json(3).contains("Relé LIGADO"));
}

#[test]
fn ignition_off_returns_to_safe_level() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    app.handle_line("IGNITION_ON", 100, &mut relay, &mut system, &mut sink);
    app.handle_line("IGNITION_OFF", 200, &mut relay, &mut system, &mut sink);

    assert!(!relay.is_energized());
    assert_eq!(relay.physical_level(), PinLevel::High);
    assert!(sink.last_json().contains("Relé DESLIGADO"));
}

#[test]
fn aliases_behave_identically() {
    assert_eq!(Command::parse("RELE_ON"), Command::parse("IGNITION_ON"));
    assert_eq!(Command::parse("RELE_OFF"), Command::parse("IGNITION_OFF"));
}

#[test]
fn test_led_commands_drive_the_relay_pin() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    app.handle_line("TEST_LED_ON", 100, &mut relay, &mut system, &mut sink);
    assert_eq!(relay.physical_level(), PinLevel::Low);
    assert!(sink.last_json().contains("Teste: LED ligado"));

    app.handle_line("TEST_LED_OFF", 200, &mut relay, &mut system, &mut sink);
    assert_eq!(relay.physical_level(), PinLevel::High);
    assert!(sink.last_json().contains("Teste: LED desligado"));
}

// ── Command counter ───────────────────────────────────────────

#[test]
fn every_line_counts_even_unrecognised_ones() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    for line in ["STATUS", "garbage", "RELE_ON", "", "MORE NOISE"] {
        app.handle_line(line, 0, &mut relay, &mut system, &mut sink);
    }
    assert_eq!(app.commands_received(), 5);
}

#[test]
fn unknown_command_echoes_text_in_error_report() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    app.handle_line("FLY_TO_MOON", 0, &mut relay, &mut system, &mut sink);

    let err = sink.last_json();
    assert!(err.contains(r#""type":"error"#));
    assert!(err.contains("Comando desconhecido: FLY_TO_MOON"));
    assert!(
        relay.actuations.len() == 1,
        "unknown command must not touch the relay beyond boot"
    );
}

#[test]
fn debug_echo_precedes_interpretation() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    app.handle_line("STATUS", 0, &mut relay, &mut system, &mut sink);

    let echo = sink.json(1);
    assert!(echo.contains(r#""type":"debug"#));
    assert!(echo.contains(r#""received":"STATUS"#));
    assert!(sink.json(2).contains(r#""type":"status"#));
}

// ── STATUS ────────────────────────────────────────────────────

#[test]
fn status_reflects_relay_and_counters() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    app.handle_line("RELE_ON", 1_000, &mut relay, &mut system, &mut sink);
    app.handle_line("STATUS", 63_000, &mut relay, &mut system, &mut sink);

    let status = sink.last_json();
    assert!(status.contains(r#""relay":"ligado"#));
    assert!(status.contains(r#""relayLED":"aceso"#));
    assert!(status.contains(r#""relayPin":"LOW"#));
    assert!(status.contains(r#""relayLogic":"Active Low (invertido)"#));
    assert!(status.contains(r#""ignition":"on"#));
    assert!(status.contains(r#""commands":2"#));
    // Status uptime is in seconds, unlike the other reports.
    assert!(status.contains(r#""uptime":63"#));
}

// ── RESET / GPS_RESET ─────────────────────────────────────────

#[test]
fn reset_acknowledges_then_requests_restart() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    app.handle_line("RESET", 0, &mut relay, &mut system, &mut sink);

    assert_eq!(system.restarts_requested, 1);
    let ack = sink.last_json();
    assert!(ack.contains(r#""type":"ack"#));
    assert!(ack.contains("Reiniciando TrackCar..."));
}

#[test]
fn gps_reset_rearms_fix_acquisition() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    feed_sentence(&mut app, GGA_FIX, 1_000, &mut sink);
    assert!(app.tracker().snapshot().initialized);

    app.handle_line("GPS_RESET", 2_000, &mut relay, &mut system, &mut sink);
    assert!(!app.tracker().snapshot().initialized);
    assert_eq!(app.tracker().snapshot().valid_count, 0);
    assert!(sink.last_json().contains("GPS resetado"));

    // A fresh sentence re-fires the one-time fix notification.
    feed_sentence(&mut app, GGA_FIX, 3_000, &mut sink);
    assert!(app.tracker().snapshot().initialized);
    assert!(sink.last_json().contains("GPS fix obtido com sucesso!"));
}

// ── Report building ───────────────────────────────────────────

#[test]
fn gps_report_before_any_sentence_uses_no_position_sentinel() {
    let (app, relay, _, _) = make_app();
    let report = app.build_gps_report(5_000, &relay);

    assert_eq!(report.lat, 1000.0);
    assert_eq!(report.lon, 1000.0);
    assert_eq!(report.sats, 0);
    assert!(!report.valid);
    assert!(!report.gps_init);
    assert_eq!(report.gps_time, None);
    assert_eq!(report.uptime, 5_000);
}

#[test]
fn gps_report_after_fix_carries_position() {
    let (mut app, relay, _, mut sink) = make_app();
    feed_sentence(&mut app, GGA_FIX, 1_000, &mut sink);

    let report = app.build_gps_report(1_500, &relay);
    assert_eq!(report.lat, 48.1173);
    assert_eq!(report.lon, 11.516667);
    assert_eq!(report.sats, 8);
    assert!(report.valid);
    assert!(report.gps_init);
    assert_eq!(report.valid_count, 1);
    assert_eq!(report.age, 500);
    assert_eq!(report.ignition_state, "off");
}

#[test]
fn heartbeat_reports_sentinel_before_first_valid_fix() {
    let (app, relay, _, _) = make_app();
    let hb = app.build_heartbeat(30_000, &relay, 0);

    assert_eq!(hb.last_valid, 999);
    assert_eq!(hb.gps_status, "searching");
    assert_eq!(hb.rele, "desligado");
    assert_eq!(hb.rele_led, "apagado");
    assert_eq!(hb.valid_gps, 0);
}

#[test]
fn heartbeat_tracks_fix_and_relay_state() {
    let (mut app, mut relay, mut system, mut sink) = make_app();
    feed_sentence(&mut app, GGA_FIX, 4_000, &mut sink);
    app.handle_line("RELE_ON", 5_000, &mut relay, &mut system, &mut sink);

    let hb = app.build_heartbeat(10_000, &relay, 123_456);
    assert_eq!(hb.rele, "ligado");
    assert_eq!(hb.rele_led, "aceso");
    assert_eq!(hb.gps_status, "fixed");
    assert_eq!(hb.valid_gps, 1);
    assert_eq!(hb.last_valid, 6, "(10000 - 4000) ms -> 6 s");
    assert_eq!(hb.commands, 1);
    assert_eq!(hb.free_ram, 123_456);
}
