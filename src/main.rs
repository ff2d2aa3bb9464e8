//! TrackCar Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single-threaded polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  HardwareAdapter   SerialReportSink   CommandLink          │
//! │  (RelayPort)       (ReportSink)       (host UART lines)    │
//! │  GpsUart           SystemControl      MonotonicClock       │
//! │  (receiver bytes)  (SystemPort)       (uptime ms)          │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ──────────────        │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)               │      │
//! │  │  command dispatch · fix tracking · reports       │      │
//! │  └──────────────────────────────────────────────────┘      │
//! │                                                            │
//! │  ReportScheduler (wraparound-safe dual cadence)            │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use trackcar::adapters::gps_uart::GpsUart;
use trackcar::adapters::hardware::HardwareAdapter;
use trackcar::adapters::json_sink::SerialReportSink;
use trackcar::adapters::serial::CommandLink;
use trackcar::adapters::system::SystemControl;
use trackcar::adapters::time::MonotonicClock;
use trackcar::app::events::Report;
use trackcar::app::ports::ReportSink;
use trackcar::app::service::{AppService, READY_BANNER};
use trackcar::config::SystemConfig;
use trackcar::drivers;
use trackcar::drivers::relay::RelayDriver;
use trackcar::drivers::status_led::StatusLed;
use trackcar::scheduler::ReportScheduler;

/// Loop cadence. At 9600 baud the GPS delivers under 5 bytes per
/// millisecond, so a 5 ms sleep keeps well inside the 256-byte RX ring.
const LOOP_SLEEP_MS: u64 = 5;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  TrackCar v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Config + adapters ──────────────────────────────────
    let config = SystemConfig::default();
    let watchdog = drivers::watchdog::Watchdog::new(&config);
    let clock = MonotonicClock::new();

    let mut hw = HardwareAdapter::new(RelayDriver::new(), StatusLed::new());
    let mut sink = SerialReportSink::new();
    let mut link = CommandLink::new();
    let mut gps = GpsUart::new();
    let mut system = SystemControl::new(config.restart_delay_ms);

    // ── 4. Application service ────────────────────────────────
    let mut app = AppService::new(&config);
    let mut sched = ReportScheduler::new(&config);

    // The host waits for the raw banner before it starts parsing JSON.
    drivers::hw_init::host_write_line(READY_BANNER);
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering polling loop.");

    // ── 5. Polling loop ───────────────────────────────────────
    let mut gps_buf = [0u8; 64];

    loop {
        let now_ms = clock.now_ms();

        // Host commands: drain every complete line that arrived.
        while let Some(line) = link.poll_line() {
            app.handle_line(&line, now_ms, &mut hw, &mut system, &mut sink);
        }

        // GPS bytes: drain the receiver FIFO through the decoder.
        loop {
            let n = gps.read(&mut gps_buf);
            if n == 0 {
                break;
            }
            for &byte in &gps_buf[..n] {
                app.ingest_gps_byte(byte, now_ms, &mut sink);
            }
        }

        // Periodic telemetry.
        let due = sched.poll(now_ms);
        if due.gps {
            sink.emit(&Report::Gps(app.build_gps_report(now_ms, &hw)));
        }
        if due.heartbeat {
            let free_ram = drivers::hw_init::free_heap_bytes();
            sink.emit(&Report::Heartbeat(app.build_heartbeat(now_ms, &hw, free_ram)));
        }

        hw.led_tick(now_ms);
        watchdog.feed();

        std::thread::sleep(std::time::Duration::from_millis(LOOP_SLEEP_MS));
    }
}
