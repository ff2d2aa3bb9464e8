//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (relay driver, report serialiser, restart hook)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use core::fmt;

use super::events::Report;

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Physical level of the relay control line.
///
/// The relay module is active LOW: `Low` means the controlled circuit is
/// closed (relay energised), `High` means it is open (safe).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    High,
    Low,
}

impl fmt::Display for PinLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Write-side port for the ignition-cut relay.
///
/// GPIO writes are infallible — `actuate` has no failure path. The
/// active-low polarity mapping lives in the implementing driver and
/// must never be re-derived elsewhere.
pub trait RelayPort {
    /// Energise (`true`) or de-energise (`false`) the relay.
    fn actuate(&mut self, on: bool);

    /// Logical relay state.
    fn is_energized(&self) -> bool;

    /// Physical control-line level (inverse of the logical state).
    fn physical_level(&self) -> PinLevel;
}

// ───────────────────────────────────────────────────────────────
// Report sink port (domain → host link)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`Report`]s through this port. The
/// production adapter serialises them as newline-delimited JSON on the
/// host UART; tests record them in memory.
pub trait ReportSink {
    fn emit(&mut self, report: &Report);
}

// ───────────────────────────────────────────────────────────────
// System port (restart hook)
// ───────────────────────────────────────────────────────────────

/// Deliberate device restart, requested by the `RESET` command.
///
/// Implementations block for the configured delay (so the acknowledgement
/// drains out of the UART FIFO) and then reboot. On host targets this is a
/// logged no-op so tests can observe the request.
pub trait SystemPort {
    fn restart(&mut self);
}
