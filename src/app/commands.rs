//! Inbound host commands.
//!
//! One trimmed text line maps to exactly one command. Matching is
//! case-sensitive and exact — no case folding, no argument parsing. The
//! closed set mirrors the host controller's protocol; anything else is
//! carried through as [`Command::Unknown`] so the dispatcher can echo it
//! back in an `error` report.

/// Commands the host controller can send over the serial link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Energise the ignition-cut relay (`IGNITION_ON` / `RELE_ON`).
    IgnitionOn,
    /// De-energise the relay (`IGNITION_OFF` / `RELE_OFF`).
    IgnitionOff,
    /// Read-only status report.
    Status,
    /// Clear the fix tracker and wait for a fresh fix.
    GpsReset,
    /// Acknowledge, then restart the device after a fixed delay.
    Reset,
    /// Test alias: energise the relay (lights the module LED).
    TestLedOn,
    /// Test alias: de-energise the relay.
    TestLedOff,
    /// Anything not in the closed set, carried verbatim.
    Unknown(String),
}

impl Command {
    /// Parse a single trimmed line.
    pub fn parse(line: &str) -> Self {
        match line {
            "IGNITION_ON" | "RELE_ON" => Self::IgnitionOn,
            "IGNITION_OFF" | "RELE_OFF" => Self::IgnitionOff,
            "STATUS" => Self::Status,
            "GPS_RESET" => Self::GpsReset,
            "RESET" => Self::Reset,
            "TEST_LED_ON" => Self::TestLedOn,
            "TEST_LED_OFF" => Self::TestLedOff,
            other => Self::Unknown(other.to_string()),
        }
    }
}
