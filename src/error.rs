//! Unified error types for the TrackCar firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level init path's error handling uniform. All variants are `Copy` so
//! they can be passed around without allocation. Domain operations
//! (dispatch, fix tracking, scheduling) are total functions and never
//! return these; only peripheral bring-up and the UART adapters do.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// GPIO configuration rejected by the HAL.
    Gpio(i32),
    /// A UART transport operation failed.
    Uart(UartError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(rc) => write!(f, "gpio: config failed (rc={rc})"),
            Self::Uart(e) => write!(f, "uart: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// UART transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartError {
    /// Driver install / pin routing failed.
    DriverInstallFailed(i32),
    /// A read returned an error code.
    ReadFailed(i32),
    /// A write returned an error code.
    WriteFailed(i32),
}

impl fmt::Display for UartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DriverInstallFailed(rc) => write!(f, "driver install failed (rc={rc})"),
            Self::ReadFailed(rc) => write!(f, "read failed (rc={rc})"),
            Self::WriteFailed(rc) => write!(f, "write failed (rc={rc})"),
        }
    }
}

impl From<UartError> for Error {
    fn from(e: UartError) -> Self {
        Self::Uart(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
