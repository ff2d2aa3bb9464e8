//! GPIO / peripheral pin assignments for the TrackCar main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Ignition-cut relay module (active LOW)
// ---------------------------------------------------------------------------

/// Digital output driving the relay module control input.
/// The module energises on LOW — the logical inverse lives in
/// `drivers::relay`, nowhere else.
pub const RELAY_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Status LED (on-board, liveness blink)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = LED on.
pub const STATUS_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// GPS receiver (NEO-6M, NMEA over UART1)
// ---------------------------------------------------------------------------

pub const GPS_UART_RX_GPIO: i32 = 6;
pub const GPS_UART_TX_GPIO: i32 = 7;
/// NEO-6M factory default baud rate.
pub const GPS_BAUD: u32 = 9600;

// ---------------------------------------------------------------------------
// Host link (UART0, shared with the console)
// ---------------------------------------------------------------------------

pub const HOST_BAUD: u32 = 9600;
