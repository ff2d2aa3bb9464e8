//! GPS subsystem — incremental sentence decoding and fix-validity tracking.
//!
//! [`decoder`] wraps the byte-at-a-time NMEA parser and merges
//! position-bearing sentences into a rolling last-known view.
//! [`tracker`] owns the fix-validity state machine and its counters.

pub mod decoder;
pub mod tracker;

pub use decoder::{GpsDateTime, GpsSample, SentenceDecoder, NO_POSITION};
pub use tracker::{FixState, FixTracker};
