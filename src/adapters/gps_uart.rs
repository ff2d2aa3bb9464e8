//! GPS receiver UART — raw byte source for the sentence decoder.
//!
//! Non-blocking: a read returns whatever is in the driver FIFO, possibly
//! nothing. The decoder is incremental, so partial sentences are fine.

use crate::drivers::hw_init;

pub struct GpsUart;

impl GpsUart {
    pub fn new() -> Self {
        Self
    }

    /// Read up to `buf.len()` bytes without blocking. Returns the number
    /// of bytes actually read (0 when the FIFO is empty).
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        hw_init::gps_read(buf)
    }
}

impl Default for GpsUart {
    fn default() -> Self {
        Self::new()
    }
}
