//! Monotonic millisecond clock.
//!
//! Wraps the ESP32 high-resolution timer (microseconds since boot) into
//! a `u32` millisecond counter. The counter wraps after ~49.7 days; all
//! consumers compare timestamps with `wrapping_sub`, so the wrap is
//! harmless.
//!
//! On host/test builds the clock is backed by `std::time::Instant`.

#[cfg(not(target_os = "espidf"))]
use std::time::Instant;

pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            Self {}
        }

        #[cfg(not(target_os = "espidf"))]
        {
            Self {
                start: Instant::now(),
            }
        }
    }

    /// Milliseconds since boot, wrapping at `u32::MAX`.
    pub fn now_ms(&self) -> u32 {
        #[cfg(target_os = "espidf")]
        {
            let micros = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
            (micros / 1000) as u32
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.start.elapsed().as_millis() as u32
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b.wrapping_sub(a) < 1_000);
    }
}
