//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the relay and status-LED drivers, exposing the relay through
//! [`RelayPort`]. This is the only module (besides `drivers`) that
//! touches actual hardware. On non-espidf targets the underlying drivers
//! use cfg-gated simulation stubs.

use crate::app::ports::{PinLevel, RelayPort};
use crate::drivers::relay::RelayDriver;
use crate::drivers::status_led::StatusLed;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    relay: RelayDriver,
    led: StatusLed,
}

impl HardwareAdapter {
    pub fn new(relay: RelayDriver, led: StatusLed) -> Self {
        Self { relay, led }
    }

    /// Advance the liveness blink. Not part of any port — the LED is a
    /// loop concern, not a domain one.
    pub fn led_tick(&mut self, now_ms: u32) {
        self.led.tick(now_ms);
    }
}

impl RelayPort for HardwareAdapter {
    fn actuate(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn is_energized(&self) -> bool {
        self.relay.is_energized()
    }

    fn physical_level(&self) -> PinLevel {
        self.relay.physical_level()
    }
}
