//! Ignition-cut relay driver (active-low module).
//!
//! The relay board energises when its control input is pulled LOW, so the
//! physical pin level is always the logical inverse of the relay state.
//! That inversion lives in [`RelayDriver::drive`] and nowhere else.
//!
//! ## Safety contract
//!
//! Construction drives the pin HIGH (de-energised). The controlled circuit
//! therefore starts open even if no host command ever arrives.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::app::ports::PinLevel;
use crate::drivers::hw_init;
use crate::pins;

pub struct RelayDriver {
    energized: bool,
}

impl RelayDriver {
    /// Create the driver with the relay forced to its safe state.
    pub fn new() -> Self {
        let mut driver = Self { energized: false };
        driver.set(false);
        driver
    }

    /// Energise (`true`) or de-energise (`false`). Infallible.
    pub fn set(&mut self, on: bool) {
        self.drive(on);
        self.energized = on;
    }

    pub fn is_energized(&self) -> bool {
        self.energized
    }

    /// Physical control-line level, derived from the logical state.
    pub fn physical_level(&self) -> PinLevel {
        if self.energized {
            PinLevel::Low
        } else {
            PinLevel::High
        }
    }

    /// The one place the active-low polarity is applied.
    fn drive(&mut self, on: bool) {
        hw_init::gpio_write(pins::RELAY_GPIO, !on);
    }
}
