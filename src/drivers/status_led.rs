//! On-board status LED — liveness blink.
//!
//! Short flash (100 ms) every 2 s so a technician can see the loop is
//! alive without attaching a serial console.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

const BLINK_PERIOD_MS: u32 = 2_000;
const BLINK_ON_MS: u32 = 100;

pub struct StatusLed {
    lit: bool,
}

impl StatusLed {
    pub fn new() -> Self {
        Self { lit: false }
    }

    /// Advance the blink pattern. Call once per loop iteration; only
    /// writes the GPIO on a state change.
    pub fn tick(&mut self, now_ms: u32) {
        let lit = now_ms % BLINK_PERIOD_MS < BLINK_ON_MS;
        if lit != self.lit {
            hw_init::gpio_write(pins::STATUS_LED_GPIO, lit);
            self.lit = lit;
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
