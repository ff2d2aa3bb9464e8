//! System control adapter — ordered restart.
//!
//! Holds the restart sequence: a short delay so the acknowledgement
//! drains out of the UART TX FIFO, then a chip reset. The delay is well
//! under the watchdog timeout.

use std::time::Duration;

use log::warn;

use crate::app::ports::SystemPort;

pub struct SystemControl {
    restart_delay_ms: u32,
}

impl SystemControl {
    pub fn new(restart_delay_ms: u32) -> Self {
        Self { restart_delay_ms }
    }
}

impl SystemPort for SystemControl {
    fn restart(&mut self) {
        warn!("restart requested, rebooting in {} ms", self.restart_delay_ms);
        std::thread::sleep(Duration::from_millis(u64::from(self.restart_delay_ms)));

        #[cfg(target_os = "espidf")]
        unsafe {
            esp_idf_svc::sys::esp_restart();
        }

        #[cfg(not(target_os = "espidf"))]
        warn!("restart(sim): no-op");
    }
}
