//! Loop supervision via the ESP-IDF Task Watchdog Timer.
//!
//! The polling loop feeds the watchdog once per iteration; if dispatch or
//! report building ever wedges for longer than the configured timeout the
//! TWDT panics the task and the device reboots. The timeout comes from
//! [`SystemConfig::watchdog_timeout_ms`], which is required to exceed
//! `restart_delay_ms` so a deliberate RESET stall never races the reset.
//!
//! On host builds the supervisor tracks the feed timestamps in-memory so
//! tests can assert starvation without a panic.

use crate::config::SystemConfig;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
    #[cfg(not(target_os = "espidf"))]
    timeout_ms: u32,
    #[cfg(not(target_os = "espidf"))]
    last_fed_ms: core::cell::Cell<Option<u32>>,
}

impl Watchdog {
    /// Reconfigure the TWDT to the configured timeout and subscribe the
    /// current task. Subscription failure is logged, not fatal — the loop
    /// just runs unsupervised.
    pub fn new(config: &SystemConfig) -> Self {
        let timeout_ms = config.watchdog_timeout_ms;

        #[cfg(target_os = "espidf")]
        {
            Self {
                subscribed: subscribe(timeout_ms),
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): {} ms timeout, no reset", timeout_ms);
            Self {
                timeout_ms,
                last_fed_ms: core::cell::Cell::new(None),
            }
        }
    }

    /// Mark the loop alive. Must run at least once per timeout window.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            unsafe {
                esp_idf_svc::sys::esp_task_wdt_reset();
            }
        }

        #[cfg(not(target_os = "espidf"))]
        self.feed_at(0);
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn feed_at(&self, now_ms: u32) {
        self.last_fed_ms.set(Some(now_ms));
    }

    /// Whether the loop has missed its feed window (host diagnosis only;
    /// on device the TWDT itself enforces this).
    #[cfg(not(target_os = "espidf"))]
    pub fn is_starved(&self, now_ms: u32) -> bool {
        match self.last_fed_ms.get() {
            Some(at) => now_ms.wrapping_sub(at) >= self.timeout_ms,
            None => true,
        }
    }
}

#[cfg(target_os = "espidf")]
fn subscribe(timeout_ms: u32) -> bool {
    use esp_idf_svc::sys::*;

    // SAFETY: called once from main() before the loop; single-threaded.
    unsafe {
        let cfg = esp_task_wdt_config_t {
            timeout_ms,
            idle_core_mask: 0,
            trigger_panic: true,
        };
        let ret = esp_task_wdt_reconfigure(&cfg);
        if ret != ESP_OK {
            log::warn!("TWDT reconfigure returned {} (may already be configured)", ret);
        }

        let ret = esp_task_wdt_add(core::ptr::null_mut());
        if ret == ESP_OK {
            log::info!("Watchdog: subscribed ({} ms timeout, panic on trigger)", timeout_ms);
            true
        } else {
            log::warn!("Watchdog: failed to subscribe ({})", ret);
            false
        }
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn unfed_watchdog_counts_as_starved() {
        let wd = Watchdog::new(&SystemConfig::default());
        assert!(wd.is_starved(0));
    }

    #[test]
    fn fed_watchdog_starves_only_after_the_timeout() {
        let config = SystemConfig::default();
        let wd = Watchdog::new(&config);
        wd.feed_at(1_000);
        assert!(!wd.is_starved(1_000 + config.watchdog_timeout_ms - 1));
        assert!(wd.is_starved(1_000 + config.watchdog_timeout_ms));
    }

    #[test]
    fn reset_stall_is_survivable() {
        // A RESET command stalls the loop for restart_delay_ms; that stall
        // must end inside the feed window.
        let config = SystemConfig::default();
        let wd = Watchdog::new(&config);
        wd.feed_at(0);
        assert!(!wd.is_starved(config.restart_delay_ms));
    }
}
