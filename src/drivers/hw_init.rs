//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and the two UARTs (host link on UART0, GPS
//! receiver on UART1) using raw ESP-IDF sys calls. Called once from
//! `main()` before the event loop starts.
//!
//! The relay output is driven HIGH (de-energised, active-low module) in
//! the same call that configures it, so the controlled circuit is safe
//! before any application logic runs.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::error::{Error, UartError};
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
const HOST_UART: uart_port_t = 0;
#[cfg(target_os = "espidf")]
const GPS_UART: uart_port_t = 1;
#[cfg(target_os = "espidf")]
const UART_PIN_NO_CHANGE: i32 = -1;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the event loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_uarts()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    // (pin, initial level). Relay is active-low: HIGH = safe/open.
    let output_pins = [(pins::RELAY_GPIO, 1u32), (pins::STATUS_LED_GPIO, 0u32)];

    for &(pin, level) in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK {
            return Err(Error::Gpio(ret));
        }
        unsafe { gpio_set_level(pin, level) };
    }

    info!("hw_init: GPIO outputs configured (relay=HIGH/safe)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── UARTs ─────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uarts() -> Result<()> {
    unsafe {
        install_uart(
            HOST_UART,
            pins::HOST_BAUD,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        )?;
        install_uart(
            GPS_UART,
            pins::GPS_BAUD,
            pins::GPS_UART_TX_GPIO,
            pins::GPS_UART_RX_GPIO,
        )?;
    }
    info!("hw_init: UARTs configured (host=UART0, gps=UART1)");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn install_uart(
    port: uart_port_t,
    baud: u32,
    tx_pin: i32,
    rx_pin: i32,
) -> Result<()> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        rx_flow_ctrl_thresh: 0,
        ..Default::default()
    };

    unsafe {
        let ret = uart_param_config(port, &cfg);
        if ret != ESP_OK {
            return Err(Error::Uart(UartError::DriverInstallFailed(ret)));
        }
        let ret = uart_set_pin(port, tx_pin, rx_pin, UART_PIN_NO_CHANGE, UART_PIN_NO_CHANGE);
        if ret != ESP_OK {
            return Err(Error::Uart(UartError::DriverInstallFailed(ret)));
        }
        // 256-byte RX ring; no TX ring (writes block on the FIFO), no queue.
        let ret = uart_driver_install(port, 256, 0, 0, core::ptr::null_mut(), 0);
        if ret != ESP_OK {
            return Err(Error::Uart(UartError::DriverInstallFailed(ret)));
        }
    }
    Ok(())
}

/// Non-blocking read from the host-link UART. Returns bytes read.
#[cfg(target_os = "espidf")]
pub fn host_read(buf: &mut [u8]) -> usize {
    uart_read_nonblocking(HOST_UART, buf)
}

#[cfg(not(target_os = "espidf"))]
pub fn host_read(_buf: &mut [u8]) -> usize {
    0
}

/// Write one line (plus `\n`) to the host-link UART. A failed write is
/// logged and the line dropped; telemetry is lossy by design.
#[cfg(target_os = "espidf")]
pub fn host_write_line(line: &str) {
    // SAFETY: driver installed in init_uarts(); uart_write_bytes copies the
    // buffer before returning. Main-loop only.
    unsafe {
        let ret = uart_write_bytes(HOST_UART, line.as_ptr().cast(), line.len());
        if ret < 0 {
            log::warn!("uart{}: {}", HOST_UART, UartError::WriteFailed(ret));
            return;
        }
        let ret = uart_write_bytes(HOST_UART, b"\n".as_ptr().cast(), 1);
        if ret < 0 {
            log::warn!("uart{}: {}", HOST_UART, UartError::WriteFailed(ret));
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn host_write_line(line: &str) {
    println!("{line}");
}

/// Non-blocking read from the GPS UART. Returns bytes read.
#[cfg(target_os = "espidf")]
pub fn gps_read(buf: &mut [u8]) -> usize {
    uart_read_nonblocking(GPS_UART, buf)
}

#[cfg(not(target_os = "espidf"))]
pub fn gps_read(_buf: &mut [u8]) -> usize {
    0
}

#[cfg(target_os = "espidf")]
fn uart_read_nonblocking(port: uart_port_t, buf: &mut [u8]) -> usize {
    // SAFETY: driver installed in init_uarts(); zero tick timeout makes
    // this a pure ring-buffer drain. Main-loop only.
    let n = unsafe { uart_read_bytes(port, buf.as_mut_ptr().cast(), buf.len() as u32, 0) };
    if n < 0 {
        log::warn!("uart{}: {}", port, UartError::ReadFailed(n));
        return 0;
    }
    n as usize
}

// ── Free heap ─────────────────────────────────────────────────

/// Free heap bytes, for the heartbeat's `freeRam` field.
#[cfg(target_os = "espidf")]
pub fn free_heap_bytes() -> u32 {
    unsafe { esp_get_free_heap_size() }
}

#[cfg(not(target_os = "espidf"))]
pub fn free_heap_bytes() -> u32 {
    0
}
