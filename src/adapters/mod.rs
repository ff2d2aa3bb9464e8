//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to                    |
//! |-------------|--------------|--------------------------------|
//! | `hardware`  | RelayPort    | ESP32 GPIO (relay, status LED) |
//! | `json_sink` | ReportSink   | Host UART, JSON lines          |
//! | `serial`    | —            | Host UART RX, line assembly    |
//! | `gps_uart`  | —            | GPS receiver UART RX           |
//! | `system`    | SystemPort   | ESP-IDF restart                |
//! | `time`      | —            | ESP32 high-resolution timer    |

pub mod gps_uart;
pub mod hardware;
pub mod json_sink;
pub mod serial;
pub mod system;
pub mod time;
