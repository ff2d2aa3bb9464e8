//! JSON report sink — serialises reports onto the host UART.
//!
//! One JSON object per line, no pretty-printing. A serialisation failure
//! is logged and the report dropped; the loop never stalls on telemetry.

use log::error;

use crate::app::events::Report;
use crate::app::ports::ReportSink;
use crate::drivers::hw_init;

pub struct SerialReportSink;

impl SerialReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SerialReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for SerialReportSink {
    fn emit(&mut self, report: &Report) {
        match serde_json::to_string(report) {
            Ok(line) => hw_init::host_write_line(&line),
            Err(err) => error!("report serialisation failed: {}", err),
        }
    }
}
