//! Host serial link — newline-delimited command assembly.
//!
//! Reads raw bytes from the host UART and assembles them into text lines.
//! A line is complete at `\n`; the terminator and any surrounding
//! whitespace (including `\r` from CRLF hosts) are stripped before the
//! line is handed to the dispatcher. An empty line still counts as a
//! received command, matching the legacy host protocol.
//!
//! Lines longer than [`LINE_CAP`] bytes are truncated; the overflowing
//! bytes are dropped until the next terminator.

use std::collections::VecDeque;

use heapless::Vec;

use crate::drivers::hw_init;

/// Maximum command length in bytes, excluding the terminator.
pub const LINE_CAP: usize = 128;

const READ_CHUNK: usize = 64;

pub struct CommandLink {
    line: Vec<u8, LINE_CAP>,
    ready: VecDeque<String>,
}

impl CommandLink {
    pub fn new() -> Self {
        Self {
            line: Vec::new(),
            ready: VecDeque::new(),
        }
    }

    /// Drain the host UART and return the next complete command line, if
    /// any. Call repeatedly until it returns `None` to process every line
    /// that arrived since the last poll.
    pub fn poll_line(&mut self) -> Option<String> {
        if let Some(text) = self.ready.pop_front() {
            return Some(text);
        }

        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = hw_init::host_read(&mut chunk);
            if n == 0 {
                break;
            }
            for &byte in &chunk[..n] {
                self.accept(byte);
            }
            if n < chunk.len() {
                break;
            }
        }

        self.ready.pop_front()
    }

    /// Feed one raw byte into the line assembler.
    pub fn accept(&mut self, byte: u8) {
        if byte == b'\n' {
            let text = String::from_utf8_lossy(&self.line).trim().to_string();
            self.line.clear();
            self.ready.push_back(text);
        } else {
            // Overlong lines are truncated at LINE_CAP.
            let _ = self.line.push(byte);
        }
    }
}

impl Default for CommandLink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(link: &mut CommandLink, bytes: &[u8]) {
        for &b in bytes {
            link.accept(b);
        }
    }

    #[test]
    fn assembles_newline_terminated_line() {
        let mut link = CommandLink::new();
        feed(&mut link, b"STATUS\n");
        assert_eq!(link.ready.pop_front().as_deref(), Some("STATUS"));
    }

    #[test]
    fn strips_carriage_return_and_spaces() {
        let mut link = CommandLink::new();
        feed(&mut link, b"  RELE_ON \r\n");
        assert_eq!(link.ready.pop_front().as_deref(), Some("RELE_ON"));
    }

    #[test]
    fn partial_line_stays_buffered() {
        let mut link = CommandLink::new();
        feed(&mut link, b"RELE_");
        assert!(link.ready.is_empty());
        feed(&mut link, b"OFF\n");
        assert_eq!(link.ready.pop_front().as_deref(), Some("RELE_OFF"));
    }

    #[test]
    fn multiple_lines_in_one_burst() {
        let mut link = CommandLink::new();
        feed(&mut link, b"STATUS\nRESET\n");
        assert_eq!(link.ready.pop_front().as_deref(), Some("STATUS"));
        assert_eq!(link.ready.pop_front().as_deref(), Some("RESET"));
        assert!(link.ready.is_empty());
    }

    #[test]
    fn blank_line_is_still_delivered() {
        let mut link = CommandLink::new();
        feed(&mut link, b"\r\n");
        assert_eq!(link.ready.pop_front().as_deref(), Some(""));
    }

    #[test]
    fn overlong_line_is_truncated_not_split() {
        let mut link = CommandLink::new();
        let long = [b'A'; LINE_CAP + 40];
        feed(&mut link, &long);
        feed(&mut link, b"\n");
        let line = link.ready.pop_front().unwrap();
        assert_eq!(line.len(), LINE_CAP);
        assert!(link.ready.is_empty());
    }
}
