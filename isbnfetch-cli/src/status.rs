//! The transient status line.
//!
//! Progress messages rewrite a single line so a long run does not scroll the
//! terminal, while warnings and errors go through the logger and stay
//! visible. Both sinks share stderr, so the loop clears the status line
//! before emitting any durable line.

use std::io::{self, Write};

use chrono::Local;

pub struct StatusLine<W: Write> {
    out: W,
    enabled: bool,
    width: usize,
}

impl StatusLine<io::Stderr> {
    pub fn stderr(enabled: bool) -> Self {
        Self::new(io::stderr(), enabled)
    }
}

impl<W: Write> StatusLine<W> {
    pub const fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            width: 0,
        }
    }

    /// Replaces the current status line with `message`.
    ///
    /// Write failures are swallowed: status output is best effort and must
    /// never fail the run.
    pub fn set(&mut self, message: &str) {
        if !self.enabled {
            return;
        }
        let width = message.chars().count();
        let pad = self.width.saturating_sub(width);
        let _ = write!(self.out, "\r{message}{:pad$}", "");
        let _ = self.out.flush();
        self.width = width;
    }

    /// Blanks the status line so the next stderr line starts clean.
    pub fn clear(&mut self) {
        if !self.enabled || self.width == 0 {
            return;
        }
        let _ = write!(self.out, "\r{:width$}\r", "", width = self.width);
        let _ = self.out.flush();
        self.width = 0;
    }
}

/// Local wall-clock time for status and summary prefixes.
pub fn now_string() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::StatusLine;

    fn rendered(status: StatusLine<Vec<u8>>) -> String {
        String::from_utf8(status.out).unwrap()
    }

    #[test]
    fn set_rewrites_from_the_line_start() {
        let mut status = StatusLine::new(Vec::new(), true);
        status.set("Requesting details...");
        status.set("Saving details...");

        assert_eq!(
            "\rRequesting details...\rSaving details...    ",
            rendered(status)
        );
    }

    #[test]
    fn shorter_messages_pad_out_the_previous_one() {
        let mut status = StatusLine::new(Vec::new(), true);
        status.set("a long status message");
        status.set("short");

        let out = rendered(status);
        let last = out.rsplit('\r').next().unwrap();
        assert_eq!("a long status message".len(), last.len());
        assert!(last.starts_with("short"));
    }

    #[test]
    fn clear_blanks_the_line_and_resets() {
        let mut status = StatusLine::new(Vec::new(), true);
        status.set("busy");
        status.clear();
        // a second clear is a no-op
        status.clear();

        assert_eq!("\rbusy\r    \r", rendered(status));
    }

    #[test]
    fn disabled_status_line_writes_nothing() {
        let mut status = StatusLine::new(Vec::new(), false);
        status.set("busy");
        status.clear();

        assert!(rendered(status).is_empty());
    }
}
