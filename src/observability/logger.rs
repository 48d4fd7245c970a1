//! Structured JSON logger
//!
//! Every event is a single JSON object on one line: `event` first, then
//! `severity`, then the caller's fields sorted by key. Warnings and above
//! go to stderr, everything else to stdout. Writes are synchronous and
//! unbuffered; a failover daemon logs rarely enough that losing events to
//! buffering would cost more than the syscalls do.

use std::fmt;
use std::io::{self, Write};

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Phase-by-phase operation detail
    Trace,
    /// Normal operations
    Info,
    /// Recoverable anomalies (e.g. a verification miss)
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous structured logger.
pub struct Logger;

impl Logger {
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Trace, event, fields);
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Warn, event, fields);
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Error, event, fields);
    }

    fn emit(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if severity >= Severity::Warn {
            Self::write_event(severity, event, fields, &mut io::stderr());
        } else {
            Self::write_event(severity, event, fields, &mut io::stdout());
        }
    }

    fn write_event<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = String::with_capacity(128);

        line.push_str("{\"event\":\"");
        Self::push_escaped(&mut line, event);
        line.push_str("\",\"severity\":\"");
        line.push_str(severity.as_str());
        line.push('"');

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted {
            line.push_str(",\"");
            Self::push_escaped(&mut line, key);
            line.push_str("\":\"");
            Self::push_escaped(&mut line, value);
            line.push('"');
        }

        line.push_str("}\n");

        // One write_all per event keeps lines intact across tasks.
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    fn push_escaped(line: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => line.push_str("\\\""),
                '\\' => line.push_str("\\\\"),
                '\n' => line.push_str("\\n"),
                '\r' => line.push_str("\\r"),
                '\t' => line.push_str("\\t"),
                c if c.is_control() => {
                    line.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => line.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut buffer = Vec::new();
        Logger::write_event(severity, event, fields, &mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_event_is_valid_json() {
        let line = capture(Severity::Info, "PROMOTE_CONVERGED", &[("node", "node-b")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["event"], "PROMOTE_CONVERGED");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["node"], "node-b");
    }

    #[test]
    fn test_fields_sorted_deterministically() {
        let a = capture(Severity::Trace, "E", &[("to", "x"), ("from", "y"), ("node", "n")]);
        let b = capture(Severity::Trace, "E", &[("node", "n"), ("to", "x"), ("from", "y")]);
        assert_eq!(a, b);

        let from = a.find("from").unwrap();
        let node = a.find("node").unwrap();
        let to = a.find("\"to\"").unwrap();
        assert!(from < node && node < to);
    }

    #[test]
    fn test_one_line_per_event() {
        let line = capture(Severity::Warn, "PROMOTE_VERIFY_MISS", &[("attempt", "2")]);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_values_are_escaped() {
        let line = capture(Severity::Error, "E", &[("msg", "a \"quoted\"\nvalue")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["msg"], "a \"quoted\"\nvalue");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }
}
