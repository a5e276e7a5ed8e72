//! Append-only narrative log of a game.
//!
//! Phase banners start flush left after a blank line; events are indented
//! two spaces. Each line is also emitted as a `tracing` event so a
//! subscriber can follow the game live.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    lines: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    /// Appends a phase banner.
    pub fn phase(&mut self, banner: impl Into<String>) {
        let banner = banner.into();
        tracing::info!(target: "moundbuilders::log", "{}", banner);
        self.lines.push(String::new());
        self.lines.push(banner);
    }

    /// Appends one event line.
    pub fn event(&mut self, text: impl AsRef<str>) {
        let line = format!("  {}", text.as_ref());
        tracing::info!(target: "moundbuilders::log", "{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines appended after the first `n`.
    pub fn since(&self, n: usize) -> &[String] {
        &self.lines[n.min(self.lines.len())..]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banners_and_events() {
        let mut log = EventLog::new();
        log.phase("Turn 1:");
        log.event("Drew 1: Poverty Point");
        assert_eq!(log.lines(), &["", "Turn 1:", "  Drew 1: Poverty Point"]);
        assert_eq!(log.since(2), &["  Drew 1: Poverty Point"]);
        assert!(log.since(10).is_empty());
    }
}
