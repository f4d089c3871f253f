//! Console display sink.
//!
//! Renders each published snapshot as one status line on stdout. The
//! alert texts match the full-screen speaker display: `ROUND UP!`
//! inside the warning window, `TIME'S UP!` once past zero.

use podium_core::DisplaySink;
use podium_types::TimerSnapshot;

/// A [`DisplaySink`] that prints a status line per distinct snapshot.
///
/// Repeated identical snapshots are skipped, so redundant publishes
/// (e.g. an idempotent `stop`) do not spam the console.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    last: Option<TimerSnapshot>,
}

impl ConsoleDisplay {
    /// Create a console display with no prior snapshot.
    pub const fn new() -> Self {
        Self { last: None }
    }

    fn alert_text(snapshot: &TimerSnapshot) -> &'static str {
        if snapshot.is_past_zero {
            "  TIME'S UP!"
        } else if snapshot.is_warning {
            "  ROUND UP!"
        } else {
            ""
        }
    }
}

impl DisplaySink for ConsoleDisplay {
    fn update(&mut self, snapshot: &TimerSnapshot) {
        if self.last.as_ref() == Some(snapshot) {
            return;
        }
        println!(
            "[{}] {} | {}{}",
            snapshot.time_text,
            snapshot.speaker_name,
            snapshot.speaker_segment,
            Self::alert_text(snapshot),
        );
        self.last = Some(snapshot.clone());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn alert_text_follows_the_flags() {
        let mut snapshot = TimerSnapshot::default();
        assert_eq!(ConsoleDisplay::alert_text(&snapshot), "");

        snapshot.is_warning = true;
        assert_eq!(ConsoleDisplay::alert_text(&snapshot), "  ROUND UP!");

        snapshot.is_warning = false;
        snapshot.is_past_zero = true;
        assert_eq!(ConsoleDisplay::alert_text(&snapshot), "  TIME'S UP!");
    }

    #[test]
    fn repeated_snapshots_are_rendered_once() {
        let mut display = ConsoleDisplay::new();
        let snapshot = TimerSnapshot::default();
        display.update(&snapshot);
        assert_eq!(display.last.as_ref(), Some(&snapshot));
        // A second identical update keeps the recorded state unchanged.
        display.update(&snapshot);
        assert_eq!(display.last.as_ref(), Some(&snapshot));
    }
}
