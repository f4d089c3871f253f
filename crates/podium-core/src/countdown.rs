//! Countdown state, classification, and time formatting.
//!
//! [`CountdownState`] is the single source of truth for remaining time.
//! The warning and past-zero flags and the `MM:SS` text are always
//! derived from `time_left` -- never stored independently -- so a
//! snapshot taken at any tick boundary is internally consistent by
//! construction.

use podium_types::{Speaker, TimerSnapshot};

/// Seconds per minute, for `MM:SS` formatting.
const SECONDS_PER_MINUTE: u64 = 60;

/// Countdown state owned and mutated exclusively by the scheduler task.
///
/// `time_left` is signed: it keeps counting down past zero so the
/// display can show how far over time the speaker has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    /// Remaining seconds; negative once the speaker is over time.
    time_left: i64,
    /// Whether the countdown is currently ticking.
    running: bool,
    /// Remaining-time threshold at or below which the warning state
    /// is raised (while still non-negative).
    warning_threshold: i64,
}

impl CountdownState {
    /// Create a stopped countdown at zero with the given warning
    /// threshold in seconds.
    pub const fn new(warning_threshold: i64) -> Self {
        Self {
            time_left: 0,
            running: false,
            warning_threshold,
        }
    }

    /// Remaining seconds (negative once past zero).
    pub const fn time_left(&self) -> i64 {
        self.time_left
    }

    /// Whether the countdown is currently ticking.
    pub const fn running(&self) -> bool {
        self.running
    }

    /// The configured warning threshold in seconds.
    pub const fn warning_threshold(&self) -> i64 {
        self.warning_threshold
    }

    /// Replace the remaining time wholesale (speaker load or reset).
    pub const fn set_time_left(&mut self, seconds: i64) {
        self.time_left = seconds;
    }

    /// Mark the countdown running or stopped.
    pub const fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Advance the countdown by one tick.
    ///
    /// Decrements `time_left` by exactly 1 while running; a stopped
    /// countdown is left untouched.
    pub const fn tick(&mut self) {
        if self.running {
            self.time_left = self.time_left.saturating_sub(1);
        }
    }

    /// True while the remaining time is inside the warning window:
    /// `0 <= time_left <= warning_threshold`.
    pub const fn is_warning(&self) -> bool {
        0 <= self.time_left && self.time_left <= self.warning_threshold
    }

    /// True once the countdown has gone negative. Mutually exclusive
    /// with [`is_warning`](Self::is_warning) by construction.
    pub const fn is_past_zero(&self) -> bool {
        self.time_left < 0
    }

    /// The remaining time as zero-padded `MM:SS`, `-`-prefixed once
    /// negative. Computed from `abs(time_left)`.
    pub fn time_text(&self) -> String {
        format_time(self.time_left)
    }

    /// Derive the published snapshot for the given active speaker.
    ///
    /// With no speaker loaded there is nothing to classify, so the
    /// idle placeholder document is returned with both flags clear.
    /// The snapshot is fully formed here, before publication, so the
    /// store can never hold a partially-written view.
    pub fn snapshot(&self, speaker: Option<&Speaker>) -> TimerSnapshot {
        let Some(speaker) = speaker else {
            return TimerSnapshot::default();
        };
        TimerSnapshot {
            time_text: self.time_text(),
            speaker_name: speaker.name.clone(),
            speaker_segment: speaker.segment.clone(),
            is_warning: self.is_warning(),
            is_past_zero: self.is_past_zero(),
        }
    }
}

/// Format a signed second count as zero-padded `MM:SS`, prefixed with
/// `-` when negative.
pub fn format_time(seconds: i64) -> String {
    let magnitude = seconds.unsigned_abs();
    let minutes = magnitude.checked_div(SECONDS_PER_MINUTE).unwrap_or(0);
    let secs = magnitude.checked_rem(SECONDS_PER_MINUTE).unwrap_or(0);
    if seconds < 0 {
        format!("-{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
