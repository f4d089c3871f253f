//! Shared type definitions for the Podium speaker timer.
//!
//! This crate is the single source of truth for the data that crosses
//! crate boundaries: the published [`TimerSnapshot`] (which is also the
//! JSON wire schema served to mobile pollers) and the [`Speaker`] roster
//! entry consumed by the countdown engine.

use serde::{Deserialize, Serialize};

/// Placeholder shown for the speaker name and segment when no speaker
/// is loaded.
pub const NO_SPEAKER: &str = "N/A";

/// Immutable published view of the timer state at one tick boundary.
///
/// A snapshot is fully formed before publication and is never mutated
/// afterwards; its fields always correspond to a single countdown state.
/// The serialized form is the complete body of `GET /timer_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Remaining time as zero-padded `MM:SS`, `-`-prefixed once the
    /// countdown has gone negative.
    pub time_text: String,
    /// Display name of the active speaker, or `"N/A"`.
    pub speaker_name: String,
    /// Segment or topic of the active speaker, or `"N/A"`.
    pub speaker_segment: String,
    /// True while `0 <= time_left <= warning_threshold`.
    pub is_warning: bool,
    /// True once `time_left < 0`. Mutually exclusive with `is_warning`.
    pub is_past_zero: bool,
}

impl Default for TimerSnapshot {
    /// The "no speaker" snapshot served before anything is published.
    fn default() -> Self {
        Self {
            time_text: String::from("00:00"),
            speaker_name: String::from(NO_SPEAKER),
            speaker_segment: String::from(NO_SPEAKER),
            is_warning: false,
            is_past_zero: false,
        }
    }
}

/// A roster entry: one speaker with an allocated speaking time.
///
/// Owned by the roster collaborator; the countdown engine only ever
/// reads it on load/reset/advance events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Display name of the speaker.
    pub name: String,
    /// Segment or topic title.
    #[serde(default)]
    pub segment: String,
    /// Allocated minutes (0-999 by convention).
    #[serde(default)]
    pub minutes: u32,
    /// Allocated seconds within the minute (0-59 by convention).
    #[serde(default)]
    pub seconds: u32,
    /// Free-form notes for the operator; never published.
    #[serde(default)]
    pub notes: String,
}

impl Speaker {
    /// Create a speaker with an allocation given as minutes and seconds.
    pub fn new(name: impl Into<String>, segment: impl Into<String>, minutes: u32, seconds: u32) -> Self {
        Self {
            name: name.into(),
            segment: segment.into(),
            minutes,
            seconds,
            notes: String::new(),
        }
    }

    /// Total allocated speaking time in seconds.
    pub fn allocated_seconds(&self) -> i64 {
        i64::from(self.minutes)
            .saturating_mul(60)
            .saturating_add(i64::from(self.seconds))
    }
}
