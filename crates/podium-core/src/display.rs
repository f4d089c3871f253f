//! Rendering contract for local displays.
//!
//! A [`DisplaySink`] receives every published snapshot synchronously
//! from the scheduler task. Both the operator console and any secondary
//! full-screen display implement this role identically.

use podium_types::TimerSnapshot;

/// A local renderer of published timer snapshots.
///
/// `update` runs on the scheduler task between ticks and must not block
/// materially. Repeated identical snapshots must be safe to deliver;
/// sinks that animate (blinking on warning/past-zero) drive that on
/// their own timing, decoupled from the one-second tick cadence, purely
/// from the `is_warning`/`is_past_zero` flags.
pub trait DisplaySink: Send {
    /// Render a freshly published snapshot.
    fn update(&mut self, snapshot: &TimerSnapshot);
}

/// A sink that renders nothing. Useful in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl DisplaySink for NoOpSink {
    fn update(&mut self, _snapshot: &TimerSnapshot) {}
}
