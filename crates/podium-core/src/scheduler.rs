//! Tick scheduler: the countdown state machine and its run loop.
//!
//! [`TickScheduler`] owns the [`CountdownState`], the roster, and every
//! registered [`DisplaySink`]. All mutation happens on the single task
//! that drives [`TickScheduler::run`], which multiplexes a command
//! channel against the tick deadline. On every state-affecting event
//! (tick, load, reset, start, stop) a fresh snapshot is derived,
//! published into the [`SharedStateStore`], and pushed synchronously to
//! each sink.
//!
//! # Scheduling semantics
//!
//! Ticks are **fixed-delay**: the next deadline is armed one interval
//! after the current tick finishes processing. There is no compensation
//! for processing latency or missed ticks, so the countdown measures
//! elapsed ticks, not wall-clock time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::countdown::CountdownState;
use crate::display::DisplaySink;
use crate::roster::{RosterError, SpeakerRoster};
use crate::store::SharedStateStore;

/// The default tick interval: one second of wall time.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Errors that block [`TickScheduler::start`].
///
/// Both are non-fatal: the scheduler stays in its current phase and the
/// countdown state is left unchanged (beyond any speaker auto-load).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimerError {
    /// No speaker is loaded and the roster is empty.
    #[error("no active speaker: add a speaker to the roster before starting")]
    NoActiveSpeaker,

    /// The active speaker has a zero time allocation.
    #[error("active speaker has a 00:00 allocation: update their time before starting")]
    ZeroAllocation,
}

/// Lifecycle phase of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// No speaker has ever been loaded.
    Idle,
    /// A speaker is loaded but the countdown is not ticking.
    Stopped,
    /// The countdown is ticking once per interval.
    Running,
}

/// Commands accepted by the scheduler run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin (or resume) the countdown.
    Start,
    /// Halt future ticks without altering the remaining time.
    Stop,
    /// Restore the active speaker's allocation (valid while stopped).
    Reset,
    /// Stop, advance the roster cursor with wrap-around, and load.
    NextSpeaker,
    /// Stop and load the speaker at the given roster index.
    LoadSpeaker(usize),
    /// End the run loop.
    Shutdown,
}

/// The countdown tick scheduler.
///
/// Construct with [`TickScheduler::new`], register sinks, then hand
/// ownership to [`TickScheduler::run`] on the task that will own all
/// timer state for the lifetime of the process.
pub struct TickScheduler {
    countdown: CountdownState,
    roster: SpeakerRoster,
    store: SharedStateStore,
    sinks: Vec<Box<dyn DisplaySink>>,
    tick_interval: Duration,
}

impl TickScheduler {
    /// Create a scheduler with the given warning threshold (seconds),
    /// roster, and snapshot store. No speaker is loaded initially.
    pub const fn new(warning_threshold: i64, roster: SpeakerRoster, store: SharedStateStore) -> Self {
        Self {
            countdown: CountdownState::new(warning_threshold),
            roster,
            store,
            sinks: Vec::new(),
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Override the tick interval (the default is one second).
    /// Scheduling stays fixed-delay at any interval.
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Register a display sink. Every published snapshot is pushed to
    /// each registered sink in registration order.
    pub fn register_sink(&mut self, sink: Box<dyn DisplaySink>) {
        self.sinks.push(sink);
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> SchedulerPhase {
        if self.countdown.running() {
            SchedulerPhase::Running
        } else if self.roster.current().is_some() {
            SchedulerPhase::Stopped
        } else {
            SchedulerPhase::Idle
        }
    }

    /// Read access to the countdown state (tests and status displays).
    pub const fn countdown(&self) -> &CountdownState {
        &self.countdown
    }

    /// Read access to the roster.
    pub const fn roster(&self) -> &SpeakerRoster {
        &self.roster
    }

    /// Derive the current snapshot, publish it to the store, and push
    /// it to every registered sink.
    async fn publish(&mut self) {
        let snapshot = self.countdown.snapshot(self.roster.current());
        self.store.publish(snapshot.clone()).await;
        for sink in &mut self.sinks {
            sink.update(&snapshot);
        }
    }

    /// Begin the countdown.
    ///
    /// If no speaker is loaded but the roster has entries, the first
    /// speaker is loaded before starting. Already running is a no-op.
    ///
    /// # Errors
    ///
    /// [`TimerError::NoActiveSpeaker`] if nothing is loaded and the
    /// roster is empty; [`TimerError::ZeroAllocation`] if the active
    /// speaker's allocation is zero. The countdown stays stopped in
    /// both cases.
    pub async fn start(&mut self) -> Result<(), TimerError> {
        if self.countdown.running() {
            return Ok(());
        }

        if self.roster.current().is_none() {
            if self.roster.is_empty() {
                return Err(TimerError::NoActiveSpeaker);
            }
            // Nothing selected yet: fall back to the first roster entry.
            self.load_speaker(0)
                .await
                .map_err(|_| TimerError::NoActiveSpeaker)?;
        }

        let allocation = self
            .roster
            .current()
            .map_or(0, podium_types::Speaker::allocated_seconds);
        if allocation == 0 {
            return Err(TimerError::ZeroAllocation);
        }

        self.countdown.set_running(true);
        info!(
            speaker = self.roster.current().map(|s| s.name.as_str()),
            time_left = self.countdown.time_left(),
            "countdown started"
        );
        self.publish().await;
        Ok(())
    }

    /// Halt future ticks. Idempotent; the remaining time is untouched.
    pub async fn stop(&mut self) {
        if self.countdown.running() {
            info!(time_left = self.countdown.time_left(), "countdown stopped");
        }
        self.countdown.set_running(false);
        self.publish().await;
    }

    /// Restore the active speaker's allocation (0 if none is loaded).
    ///
    /// Valid only while stopped; while running the call is ignored with
    /// a warning, leaving the countdown untouched.
    pub async fn reset(&mut self) {
        if self.countdown.running() {
            warn!("reset ignored: countdown is running, stop it first");
            return;
        }
        let allocation = self
            .roster
            .current()
            .map_or(0, podium_types::Speaker::allocated_seconds);
        self.countdown.set_time_left(allocation);
        info!(time_left = allocation, "countdown reset");
        self.publish().await;
    }

    /// Load the speaker at the given roster index: the countdown is
    /// forced stopped and the remaining time is replaced by the
    /// speaker's allocation.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::OutOfBounds`] if the index does not exist;
    /// the countdown is left unchanged.
    pub async fn load_speaker(&mut self, index: usize) -> Result<(), RosterError> {
        let allocation = self.roster.select(index)?.allocated_seconds();
        self.countdown.set_running(false);
        self.countdown.set_time_left(allocation);
        info!(
            index,
            speaker = self.roster.current().map(|s| s.name.as_str()),
            time_left = allocation,
            "speaker loaded"
        );
        self.publish().await;
        Ok(())
    }

    /// Stop the countdown and advance to the next roster entry with
    /// wrap-around, loading its allocation. On an empty roster the
    /// countdown is cleared to zero with no speaker.
    pub async fn next_speaker(&mut self) {
        self.countdown.set_running(false);
        let allocation = self
            .roster
            .advance()
            .map_or(0, podium_types::Speaker::allocated_seconds);
        self.countdown.set_time_left(allocation);
        info!(
            speaker = self.roster.current().map(|s| s.name.as_str()),
            time_left = allocation,
            "advanced to next speaker"
        );
        self.publish().await;
    }

    /// Execute one tick: decrement, reclassify, republish.
    async fn tick(&mut self) {
        self.countdown.tick();
        debug!(
            time_left = self.countdown.time_left(),
            warning = self.countdown.is_warning(),
            past_zero = self.countdown.is_past_zero(),
            "tick"
        );
        self.publish().await;
    }

    /// Drive the scheduler until the command channel closes or a
    /// [`Command::Shutdown`] arrives.
    ///
    /// While running, a tick fires when the armed deadline elapses and
    /// the next deadline is armed one interval *after* tick processing
    /// completes (fixed-delay). A deadline already in flight is not
    /// cancellable mid-tick; `stop()` only prevents future arming.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut next_tick: Option<Instant> = None;

        loop {
            let command = if let Some(deadline) = next_tick {
                tokio::select! {
                    received = commands.recv() => match received {
                        Some(command) => Some(command),
                        None => break,
                    },
                    () = time::sleep_until(deadline) => {
                        self.tick().await;
                        next_tick = if self.countdown.running() {
                            Instant::now().checked_add(self.tick_interval)
                        } else {
                            None
                        };
                        None
                    }
                }
            } else {
                match commands.recv().await {
                    Some(command) => Some(command),
                    None => break,
                }
            };

            let Some(command) = command else { continue };
            match command {
                Command::Start => {
                    if self.countdown.running() {
                        debug!("start ignored: countdown already running");
                    } else {
                        match self.start().await {
                            // First tick fires one interval after start.
                            Ok(()) => next_tick = Instant::now().checked_add(self.tick_interval),
                            Err(err) => warn!(%err, "start rejected"),
                        }
                    }
                }
                Command::Stop => {
                    self.stop().await;
                    next_tick = None;
                }
                Command::Reset => self.reset().await,
                Command::NextSpeaker => {
                    self.next_speaker().await;
                    next_tick = None;
                }
                Command::LoadSpeaker(index) => match self.load_speaker(index).await {
                    Ok(()) => next_tick = None,
                    Err(err) => warn!(%err, "load rejected"),
                },
                Command::Shutdown => {
                    info!("scheduler shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use podium_types::{Speaker, TimerSnapshot};

    use super::*;
    use crate::display::NoOpSink;

    /// Sink that records every snapshot it receives.
    #[derive(Clone, Default)]
    struct RecordingSink {
        updates: Arc<Mutex<Vec<TimerSnapshot>>>,
    }

    impl DisplaySink for RecordingSink {
        fn update(&mut self, snapshot: &TimerSnapshot) {
            if let Ok(mut updates) = self.updates.lock() {
                updates.push(snapshot.clone());
            }
        }
    }

    fn roster_with(speakers: &[(&str, u32, u32)]) -> SpeakerRoster {
        let mut roster = SpeakerRoster::new();
        for (name, minutes, seconds) in speakers {
            roster.add(Speaker::new(*name, "Segment", *minutes, *seconds));
        }
        roster
    }

    #[tokio::test]
    async fn start_with_empty_roster_fails_and_leaves_state_unchanged() {
        let store = SharedStateStore::new();
        let mut scheduler = TickScheduler::new(60, SpeakerRoster::new(), store.clone());

        let before = scheduler.countdown().clone();
        let result = scheduler.start().await;
        assert_eq!(result, Err(TimerError::NoActiveSpeaker));
        assert_eq!(scheduler.countdown(), &before);
        assert_eq!(scheduler.phase(), SchedulerPhase::Idle);
        // Nothing was published either: the store still serves the default.
        assert_eq!(store.read().await, TimerSnapshot::default());
    }

    #[tokio::test]
    async fn start_with_zero_allocation_fails() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Empty", 0, 0)]);
        let mut scheduler = TickScheduler::new(60, roster, store);

        let result = scheduler.start().await;
        assert_eq!(result, Err(TimerError::ZeroAllocation));
        assert_eq!(scheduler.phase(), SchedulerPhase::Stopped);
        assert!(!scheduler.countdown().running());
    }

    #[tokio::test]
    async fn start_auto_loads_the_first_speaker() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 5, 0), ("Grace", 3, 0)]);
        let mut scheduler = TickScheduler::new(60, roster, store.clone());

        scheduler.start().await.unwrap();
        assert_eq!(scheduler.phase(), SchedulerPhase::Running);
        assert_eq!(scheduler.countdown().time_left(), 300);

        let snap = store.read().await;
        assert_eq!(snap.speaker_name, "Ada");
        assert_eq!(snap.time_text, "05:00");
    }

    #[tokio::test]
    async fn stop_is_idempotent_and_preserves_time_left() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 2, 30)]);
        let mut scheduler = TickScheduler::new(60, roster, store);

        scheduler.start().await.unwrap();
        scheduler.stop().await;
        scheduler.stop().await;
        assert_eq!(scheduler.countdown().time_left(), 150);
        assert_eq!(scheduler.phase(), SchedulerPhase::Stopped);
    }

    #[tokio::test]
    async fn reset_while_stopped_restores_the_allocation() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 2, 5)]);
        let mut scheduler = TickScheduler::new(60, roster, store.clone());

        scheduler.start().await.unwrap();
        scheduler.tick().await;
        scheduler.tick().await;
        scheduler.stop().await;
        assert_eq!(scheduler.countdown().time_left(), 123);

        scheduler.reset().await;
        assert_eq!(scheduler.countdown().time_left(), 125);
        assert_eq!(store.read().await.time_text, "02:05");
    }

    #[tokio::test]
    async fn reset_while_running_is_ignored() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 2, 0)]);
        let mut scheduler = TickScheduler::new(60, roster, store);

        scheduler.start().await.unwrap();
        scheduler.tick().await;
        scheduler.reset().await;
        assert_eq!(scheduler.countdown().time_left(), 119);
        assert!(scheduler.countdown().running());
    }

    #[tokio::test]
    async fn loading_a_speaker_forces_stopped_with_a_fresh_allocation() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 5, 0), ("Grace", 3, 0)]);
        let mut scheduler = TickScheduler::new(60, roster, store.clone());

        scheduler.start().await.unwrap();
        scheduler.tick().await;
        scheduler.load_speaker(1).await.unwrap();

        assert_eq!(scheduler.phase(), SchedulerPhase::Stopped);
        assert_eq!(scheduler.countdown().time_left(), 180);
        assert_eq!(store.read().await.speaker_name, "Grace");
    }

    #[tokio::test]
    async fn next_speaker_wraps_around_the_roster() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 5, 0), ("Grace", 3, 0)]);
        let mut scheduler = TickScheduler::new(60, roster, store.clone());

        scheduler.next_speaker().await;
        assert_eq!(store.read().await.speaker_name, "Ada");
        scheduler.next_speaker().await;
        assert_eq!(store.read().await.speaker_name, "Grace");
        scheduler.next_speaker().await;
        assert_eq!(store.read().await.speaker_name, "Ada");
        assert_eq!(scheduler.countdown().time_left(), 300);
    }

    #[tokio::test]
    async fn sinks_receive_the_same_snapshot_as_the_store() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 0, 3)]);
        let mut scheduler = TickScheduler::new(60, roster, store.clone());
        let sink = RecordingSink::default();
        // A silent sink ahead of the recorder: dispatch must reach
        // every registered sink in order.
        scheduler.register_sink(Box::new(NoOpSink));
        scheduler.register_sink(Box::new(sink.clone()));

        scheduler.start().await.unwrap();
        scheduler.tick().await;

        // Auto-load, start, and tick each republish.
        let updates = sink.updates.lock().unwrap().clone();
        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].time_text, "00:03");
        assert_eq!(updates[1].time_text, "00:03");
        assert_eq!(updates.last().unwrap(), &store.read().await);
        assert_eq!(updates.last().unwrap().time_text, "00:02");
    }

    #[tokio::test(start_paused = true)]
    async fn run_loop_ticks_once_per_interval() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 0, 5)]);
        let scheduler = TickScheduler::new(60, roster, store.clone());
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(scheduler.run(rx));

        tx.send(Command::Start).await.unwrap();
        // Paused time: sleeps resolve deterministically in virtual time.
        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(store.read().await.time_text, "00:02");

        tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn run_loop_stop_halts_future_ticks() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 0, 30)]);
        let scheduler = TickScheduler::new(60, roster, store.clone());
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(scheduler.run(rx));

        tx.send(Command::Start).await.unwrap();
        time::sleep(Duration::from_millis(2500)).await;
        tx.send(Command::Stop).await.unwrap();
        let frozen = store.read().await.time_text;
        assert_eq!(frozen, "00:28");

        // Any amount of elapsed time changes nothing until started again.
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(store.read().await.time_text, frozen);

        tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn run_loop_counts_into_overtime() {
        let store = SharedStateStore::new();
        let roster = roster_with(&[("Ada", 0, 2)]);
        let scheduler = TickScheduler::new(60, roster, store.clone());
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(scheduler.run(rx));

        tx.send(Command::Start).await.unwrap();
        time::sleep(Duration::from_millis(3500)).await;

        let snap = store.read().await;
        assert_eq!(snap.time_text, "-00:01");
        assert!(snap.is_past_zero);
        assert!(!snap.is_warning);

        tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
    }
}
