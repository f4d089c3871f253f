//! Countdown engine for the Podium speaker timer.
//!
//! This crate owns everything that has to be correct about the timer:
//!
//! - [`countdown`] -- the countdown state, its per-tick decrement, and
//!   the warning/past-zero classification and `MM:SS` formatting
//! - [`scheduler`] -- the tick scheduler state machine and its async
//!   run loop (fixed-delay, one tick per second)
//! - [`store`] -- the [`SharedStateStore`], the only cross-thread
//!   boundary between the scheduler and the HTTP poll endpoint
//! - [`display`] -- the [`DisplaySink`] contract implemented by local
//!   renderers (console, secondary full-screen display)
//! - [`roster`] -- the speaker roster the scheduler loads from
//! - [`config`] -- typed YAML configuration
//!
//! # Concurrency model
//!
//! All countdown mutation happens on a single task that owns the
//! [`TickScheduler`](scheduler::TickScheduler) and every registered
//! sink. The HTTP endpoint runs elsewhere and only ever calls
//! [`SharedStateStore::read`](store::SharedStateStore::read); the store's
//! lock is held only for copy-in/copy-out, never across I/O.

pub mod config;
pub mod countdown;
pub mod display;
pub mod roster;
pub mod scheduler;
pub mod store;

// Re-export primary types for convenience.
pub use config::{AppConfig, ConfigError};
pub use countdown::CountdownState;
pub use display::{DisplaySink, NoOpSink};
pub use roster::{RosterError, SpeakerRoster};
pub use scheduler::{Command, SchedulerPhase, TickScheduler, TimerError};
pub use store::SharedStateStore;
