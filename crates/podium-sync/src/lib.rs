//! Mobile sync endpoint for the Podium speaker timer.
//!
//! This crate provides the Axum HTTP server that phones and tablets on
//! the venue's local network poll for the current timer state:
//!
//! - `GET /timer_state` -- the latest published [`TimerSnapshot`]
//!   serialized as JSON, with permissive CORS for browser clients
//! - any other path -- `404`
//!
//! # Architecture
//!
//! The server runs on its own background task, fully decoupled from the
//! tick scheduler. Every request performs one
//! [`SharedStateStore::read`](podium_core::SharedStateStore::read) --
//! a brief lock-guarded copy -- so serving pollers can never block the
//! countdown, and vice versa. There are no write endpoints, no
//! authentication, and no persisted state: a fresh run serves the
//! default "no speaker" snapshot until the scheduler publishes.
//!
//! Delivery is strictly poll-based; clients repeat the request on
//! whatever cadence suits them.
//!
//! [`TimerSnapshot`]: podium_types::TimerSnapshot

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError};
pub use startup::{SyncHandle, spawn_sync};
