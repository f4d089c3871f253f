//! Request handlers for the sync endpoint.
//!
//! There is exactly one polled resource: `GET /timer_state`. Each
//! request reads the shared store once and serializes the copy; the
//! store's lock is never held across the response write.

use axum::Json;
use axum::extract::State;
use axum::http::Uri;
use podium_core::SharedStateStore;
use podium_types::TimerSnapshot;

use crate::error::SyncError;

/// Return the latest published timer snapshot.
///
/// The response carries the five-field JSON document that mobile
/// clients render: `time_text`, `speaker_name`, `speaker_segment`,
/// `is_warning`, `is_past_zero`.
pub async fn get_timer_state(State(store): State<SharedStateStore>) -> Json<TimerSnapshot> {
    Json(store.read().await)
}

/// Reject every path outside the sync contract with a 404.
#[allow(clippy::unused_async)] // Axum handlers must be async.
pub async fn not_found(uri: Uri) -> SyncError {
    SyncError::NotFound(format!("no resource at {}", uri.path()))
}
