//! Error types for the operator console binary.
//!
//! [`AppError`] is the top-level error type that wraps the failure
//! modes `main` can hit during startup and the input loop.

/// Top-level error for the operator console.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: podium_core::ConfigError,
    },

    /// Reading operator input failed.
    #[error("input error: {source}")]
    Input {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
