//! Error types for the shuffle queue engine

use thiserror::Error;

/// Playback engine errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The pool already holds the maximum number of songs
    #[error("Song pool is full ({0} songs)")]
    CapacityReached(usize),

    /// The transport reported a failure
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
