//! Mixtape Core
//!
//! Platform-agnostic core types for Mixtape.
//!
//! This crate provides the domain values shared across the player:
//! - **`Song`**: an immutable track description with play statistics
//! - **`PlaybackState`**: the closed set of playback phases reported by a
//!   transport, plus its derived queries
//!
//! # Example
//!
//! ```rust
//! use mixtape_core::types::{PlaybackState, Song};
//!
//! let song = Song::new("song-1", "Holiday", "Green Day", "American Idiot");
//! let state = PlaybackState::Playing(song);
//!
//! assert!(state.is_active());
//! assert_eq!(state.current_song_id(), Some("song-1"));
//! ```

#![forbid(unsafe_code)]

pub mod types;

// Re-export commonly used types
pub use types::{PlaybackState, Song};
