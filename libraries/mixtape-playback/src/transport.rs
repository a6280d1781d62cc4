//! Playback transport abstraction
//!
//! The engine never performs real playback. It talks to an external
//! transport through this trait: queue replacement, the two-phase warm
//! start, and the basic playback verbs. The transport reports its own
//! state back through a broadcast stream; the engine relays those states
//! verbatim and never constructs the active ones itself.

use crate::error::Result;
use async_trait::async_trait;
use mixtape_core::{PlaybackState, Song};
use tokio::sync::broadcast;

/// External playback transport
///
/// All commands are asynchronous and may fail; the engine only cares
/// whether a call succeeded, never about transport-specific error types.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Replace the transport's queue with the given songs
    async fn set_queue(&self, songs: Vec<Song>) -> Result<()>;

    /// First phase of a warm start: the short head of the queue
    async fn set_initial_queue(&self, songs: Vec<Song>) -> Result<()>;

    /// Second phase of a warm start: append the rest to the queue tail
    async fn append_to_queue(&self, songs: Vec<Song>) -> Result<()>;

    /// Begin playback of the current queue
    async fn play(&self) -> Result<()>;

    /// Pause playback
    async fn pause(&self) -> Result<()>;

    /// Skip to the next queued song
    async fn skip_to_next(&self) -> Result<()>;

    /// Restart the currently playing song from the beginning
    async fn restart_current_song(&self) -> Result<()>;

    /// Subscribe to the transport's playback state stream
    fn subscribe(&self) -> broadcast::Receiver<PlaybackState>;
}
