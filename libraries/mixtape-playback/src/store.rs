//! Pool persistence abstraction
//!
//! Storage stays behind a trait so the engine never depends on a concrete
//! database or file format. The store is a source of an ordered song list
//! replayed through `add_song` at startup, and a sink that receives the
//! pool snapshot after every mutation. Nothing more.

use crate::error::Result;
use async_trait::async_trait;
use mixtape_core::Song;

/// Persistence collaborator for the song pool
#[async_trait]
pub trait PoolStore: Send + Sync {
    /// Load the persisted pool, in insertion order
    async fn load(&self) -> Result<Vec<Song>>;

    /// Persist the current pool snapshot
    async fn save(&self, songs: &[Song]) -> Result<()>;
}
