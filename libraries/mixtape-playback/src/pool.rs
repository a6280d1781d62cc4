//! Capacity-bounded song pool
//!
//! Ordered, deduplicated collection of the songs the user has selected for
//! shuffling. Owned exclusively by the engine; shuffle algorithms only ever
//! see read-only snapshots.

use crate::error::{PlaybackError, Result};
use mixtape_core::Song;
use std::collections::HashSet;

/// Maximum number of songs the pool may hold
pub const MAX_POOL_SIZE: usize = 120;

/// Ordered, deduplicated, capacity-bounded song collection
///
/// Invariants: `len() <= MAX_POOL_SIZE`, no two entries share an id,
/// insertion order is preserved.
#[derive(Debug, Clone, Default)]
pub struct SongPool {
    songs: Vec<Song>,
}

impl SongPool {
    /// Create a new empty pool
    pub fn new() -> Self {
        Self { songs: Vec::new() }
    }

    /// Add a song at the end of the pool
    ///
    /// Re-adding an id already in the pool is a silent no-op returning
    /// `Ok(false)`, so UI retries stay idempotent even at capacity.
    /// A genuinely new song on a full pool fails with `CapacityReached`.
    pub fn add(&mut self, song: Song) -> Result<bool> {
        if self.contains(&song.id) {
            return Ok(false);
        }
        if self.songs.len() >= MAX_POOL_SIZE {
            return Err(PlaybackError::CapacityReached(MAX_POOL_SIZE));
        }
        self.songs.push(song);
        Ok(true)
    }

    /// Remove the song with the given id
    ///
    /// Returns the removed song, or `None` if the id was not present
    /// (not an error).
    pub fn remove(&mut self, id: &str) -> Option<Song> {
        let index = self.songs.iter().position(|song| song.id == id)?;
        Some(self.songs.remove(index))
    }

    /// Empty the pool unconditionally
    pub fn remove_all(&mut self) {
        self.songs.clear();
    }

    /// Whether a song with the given id is in the pool
    pub fn contains(&self, id: &str) -> bool {
        self.songs.iter().any(|song| song.id == id)
    }

    /// Number of songs in the pool
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// All songs in insertion order
    pub fn snapshot(&self) -> Vec<Song> {
        self.songs.clone()
    }

    /// The set of ids currently in the pool
    pub fn ids(&self) -> HashSet<String> {
        self.songs.iter().map(|song| song.id.clone()).collect()
    }
}
