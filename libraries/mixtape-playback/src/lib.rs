//! Mixtape Playback
//!
//! The shuffle queue engine for Mixtape: decides in what order a
//! capacity-bounded pool of user-selected songs plays, and keeps an
//! external playback transport's queue consistent with that pool as songs
//! come and go mid-session.
//!
//! This crate provides:
//! - Capacity-bounded song pool (120 songs, deduplicated, insertion order)
//! - Play history derived from the transport's state stream
//! - Five shuffle algorithms (pure random, full shuffle, least recent,
//!   least played, artist spacing)
//! - `QueueEngine` orchestration with a two-phase warm start
//!
//! # Architecture
//!
//! `mixtape-playback` never touches real audio. The transport (the thing
//! that actually plays music and reports state) and pool persistence are
//! provided via traits; everything here is driven by the transport's
//! `PlaybackState` stream and the UI's pool mutations.
//!
//! # Example
//!
//! ```rust,no_run
//! use mixtape_core::Song;
//! use mixtape_playback::{EngineConfig, QueueEngine, ShuffleAlgorithm, Transport};
//! use std::sync::Arc;
//!
//! # async fn example(transport: Arc<dyn Transport>) -> mixtape_playback::Result<()> {
//! let engine = QueueEngine::new(
//!     transport,
//!     EngineConfig {
//!         algorithm: ShuffleAlgorithm::ArtistSpacing,
//!         ..EngineConfig::default()
//!     },
//! );
//!
//! engine.add_song(Song::new("1", "Holiday", "Green Day", "American Idiot")).await?;
//! engine.add_song(Song::new("2", "Clocks", "Coldplay", "A Rush of Blood")).await?;
//! engine.play().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod engine;
mod error;
mod history;
mod pool;
mod shuffle;
mod store;
mod transport;

// Public exports
pub use engine::{EngineConfig, QueueEngine};
pub use error::{PlaybackError, Result};
pub use history::PlayHistory;
pub use pool::{SongPool, MAX_POOL_SIZE};
pub use shuffle::ShuffleAlgorithm;
pub use store::PoolStore;
pub use transport::Transport;
