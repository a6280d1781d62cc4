/// Playback state reported by a transport
use crate::types::Song;
use serde::{Deserialize, Serialize};

/// Playback state
///
/// The active states (`Loading`, `Playing`, `Paused`) carry the song the
/// transport is currently working on. The engine relays transport-reported
/// states verbatim; it only produces `Empty` and `Stopped` itself, derived
/// from the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No songs have ever been assigned
    Empty,

    /// Songs present, nothing playing
    Stopped,

    /// Transport is resolving/buffering a song
    Loading(Song),

    /// Currently playing
    Playing(Song),

    /// Paused mid-song
    Paused(Song),

    /// Transport reported a failure
    Error(String),
}

impl PlaybackState {
    /// Whether playback is in one of the active phases
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            PlaybackState::Loading(_) | PlaybackState::Playing(_) | PlaybackState::Paused(_)
        )
    }

    /// The song associated with an active state
    pub fn current_song(&self) -> Option<&Song> {
        match self {
            PlaybackState::Loading(song)
            | PlaybackState::Playing(song)
            | PlaybackState::Paused(song) => Some(song),
            PlaybackState::Empty | PlaybackState::Stopped | PlaybackState::Error(_) => None,
        }
    }

    /// The id of the song associated with an active state
    pub fn current_song_id(&self) -> Option<&str> {
        self.current_song().map(|song| song.id.as_str())
    }
}
