/// Song domain type
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-selected song
///
/// Identity is `id` alone; every other field is descriptive metadata.
/// The play statistics (`play_count`, `last_played`) are consumed by the
/// weighted shuffle algorithms and never mutated by the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique, stable song identifier
    pub id: String,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Artwork reference (URL or opaque handle)
    pub artwork_url: Option<String>,

    /// How many times the song has been played
    pub play_count: u32,

    /// When the song was last played (`None` = never played)
    pub last_played: Option<DateTime<Utc>>,
}

impl Song {
    /// Create a new song with zeroed play statistics
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            artwork_url: None,
            play_count: 0,
            last_played: None,
        }
    }

    /// Set the play count (builder style)
    #[must_use]
    pub fn with_play_count(mut self, play_count: u32) -> Self {
        self.play_count = play_count;
        self
    }

    /// Set the last-played timestamp (builder style)
    #[must_use]
    pub fn with_last_played(mut self, last_played: DateTime<Utc>) -> Self {
        self.last_played = Some(last_played);
        self
    }

    /// Set the artwork reference (builder style)
    #[must_use]
    pub fn with_artwork_url(mut self, artwork_url: impl Into<String>) -> Self {
        self.artwork_url = Some(artwork_url.into());
        self
    }
}
