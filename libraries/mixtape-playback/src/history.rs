//! Play history tracking
//!
//! The transport exposes no explicit "song finished" event, only a stream
//! of state snapshots. The only reliable completion signal is that the
//! reported current song changed, so history is derived by diffing
//! consecutive observed states. A song that starts and is skipped
//! immediately still counts as played; that imprecision is accepted.

use mixtape_core::PlaybackState;
use std::collections::HashSet;

/// Songs already finished this playback session
///
/// Pure transition detector over the observed `PlaybackState` sequence.
/// Lifetime is one session: both fields reset whenever the observed state
/// becomes `Stopped` or `Empty`, and on every fresh `play()`.
#[derive(Debug, Clone, Default)]
pub struct PlayHistory {
    /// Ids of songs that have finished (or been superseded)
    played: HashSet<String>,

    /// Id carried by the most recently observed active state
    last_observed: Option<String>,
}

impl PlayHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one observed playback state, in arrival order
    pub fn observe(&mut self, state: &PlaybackState) {
        let new_id = state.current_song_id();

        // The song that *was* current has finished once the current id changes
        if let Some(last) = &self.last_observed {
            if new_id != Some(last.as_str()) {
                self.played.insert(last.clone());
            }
        }
        self.last_observed = new_id.map(str::to_string);

        // Session boundary
        if matches!(state, PlaybackState::Stopped | PlaybackState::Empty) {
            self.reset();
        }
    }

    /// Clear the session (fresh playback start)
    pub fn reset(&mut self) {
        self.played.clear();
        self.last_observed = None;
    }

    /// Whether the given song has finished this session
    pub fn has_played(&self, id: &str) -> bool {
        self.played.contains(id)
    }

    /// Ids of all songs played this session
    pub fn played_ids(&self) -> &HashSet<String> {
        &self.played
    }

    /// Id of the song the last observed active state referred to
    pub fn last_observed(&self) -> Option<&str> {
        self.last_observed.as_deref()
    }
}
