//! Domain types

mod playback_state;
mod song;

pub use playback_state::PlaybackState;
pub use song::Song;
