//! Shuffle algorithms for queue ordering
//!
//! Five strategies with different statistical guarantees, selected by a
//! closed enum so a missing arm is a compile error rather than a silent
//! fallback. All of them are pure functions of their input plus the
//! thread-local RNG; no state is carried between calls.

use mixtape_core::Song;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Queue ordering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShuffleAlgorithm {
    /// Independent uniform samples with replacement
    PureRandom,

    /// Unbiased permutation of the whole input, every song exactly once
    #[default]
    FullShuffle,

    /// Permutation biased towards songs not played recently
    LeastRecent,

    /// Permutation biased towards songs with low play counts
    LeastPlayed,

    /// Permutation that keeps same-artist songs apart where possible
    ArtistSpacing,
}

impl ShuffleAlgorithm {
    /// Produce a play sequence from the given songs
    ///
    /// `count` is only meaningful for `PureRandom` (default: input length);
    /// the permutation-based algorithms always return every input song
    /// exactly once. Empty input yields empty output for every algorithm.
    pub fn shuffle(&self, songs: &[Song], count: Option<usize>) -> Vec<Song> {
        if songs.is_empty() {
            return Vec::new();
        }

        let mut rng = thread_rng();
        match self {
            ShuffleAlgorithm::PureRandom => {
                sample_with_replacement(songs, count.unwrap_or(songs.len()), &mut rng)
            }
            ShuffleAlgorithm::FullShuffle => full_shuffle(songs, &mut rng),
            ShuffleAlgorithm::LeastRecent => {
                let mut sorted = songs.to_vec();
                // Option sorts None first, so never-played songs rank earliest
                sorted.sort_by_key(|song| song.last_played);
                tiered_shuffle(sorted, &mut rng)
            }
            ShuffleAlgorithm::LeastPlayed => {
                let mut sorted = songs.to_vec();
                sorted.sort_by_key(|song| song.play_count);
                tiered_shuffle(sorted, &mut rng)
            }
            ShuffleAlgorithm::ArtistSpacing => artist_spacing(songs, &mut rng),
        }
    }
}

/// Uniform sampling with replacement
///
/// Duplicates are possible, and guaranteed once `count` exceeds the number
/// of distinct inputs.
fn sample_with_replacement(songs: &[Song], count: usize, rng: &mut impl Rng) -> Vec<Song> {
    (0..count)
        .map(|_| songs[rng.gen_range(0..songs.len())].clone())
        .collect()
}

/// Fisher-Yates permutation of the whole input
fn full_shuffle(songs: &[Song], rng: &mut impl Rng) -> Vec<Song> {
    let mut shuffled = songs.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Shuffle within contiguous priority tiers
///
/// Input must already be sorted ascending by priority. Tiers of
/// `max(1, n/10)` songs are shuffled internally and concatenated, so
/// high-priority songs are front-loaded without making the order fully
/// deterministic.
fn tiered_shuffle(mut sorted: Vec<Song>, rng: &mut impl Rng) -> Vec<Song> {
    let tier_size = (sorted.len() / 10).max(1);
    for tier in sorted.chunks_mut(tier_size) {
        tier.shuffle(rng);
    }
    sorted
}

/// Greedy artist spacing over a random permutation
///
/// Walks a fresh permutation preferring the next unplaced song whose
/// artist is not among the last `min(3, distinct_artists - 1)` chosen.
/// When no such song remains the constraint relaxes in two steps: first
/// to avoiding only the immediately previous artist, then to taking any
/// remaining song. Single-artist input makes the window zero, so the
/// permutation passes through untouched.
fn artist_spacing(songs: &[Song], rng: &mut impl Rng) -> Vec<Song> {
    let mut remaining = full_shuffle(songs, rng);

    let distinct_artists = remaining
        .iter()
        .map(|song| song.artist.as_str())
        .collect::<HashSet<_>>()
        .len();
    let window = 3.min(distinct_artists.saturating_sub(1));
    if window == 0 {
        return remaining;
    }

    let mut result = Vec::with_capacity(remaining.len());
    let mut recent: VecDeque<String> = VecDeque::with_capacity(window);

    while !remaining.is_empty() {
        let pick = remaining
            .iter()
            .position(|song| !recent.contains(&song.artist))
            .or_else(|| {
                let last = recent.back();
                remaining
                    .iter()
                    .position(|song| Some(&song.artist) != last)
            })
            .unwrap_or(0);
        let song = remaining.remove(pick);

        if recent.len() == window {
            recent.pop_front();
        }
        recent.push_back(song.artist.clone());
        result.push(song);
    }

    result
}
