//! Property-based tests for the shuffle algorithm family
//!
//! Uses proptest to verify the ordering guarantees across many random
//! inputs, plus aggregate statistical checks for the weighted algorithms.

use chrono::{Duration, Utc};
use mixtape_core::Song;
use mixtape_playback::ShuffleAlgorithm;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// ===== Helpers =====

fn arbitrary_song() -> impl Strategy<Value = Song> {
    (
        "[a-z0-9]{1,10}",            // id
        "[A-Za-z ]{1,30}",           // title
        "[A-Z]{1,4}",                // artist
        0u32..500,                   // play count
        proptest::option::of(0i64..3650), // days since last played
    )
        .prop_map(|(id, title, artist, play_count, days_ago)| {
            let mut song = Song::new(id, title, artist, "Album").with_play_count(play_count);
            if let Some(days) = days_ago {
                song = song.with_last_played(Utc::now() - Duration::days(days));
            }
            song
        })
}

fn arbitrary_songs() -> impl Strategy<Value = Vec<Song>> {
    prop::collection::vec(arbitrary_song(), 1..50)
}

fn sorted_ids(songs: &[Song]) -> Vec<String> {
    let mut ids: Vec<String> = songs.iter().map(|song| song.id.clone()).collect();
    ids.sort();
    ids
}

/// Balanced pool: `artists` artists with `per_artist` songs each
fn balanced_pool(artists: usize, per_artist: usize) -> Vec<Song> {
    let mut songs = Vec::new();
    for a in 0..artists {
        for i in 0..per_artist {
            songs.push(Song::new(
                format!("{a}-{i}"),
                format!("Track {a}-{i}"),
                format!("Artist {a}"),
                "Album",
            ));
        }
    }
    songs
}

// ===== Property Tests =====

proptest! {
    /// Property: FullShuffle output is a permutation of its input
    #[test]
    fn full_shuffle_is_a_permutation(songs in arbitrary_songs()) {
        let result = ShuffleAlgorithm::FullShuffle.shuffle(&songs, None);
        prop_assert_eq!(result.len(), songs.len());
        prop_assert_eq!(sorted_ids(&result), sorted_ids(&songs));
    }

    /// Property: PureRandom returns exactly `count` songs, all drawn from
    /// the input
    #[test]
    fn pure_random_length_and_membership(
        songs in arbitrary_songs(),
        count in 0usize..80
    ) {
        let result = ShuffleAlgorithm::PureRandom.shuffle(&songs, Some(count));
        prop_assert_eq!(result.len(), count);

        let input_ids: HashSet<&str> = songs.iter().map(|song| song.id.as_str()).collect();
        prop_assert!(result.iter().all(|song| input_ids.contains(song.id.as_str())));
    }

    /// Property: PureRandom must repeat once it draws more than the number
    /// of distinct inputs (pigeonhole)
    #[test]
    fn pure_random_duplicates_when_oversampling(songs in arbitrary_songs()) {
        let distinct: HashSet<&str> = songs.iter().map(|song| song.id.as_str()).collect();
        let count = distinct.len() + 1;

        let result = ShuffleAlgorithm::PureRandom.shuffle(&songs, Some(count));
        let output_distinct: HashSet<&str> =
            result.iter().map(|song| song.id.as_str()).collect();
        prop_assert!(output_distinct.len() < result.len());
    }

    /// Property: the weighted algorithms return every input song exactly once
    #[test]
    fn weighted_shuffles_are_permutations(songs in arbitrary_songs()) {
        for algorithm in [ShuffleAlgorithm::LeastRecent, ShuffleAlgorithm::LeastPlayed] {
            let result = algorithm.shuffle(&songs, None);
            prop_assert_eq!(sorted_ids(&result), sorted_ids(&songs));
        }
    }

    /// Property: ArtistSpacing returns every input song exactly once
    #[test]
    fn artist_spacing_is_a_permutation(songs in arbitrary_songs()) {
        let result = ShuffleAlgorithm::ArtistSpacing.shuffle(&songs, None);
        prop_assert_eq!(sorted_ids(&result), sorted_ids(&songs));
    }

    /// Property: on balanced pools whose artist count fits the spacing
    /// window, ArtistSpacing never places two same-artist songs adjacently.
    /// With 2-4 artists the window covers all but one artist, so the
    /// greedy walk degenerates to a strict rotation and spacing is
    /// guaranteed; with more artists than the window the walk can still
    /// strand one artist at the tail, so only membership is guaranteed.
    #[test]
    fn artist_spacing_has_no_adjacent_repeats(
        artists in 2usize..5,
        per_artist in 2usize..7
    ) {
        let songs = balanced_pool(artists, per_artist);
        let result = ShuffleAlgorithm::ArtistSpacing.shuffle(&songs, None);

        prop_assert_eq!(result.len(), songs.len());
        for pair in result.windows(2) {
            prop_assert_ne!(&pair[0].artist, &pair[1].artist);
        }
    }
}

// ===== Aggregate statistical checks =====

const TRIALS: usize = 100;

fn first_position_counts(algorithm: ShuffleAlgorithm, songs: &[Song]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for _ in 0..TRIALS {
        let result = algorithm.shuffle(songs, None);
        *counts.entry(result[0].id.clone()).or_default() += 1;
    }
    counts
}

#[test]
fn least_recent_front_loads_stale_songs_in_aggregate() {
    // 30 songs with strictly increasing staleness; tier size is 3, so the
    // stalest song lands in the first tier every trial while the freshest
    // can never reach position 0.
    let now = Utc::now();
    let songs: Vec<Song> = (0..30)
        .map(|i| {
            Song::new(format!("s{i}"), "Title", "Artist", "Album")
                .with_last_played(now - Duration::days(30 - i))
        })
        .collect();

    let counts = first_position_counts(ShuffleAlgorithm::LeastRecent, &songs);
    let stalest = counts.get("s0").copied().unwrap_or(0);
    let freshest = counts.get("s29").copied().unwrap_or(0);

    assert!(
        stalest > freshest,
        "stalest song first {stalest} times, freshest {freshest} times"
    );
    assert_eq!(freshest, 0, "the freshest song sits in the last tier");
}

#[test]
fn never_played_songs_rank_before_played_ones() {
    let now = Utc::now();
    let mut songs: Vec<Song> = (0..15)
        .map(|i| Song::new(format!("never{i}"), "Title", "Artist", "Album"))
        .collect();
    songs.extend(
        (0..15).map(|i| {
            Song::new(format!("played{i}"), "Title", "Artist", "Album")
                .with_last_played(now - Duration::hours(i))
        }),
    );

    for _ in 0..TRIALS {
        let result = ShuffleAlgorithm::LeastRecent.shuffle(&songs, None);
        assert!(
            result[..15].iter().all(|song| song.id.starts_with("never")),
            "never-played songs must fill the leading tiers"
        );
    }
}

#[test]
fn least_played_front_loads_rare_songs_in_aggregate() {
    let songs: Vec<Song> = (0u32..30)
        .map(|i| {
            Song::new(format!("s{i}"), "Title", "Artist", "Album").with_play_count(i * 3)
        })
        .collect();

    let counts = first_position_counts(ShuffleAlgorithm::LeastPlayed, &songs);
    let rarest = counts.get("s0").copied().unwrap_or(0);
    let most_played = counts.get("s29").copied().unwrap_or(0);

    assert!(
        rarest > most_played,
        "rarest song first {rarest} times, most played {most_played} times"
    );
    assert_eq!(most_played, 0);
}
