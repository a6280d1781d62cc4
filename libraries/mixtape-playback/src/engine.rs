//! Queue engine - core orchestration
//!
//! Owns the song pool, play history, and queue preparation state, applies
//! the selected shuffle algorithm, and keeps the external transport's
//! queue synchronized with the pool.
//!
//! Concurrency model: all pool/history mutations are serialized through a
//! single async mutex. One long-lived observation task, started at
//! construction, consumes the transport's state stream and relays every
//! state verbatim through a watch channel. Mutation-triggered rebuilds and
//! the second phase of the warm start run as detached fire-and-forget
//! tasks: callers never wait for them, superseded tasks are not cancelled,
//! and the last task to *complete* determines the transport's final queue.
//! That is deliberate eventual consistency, not linearizability.

use crate::{
    error::Result,
    history::PlayHistory,
    pool::SongPool,
    shuffle::ShuffleAlgorithm,
    store::PoolStore,
    transport::Transport,
};
use mixtape_core::{PlaybackState, Song};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Configuration for the queue engine
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Queue ordering strategy applied by `play` / `prepare_queue`
    pub algorithm: ShuffleAlgorithm,

    /// Songs sent in the first phase of the warm start (default: 2)
    pub initial_queue_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            algorithm: ShuffleAlgorithm::default(),
            initial_queue_len: 2,
        }
    }
}

/// State behind the engine's single mutex
#[derive(Debug, Default)]
struct EngineState {
    pool: SongPool,
    history: PlayHistory,
    /// Song ids believed to be reflected in the transport's queue
    prepared: HashSet<String>,
    algorithm: ShuffleAlgorithm,
}

impl EngineState {
    /// Feed one observed state into the session bookkeeping
    ///
    /// `Stopped` and `Empty` are session boundaries: the history resets
    /// (inside `observe`) and the prepared set is dropped, because the
    /// transport's queue is no longer something a fresh `play` can reuse.
    fn observe(&mut self, state: &PlaybackState) {
        self.history.observe(state);
        if matches!(state, PlaybackState::Stopped | PlaybackState::Empty) {
            self.prepared.clear();
        }
    }
}

/// Shuffle queue engine
///
/// The single owner of the pool and its synchronization with the
/// transport. UI-facing operations (`play`, `pause`, `skip_to_next`,
/// `restart_current_song`, `add_song`) surface transport errors to the
/// caller; background queue pushes are best-effort and never do.
pub struct QueueEngine {
    shared: Arc<Mutex<EngineState>>,
    transport: Arc<dyn Transport>,
    store: Option<Arc<dyn PoolStore>>,
    published: Arc<watch::Sender<PlaybackState>>,
    initial_queue_len: usize,
    observer: JoinHandle<()>,
}

impl QueueEngine {
    /// Create an engine without a persistence collaborator
    ///
    /// Spawns the transport-state observation task; must be called from
    /// within a tokio runtime.
    pub fn new(transport: Arc<dyn Transport>, config: EngineConfig) -> Self {
        Self::with_store(transport, None, config)
    }

    /// Create an engine that mirrors pool changes into `store`
    pub fn with_store(
        transport: Arc<dyn Transport>,
        store: Option<Arc<dyn PoolStore>>,
        config: EngineConfig,
    ) -> Self {
        let shared = Arc::new(Mutex::new(EngineState {
            algorithm: config.algorithm,
            ..EngineState::default()
        }));
        let published = Arc::new(watch::Sender::new(PlaybackState::Empty));

        let observer = tokio::spawn(Self::observe_transport(
            transport.subscribe(),
            Arc::clone(&shared),
            Arc::clone(&published),
        ));

        Self {
            shared,
            transport,
            store,
            published,
            initial_queue_len: config.initial_queue_len,
            observer,
        }
    }

    /// Relay every transport-reported state until the stream closes
    async fn observe_transport(
        mut stream: broadcast::Receiver<PlaybackState>,
        shared: Arc<Mutex<EngineState>>,
        published: Arc<watch::Sender<PlaybackState>>,
    ) {
        loop {
            match stream.recv().await {
                Ok(state) => {
                    let mut engine = shared.lock().await;
                    engine.observe(&state);
                    published.send_replace(state);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // History only needs the latest distinct song id, so
                    // skipped snapshots cost no more precision than the
                    // instant-skip case already does
                    debug!(skipped, "transport state stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("transport state stream closed");
    }

    // ===== Observation =====

    /// Subscribe to the engine's published playback state
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.published.subscribe()
    }

    /// The most recently published playback state
    pub fn current_state(&self) -> PlaybackState {
        self.published.borrow().clone()
    }

    // ===== Pool mutation =====

    /// Add a song to the pool
    ///
    /// Propagates `CapacityReached`; a duplicate id is a silent no-op.
    /// While playback is active, a successful add triggers a detached
    /// queue rebuild.
    pub async fn add_song(&self, song: Song) -> Result<()> {
        let snapshot = {
            let mut engine = self.shared.lock().await;
            if !engine.pool.add(song)? {
                return Ok(());
            }
            // First song ever: the pool now exists, playback does not
            if matches!(&*self.published.borrow(), PlaybackState::Empty) {
                Self::publish(&self.published, &mut engine, PlaybackState::Stopped);
            }
            engine.pool.snapshot()
        };

        self.persist(snapshot);
        if self.current_state().is_active() {
            self.spawn_rebuild();
        }
        Ok(())
    }

    /// Remove a song from the pool
    ///
    /// A missing id is a no-op. The removed song is *not* purged from the
    /// play history: if it is the one currently playing it is allowed to
    /// finish naturally rather than being yanked.
    pub async fn remove_song(&self, id: &str) {
        let (snapshot, now_empty) = {
            let mut engine = self.shared.lock().await;
            if engine.pool.remove(id).is_none() {
                return;
            }
            let now_empty = engine.pool.is_empty();
            if now_empty {
                Self::publish(&self.published, &mut engine, PlaybackState::Empty);
            }
            (engine.pool.snapshot(), now_empty)
        };

        self.persist(snapshot);
        if !now_empty && self.current_state().is_active() {
            self.spawn_rebuild();
        }
    }

    /// Empty the pool unconditionally
    pub async fn remove_all_songs(&self) {
        {
            let mut engine = self.shared.lock().await;
            engine.pool.remove_all();
            Self::publish(&self.published, &mut engine, PlaybackState::Empty);
        }
        self.persist(Vec::new());
    }

    /// Replay the persisted pool through `add_song`
    ///
    /// Startup convenience; stops quietly once the pool is full.
    pub async fn restore(&self) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let songs = store.load().await?;
        for song in songs {
            if let Err(error) = self.add_song(song).await {
                warn!(%error, "stopping pool restore");
                break;
            }
        }
        Ok(())
    }

    // ===== Playback =====

    /// Shuffle the pool and start playback
    ///
    /// No-op on an empty pool. Clears the play history, then performs the
    /// two-phase warm start: the first `initial_queue_len` songs of the
    /// shuffled order go out immediately, the remainder is appended from a
    /// detached task so time-to-first-audio stays low. When a prior
    /// `prepare_queue` already covered the current pool, the queue is not
    /// resent at all.
    pub async fn play(&self) -> Result<()> {
        match self.send_shuffled_queue(true).await? {
            SendOutcome::EmptyPool => Ok(()),
            SendOutcome::AlreadyPrepared => {
                info!("queue already prepared, starting playback");
                self.transport.play().await
            }
            SendOutcome::Sent => self.transport.play().await,
        }
    }

    /// Warm up the transport's queue without starting playback
    ///
    /// Idempotent: a repeat call with an unchanged pool sends nothing.
    /// Any pool mutation invalidates the preparation automatically, since
    /// the recorded id set no longer matches the pool.
    pub async fn prepare_queue(&self) -> Result<()> {
        self.send_shuffled_queue(false).await?;
        Ok(())
    }

    /// Pause playback
    pub async fn pause(&self) -> Result<()> {
        self.transport.pause().await
    }

    /// Skip to the next queued song
    pub async fn skip_to_next(&self) -> Result<()> {
        self.transport.skip_to_next().await
    }

    /// Restart the currently playing song
    pub async fn restart_current_song(&self) -> Result<()> {
        self.transport.restart_current_song().await
    }

    // ===== Configuration =====

    /// Select the queue ordering strategy
    pub async fn set_algorithm(&self, algorithm: ShuffleAlgorithm) {
        self.shared.lock().await.algorithm = algorithm;
    }

    /// The currently selected ordering strategy
    pub async fn algorithm(&self) -> ShuffleAlgorithm {
        self.shared.lock().await.algorithm
    }

    // ===== Pool queries =====

    /// All pooled songs in insertion order
    pub async fn songs(&self) -> Vec<Song> {
        self.shared.lock().await.pool.snapshot()
    }

    /// Number of pooled songs
    pub async fn len(&self) -> usize {
        self.shared.lock().await.pool.len()
    }

    /// Whether the pool is empty
    pub async fn is_empty(&self) -> bool {
        self.shared.lock().await.pool.is_empty()
    }

    /// Whether the pool contains the given song id
    pub async fn contains(&self, id: &str) -> bool {
        self.shared.lock().await.pool.contains(id)
    }

    // ===== Internals =====

    /// Record a locally derived state in history and publish it
    fn publish(
        published: &watch::Sender<PlaybackState>,
        engine: &mut EngineState,
        state: PlaybackState,
    ) {
        engine.observe(&state);
        published.send_replace(state);
    }

    /// Two-phase queue send shared by `play` and `prepare_queue`
    ///
    /// Phase one runs in the foreground and its errors propagate; phase
    /// two is detached and best-effort. The prepared id set is only ever
    /// extended after a transport call succeeded, so a failed append
    /// leaves it partial and forces a later resend.
    async fn send_shuffled_queue(&self, reset_history: bool) -> Result<SendOutcome> {
        let (head, tail) = {
            let mut engine = self.shared.lock().await;
            if engine.pool.is_empty() {
                return Ok(SendOutcome::EmptyPool);
            }
            if reset_history {
                engine.history.reset();
            }
            if engine.prepared == engine.pool.ids() {
                return Ok(SendOutcome::AlreadyPrepared);
            }

            let mut ordered = engine.algorithm.shuffle(&engine.pool.snapshot(), None);
            let head_len = self.initial_queue_len.min(ordered.len());
            let tail = ordered.split_off(head_len);
            (ordered, tail)
        };

        let head_ids: HashSet<String> = head.iter().map(|song| song.id.clone()).collect();
        self.transport.set_initial_queue(head).await?;
        self.shared.lock().await.prepared = head_ids;

        if !tail.is_empty() {
            let transport = Arc::clone(&self.transport);
            let shared = Arc::clone(&self.shared);
            tokio::spawn(async move {
                let tail_ids: Vec<String> = tail.iter().map(|song| song.id.clone()).collect();
                match transport.append_to_queue(tail).await {
                    Ok(()) => {
                        shared.lock().await.prepared.extend(tail_ids);
                    }
                    Err(error) => debug!(%error, "discarding warm-start append failure"),
                }
            });
        }

        Ok(SendOutcome::Sent)
    }

    /// Detached rebuild of the transport queue after a pool mutation
    ///
    /// Resends the pool, in pool order, minus the songs already played
    /// this session. Pool order is preserved deliberately: only `play` and
    /// `prepare_queue` re-randomize. Errors are discarded; callers of the
    /// mutation that triggered this already completed locally.
    fn spawn_rebuild(&self) {
        let transport = Arc::clone(&self.transport);
        let shared = Arc::clone(&self.shared);
        let published = Arc::clone(&self.published);
        tokio::spawn(async move {
            let upcoming: Vec<Song> = {
                let engine = shared.lock().await;
                if !published.borrow().is_active() {
                    return;
                }
                engine
                    .pool
                    .snapshot()
                    .into_iter()
                    .filter(|song| !engine.history.has_played(&song.id))
                    .collect()
            };
            if upcoming.is_empty() {
                return;
            }

            let upcoming_ids: HashSet<String> =
                upcoming.iter().map(|song| song.id.clone()).collect();
            match transport.set_queue(upcoming).await {
                Ok(()) => {
                    shared.lock().await.prepared = upcoming_ids;
                }
                Err(error) => debug!(%error, "discarding queue rebuild failure"),
            }
        });
    }

    /// Mirror the pool snapshot into the store, best-effort
    fn persist(&self, snapshot: Vec<Song>) {
        let Some(store) = &self.store else {
            return;
        };
        let store = Arc::clone(store);
        tokio::spawn(async move {
            if let Err(error) = store.save(&snapshot).await {
                warn!(%error, "failed to persist song pool");
            }
        });
    }
}

impl Drop for QueueEngine {
    fn drop(&mut self) {
        self.observer.abort();
    }
}

/// What `send_shuffled_queue` did
enum SendOutcome {
    /// Pool empty, nothing to do
    EmptyPool,
    /// Prepared set already matches the pool, queue not resent
    AlreadyPrepared,
    /// Two-phase send performed
    Sent,
}
