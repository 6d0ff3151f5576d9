use std::sync::Arc;

use guessr_core::clock::{self, Clock};
use guessr_core::guess::{self, GuessResult};
use guessr_core::hints::{self, HintImages};
use guessr_core::player::{self, DailyPlayer, Player, RawPlayerEntry};
use guessr_core::selection;
use guessr_core::sources::{ImageSource, PlayerSource};
use guessr_core::types::{DateId, PlayerId};
use guessr_store::{CacheLookup, CacheStore, DailyCacheRecord, NameStore};
use tokio::sync::{Mutex, RwLock};

use crate::GameError;

/// The player in play for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyState {
    pub day: DateId,
    pub player: DailyPlayer,
}

/// What a [`DailyGame::daily_check`] run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyCheckOutcome {
    /// The held player already belongs to today.
    Current,
    /// The day had rolled over and a player for the new day is now held.
    Refreshed(PlayerId),
    /// The day had rolled over but no player could be obtained. The slot is
    /// empty until the next access retries.
    Unresolved,
}

/// Process-wide game state. Construct once and share behind an `Arc`.
pub struct DailyGame {
    clock: Arc<dyn Clock>,
    players: Arc<dyn PlayerSource>,
    images: Arc<dyn ImageSource>,
    cache: CacheStore,
    names: NameStore,
    backup: Vec<RawPlayerEntry>,
    /// Today's player. Read without taking `transition`.
    current: RwLock<Option<Arc<DailyState>>>,
    /// Serialises every day transition and guards the unshuffled upstream
    /// pool, which is fetched once and reshuffled per day.
    transition: Mutex<Vec<RawPlayerEntry>>,
}

impl DailyGame {
    pub fn new(
        clock: Arc<dyn Clock>,
        players: Arc<dyn PlayerSource>,
        images: Arc<dyn ImageSource>,
        cache: CacheStore,
        names: NameStore,
    ) -> Self {
        Self {
            clock,
            players,
            images,
            cache,
            names,
            backup: player::backup_pool(),
            current: RwLock::new(None),
            transition: Mutex::new(Vec::new()),
        }
    }

    /// Replace the built-in backup list.
    pub fn with_backup(mut self, backup: Vec<RawPlayerEntry>) -> Self {
        self.backup = backup;
        self
    }

    pub fn names(&self) -> &NameStore {
        &self.names
    }

    /// Today's player, selecting one first if the held player is from
    /// another day (or none is held).
    ///
    /// Selection order: today's cache record, then the upstream pool
    /// (fetched if not yet held), then the backup list. Hint images are
    /// rendered once per newly held player. Returns `None` only when no
    /// player could be obtained at all.
    pub async fn daily_player(&self) -> Option<Arc<DailyState>> {
        if let Some(state) = self.held_for(self.clock.today()).await {
            return Some(state);
        }

        let mut pool = self.transition.lock().await;
        let today = self.clock.today();
        // Another caller may have finished the transition while we waited.
        if let Some(state) = self.held_for(today).await {
            return Some(state);
        }

        match self.load_day(today, &mut pool).await {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::error!(%today, error = %e, "No game available today");
                None
            }
        }
    }

    /// The held state, without triggering a selection.
    pub async fn current(&self) -> Option<Arc<DailyState>> {
        self.current.read().await.clone()
    }

    /// Seconds until the next UTC midnight.
    pub fn next_reset_secs(&self) -> i64 {
        clock::seconds_until_next_reset(self.clock.now())
    }

    /// Exact wall time until the next UTC midnight, for scheduling.
    pub fn until_next_reset(&self) -> std::time::Duration {
        clock::until_next_reset(self.clock.now())
            .to_std()
            .unwrap_or_default()
    }

    /// Rollover maintenance, safe to call any number of times.
    ///
    /// If the held player is not today's, the slot is cleared and a new
    /// player is loaded. Failures are logged and leave the slot empty for
    /// the next [`daily_player`](Self::daily_player) call to retry.
    pub async fn daily_check(&self) -> DailyCheckOutcome {
        let mut pool = self.transition.lock().await;
        let today = self.clock.today();

        if self.held_for(today).await.is_some() {
            tracing::debug!(%today, "Daily check: player is current");
            return DailyCheckOutcome::Current;
        }

        *self.current.write().await = None;

        match self.load_day(today, &mut pool).await {
            Ok(state) => {
                tracing::info!(%today, player_id = state.player.player.id, "Daily check: rolled over");
                DailyCheckOutcome::Refreshed(state.player.player.id)
            }
            Err(e) => {
                tracing::warn!(%today, error = %e, "Daily check: no player yet, will retry on access");
                DailyCheckOutcome::Unresolved
            }
        }
    }

    /// Evaluate a guess against today's held player.
    ///
    /// Never selects: until a player is held for the current day (by a
    /// game-state request or [`daily_check`](Self::daily_check)) this fails
    /// with [`GameError::NoActiveGame`]. Yesterday's player is never graded.
    pub async fn evaluate_guess(
        &self,
        guess: &str,
        hint_level: u32,
    ) -> Result<GuessResult, GameError> {
        let state = self
            .held_for(self.clock.today())
            .await
            .ok_or(GameError::NoActiveGame)?;
        Ok(guess::evaluate(
            &state.player,
            guess,
            hint_level,
            self.next_reset_secs(),
        ))
    }

    // ---- private helpers ----

    async fn held_for(&self, today: DateId) -> Option<Arc<DailyState>> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|state| state.day == today)
            .cloned()
    }

    /// Resolve the player for `today`, render its hints and hold it.
    ///
    /// Caller must hold `transition`.
    async fn load_day(
        &self,
        today: DateId,
        pool: &mut Vec<RawPlayerEntry>,
    ) -> Result<Arc<DailyState>, GameError> {
        let player = match self.cache.lookup(today).await {
            CacheLookup::Hit(player) => {
                tracing::info!(%today, player_id = player.id, "Loaded today's player from cache");
                player
            }
            miss => {
                tracing::debug!(%today, cache = ?miss, "No usable cache record, selecting");
                let player = self.select(today, pool).await?;
                let record = DailyCacheRecord {
                    date: today,
                    player: player.clone(),
                };
                if let Err(e) = self.cache.save(&record).await {
                    tracing::error!(error = %e, "Failed to persist daily cache");
                }
                tracing::info!(%today, player_id = player.id, "Selected today's player");
                player
            }
        };

        let hints = self.render_hints(&player.image_url).await;
        let state = Arc::new(DailyState {
            day: today,
            player: DailyPlayer { player, hints },
        });
        *self.current.write().await = Some(Arc::clone(&state));
        Ok(state)
    }

    /// Pick today's player from the upstream pool, falling back to the
    /// backup list when the pool is empty or its pick is unusable.
    async fn select(
        &self,
        today: DateId,
        pool: &mut Vec<RawPlayerEntry>,
    ) -> Result<Player, GameError> {
        if pool.is_empty() {
            *pool = self.fetch_pool().await;
        }

        match selection::select_player(pool, &today) {
            Ok(player) => Ok(player),
            Err(e) => {
                tracing::warn!(%today, error = %e, "Upstream pool unusable, using backup list");
                selection::select_player(&self.backup, &today).map_err(GameError::NoPlayerAvailable)
            }
        }
    }

    async fn fetch_pool(&self) -> Vec<RawPlayerEntry> {
        let pool = match self.players.fetch_pool().await {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(error = %e, "Player pool fetch failed");
                return Vec::new();
            }
        };

        if !pool.is_empty() {
            let names: Vec<String> = pool
                .iter()
                .filter_map(|entry| entry.name().map(str::to_string))
                .collect();
            if let Err(e) = self.names.save(&names).await {
                tracing::warn!(error = %e, "Failed to write player names");
            }
            tracing::info!(count = pool.len(), "Fetched player pool");
        }

        pool
    }

    /// Fetch and blur the photo. Any failure yields the placeholder set.
    async fn render_hints(&self, image_url: &str) -> HintImages {
        let bytes = match self.images.fetch(image_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(image_url, error = %e, "Player photo unavailable, using placeholder hints");
                return HintImages::placeholder();
            }
        };

        match tokio::task::spawn_blocking(move || hints::render_hints(&bytes)).await {
            Ok(Ok(hints)) => hints,
            Ok(Err(e)) => {
                tracing::warn!(image_url, error = %e, "Player photo undecodable, using placeholder hints");
                HintImages::placeholder()
            }
            Err(e) => {
                tracing::error!(error = %e, "Hint rendering task failed");
                HintImages::placeholder()
            }
        }
    }
}
