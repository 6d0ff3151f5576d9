//! Periodic day-rollover check.
//!
//! Fires at the next UTC midnight and then every `interval`, running
//! [`DailyGame::daily_check`] through the same critical section request
//! handlers use.

use std::sync::Arc;
use std::time::Duration;

use guessr_game::{DailyCheckOutcome, DailyGame};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Delay past midnight before the first tick, so the wall clock has
/// already turned over when `daily_check` reads it.
const ROLLOVER_GRACE: Duration = Duration::from_millis(500);

/// Run the daily reset loop until `cancel` is triggered.
pub async fn run(game: Arc<DailyGame>, interval: Duration, cancel: CancellationToken) {
    let first_in = game.until_next_reset() + ROLLOVER_GRACE;

    tracing::info!(
        first_in_ms = first_in.as_millis() as u64,
        interval_secs = interval.as_secs(),
        "Daily reset task started"
    );

    let mut ticker = tokio::time::interval_at(Instant::now() + first_in, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Daily reset task stopping");
                break;
            }
            _ = ticker.tick() => {
                match game.daily_check().await {
                    DailyCheckOutcome::Current => {
                        tracing::debug!("Daily reset: nothing to do");
                    }
                    DailyCheckOutcome::Refreshed(player_id) => {
                        tracing::info!(player_id, "Daily reset: new player selected");
                    }
                    DailyCheckOutcome::Unresolved => {
                        tracing::warn!("Daily reset: no player available, will retry on next access");
                    }
                }
            }
        }
    }
}
