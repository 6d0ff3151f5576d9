//! Daily game state.
//!
//! [`DailyGame`] owns the process-wide "today's player" slot and the
//! on-disk daily cache, and reconciles the two whenever the UTC day rolls
//! over. See [`DailyGame::daily_player`] for the selection flow.

mod game;

pub use game::{DailyCheckOutcome, DailyGame, DailyState};

use guessr_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Neither the upstream pool nor the backup list produced a player.
    #[error("No player available today: {0}")]
    NoPlayerAvailable(#[source] CoreError),

    /// A guess arrived while no player is selected.
    #[error("No active game")]
    NoActiveGame,
}
