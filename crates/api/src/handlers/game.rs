//! Handlers for the daily round: the opening state and guesses.

use axum::extract::State;
use axum::Json;
use guessr_core::guess::GuessResult;
use guessr_core::types::{DateId, PlayerId};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GameStateResponse {
    /// Heavy-blur hint of today's player (base64 JPEG or placeholder).
    pub blurred_image: String,
    pub game_id: PlayerId,
    /// Seconds until the next daily reset.
    pub next_reset: i64,
    pub current_date: DateId,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: String,
    /// Client-tracked hint level; the server does not enforce progression.
    /// Anything past `u32::MAX` saturates, which still means a reveal.
    #[serde(default)]
    pub hint_level: u64,
}

/// GET /api/game-state
///
/// Selects today's player on first access of the day. Responds 503
/// `NO_GAME_TODAY` if no player can be obtained.
pub async fn game_state(State(state): State<AppState>) -> AppResult<Json<GameStateResponse>> {
    let daily = state
        .game
        .daily_player()
        .await
        .ok_or(AppError::NoGameToday)?;

    Ok(Json(GameStateResponse {
        blurred_image: daily.player.opening_image().to_string(),
        game_id: daily.player.player.id,
        next_reset: state.game.next_reset_secs(),
        current_date: daily.day,
    }))
}

/// POST /api/guess
///
/// Responds 400 `NO_ACTIVE_GAME` until today's player has been selected.
pub async fn submit_guess(
    State(state): State<AppState>,
    Json(input): Json<GuessRequest>,
) -> AppResult<Json<GuessResult>> {
    let hint_level = u32::try_from(input.hint_level).unwrap_or(u32::MAX);
    let result = state.game.evaluate_guess(&input.guess, hint_level).await?;
    Ok(Json(result))
}
