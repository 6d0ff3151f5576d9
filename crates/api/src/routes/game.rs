use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{game, player_names};
use crate::state::AppState;

/// Game routes mounted at `/api`.
///
/// ```text
/// GET  /game-state    -> game_state
/// GET  /player-names  -> list_player_names
/// POST /guess         -> submit_guess
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/game-state", get(game::game_state))
        .route("/player-names", get(player_names::list_player_names))
        .route("/guess", post(game::submit_guess))
}
