use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/player-names
///
/// Names from the last successful pool fetch, in feed order. Creates an
/// empty list on disk if none exists yet.
pub async fn list_player_names(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let names = state.game.names().load_or_init().await?;
    Ok(Json(names))
}
