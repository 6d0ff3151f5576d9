pub mod game;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /game-state          today's opening hint and countdown (GET)
/// /player-names        autocomplete list (GET)
/// /guess               submit a guess (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(game::router())
}
