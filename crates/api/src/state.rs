use std::sync::Arc;

use guessr_game::DailyGame;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The day's game.
    pub game: Arc<DailyGame>,
}
