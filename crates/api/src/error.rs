use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guessr_game::GameError;
use guessr_store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A guess arrived while no player is selected.
    #[error("No active game")]
    NoActiveGame,

    /// No player could be selected for today.
    #[error("No game available today")]
    NoGameToday,

    /// A persisted file could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::NoActiveGame => AppError::NoActiveGame,
            GameError::NoPlayerAvailable(_) => AppError::NoGameToday,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NoActiveGame => (
                StatusCode::BAD_REQUEST,
                "NO_ACTIVE_GAME",
                self.to_string(),
            ),
            AppError::NoGameToday => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NO_GAME_TODAY",
                self.to_string(),
            ),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
