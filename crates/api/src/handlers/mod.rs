//! Request handlers.
//!
//! Handlers delegate to the shared [`DailyGame`](guessr_game::DailyGame)
//! and map errors via [`AppError`](crate::error::AppError).

pub mod game;
pub mod player_names;
