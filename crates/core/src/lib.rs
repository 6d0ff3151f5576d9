//! Domain logic for the daily "guess the player" game.
//!
//! Everything here is free of I/O: the clock, upstream player feed and
//! photo fetcher are reached through the traits in [`clock`] and
//! [`sources`], so the game crate can inject real or stub collaborators.

pub mod clock;
pub mod error;
pub mod guess;
pub mod hints;
pub mod player;
pub mod selection;
pub mod sources;
pub mod types;
