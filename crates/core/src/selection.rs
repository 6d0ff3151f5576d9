//! Deterministic daily pick from a player pool.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::CoreError;
use crate::player::{Player, RawPlayerEntry};
use crate::types::DateId;

/// Shuffle `items` in place using `day` as the seed.
///
/// The same input order and day always produce the same output order. The
/// generator is pinned to ChaCha8 so a day's pick survives dependency
/// upgrades and restarts.
pub fn shuffle_for_day<T>(items: &mut [T], day: &DateId) {
    let mut rng = ChaCha8Rng::from_seed(day.seed());
    items.shuffle(&mut rng);
}

/// Pick the player for `day`: shuffle a copy of `pool` with the day seed and
/// map its first entry.
///
/// A malformed first entry fails the pick rather than falling through to
/// the next one.
pub fn select_player(pool: &[RawPlayerEntry], day: &DateId) -> Result<Player, CoreError> {
    if pool.is_empty() {
        return Err(CoreError::EmptyPool);
    }
    let mut shuffled = pool.to_vec();
    shuffle_for_day(&mut shuffled, day);
    Player::try_from(&shuffled[0])
}
