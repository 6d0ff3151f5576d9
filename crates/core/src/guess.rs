//! Guess evaluation and the hint progression table.

use serde::Serialize;

use crate::hints::BlurLevel;
use crate::player::DailyPlayer;

/// Hint level from which the round is over and the player is revealed.
pub const REVEAL_HINT_LEVEL: u32 = 4;

/// Which text clue accompanies a hint image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clue {
    Country,
    Club,
}

/// Clue and image strength for `hint_level`, or `None` once the round
/// should reveal the answer.
///
/// | level | clue    | image  |
/// |-------|---------|--------|
/// | 0     | country | heavy  |
/// | 1     | country | medium |
/// | 2     | club    | medium |
/// | 3     | club    | light  |
/// | >= 4  | reveal  |        |
pub fn hint_for_level(hint_level: u32) -> Option<(Clue, BlurLevel)> {
    match hint_level {
        0 => Some((Clue::Country, BlurLevel::Heavy)),
        1 => Some((Clue::Country, BlurLevel::Medium)),
        2 => Some((Clue::Club, BlurLevel::Medium)),
        3 => Some((Clue::Club, BlurLevel::Light)),
        _ => None,
    }
}

/// Outcome of one guess, serialized as the `/api/guess` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessResult {
    pub correct: bool,
    pub hint_level: u32,
    /// Seconds until the next daily reset.
    pub next_reset: i64,
    pub hint_text: Option<String>,
    pub hint_image: Option<String>,
    pub player_name: Option<String>,
    /// Original photo; only present when the round is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl GuessResult {
    /// Whether this result ends the round.
    pub fn is_reveal(&self) -> bool {
        self.player_name.is_some()
    }
}

/// Case-insensitive exact match against the player's display name.
pub fn is_correct(guess: &str, name: &str) -> bool {
    guess.to_lowercase() == name.to_lowercase()
}

pub fn evaluate(daily: &DailyPlayer, guess: &str, hint_level: u32, next_reset: i64) -> GuessResult {
    let player = &daily.player;
    let correct = is_correct(guess, &player.name);

    let mut result = GuessResult {
        correct,
        hint_level,
        next_reset,
        hint_text: None,
        hint_image: None,
        player_name: None,
        image_url: None,
    };

    let hint = if correct {
        None
    } else {
        hint_for_level(hint_level)
    };

    match hint {
        Some((clue, level)) => {
            result.hint_text = Some(match clue {
                Clue::Country => format!("Player's Country: {}", player.country),
                Clue::Club => format!("Player's Club: {}", player.club),
            });
            result.hint_image = Some(daily.hints.get(level).to_string());
        }
        None => {
            result.player_name = Some(player.name.clone());
            result.image_url = Some(player.image_url.clone());
        }
    }

    result
}
