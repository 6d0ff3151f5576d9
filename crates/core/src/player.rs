//! Player records and the raw upstream entries they are mapped from.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::hints::{BlurLevel, HintImages};
use crate::types::PlayerId;

/// The day's featured player as persisted in the daily cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub country: String,
    pub club: String,
    /// Original, unblurred photo. Revealed when the round ends.
    pub image_url: String,
}

/// A [`Player`] together with the hint images derived from its photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPlayer {
    pub player: Player,
    pub hints: HintImages,
}

impl DailyPlayer {
    /// The first hint shown when a round starts.
    pub fn opening_image(&self) -> &str {
        self.hints.get(BlurLevel::Heavy)
    }
}

// ---------------------------------------------------------------------------
// Upstream wire shape
// ---------------------------------------------------------------------------

/// One entry of an upstream "top scorers" feed.
///
/// Every nested field is optional on the wire so that one malformed entry
/// does not fail the whole feed; [`Player::try_from`] rejects it instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerEntry {
    #[serde(default)]
    pub player: Option<RawPlayer>,
    #[serde(default)]
    pub statistics: Vec<RawStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlayer {
    pub id: Option<PlayerId>,
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatistics {
    pub team: Option<RawTeam>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTeam {
    pub name: Option<String>,
}

impl RawPlayerEntry {
    /// Display name, if the entry carries one.
    pub fn name(&self) -> Option<&str> {
        self.player.as_ref()?.name.as_deref()
    }
}

impl TryFrom<&RawPlayerEntry> for Player {
    type Error = CoreError;

    fn try_from(entry: &RawPlayerEntry) -> Result<Self, Self::Error> {
        let raw = entry
            .player
            .as_ref()
            .ok_or(CoreError::MalformedEntry { field: "player" })?;
        let club = entry
            .statistics
            .first()
            .and_then(|s| s.team.as_ref())
            .and_then(|t| t.name.clone())
            .ok_or(CoreError::MalformedEntry {
                field: "statistics[0].team.name",
            })?;

        Ok(Player {
            id: raw.id.ok_or(CoreError::MalformedEntry { field: "player.id" })?,
            name: raw
                .name
                .clone()
                .ok_or(CoreError::MalformedEntry { field: "player.name" })?,
            country: raw.nationality.clone().ok_or(CoreError::MalformedEntry {
                field: "player.nationality",
            })?,
            club,
            image_url: raw
                .photo
                .clone()
                .ok_or(CoreError::MalformedEntry { field: "player.photo" })?,
        })
    }
}

/// Built-in pool used when the upstream feed yields nothing usable.
pub fn backup_pool() -> Vec<RawPlayerEntry> {
    vec![RawPlayerEntry {
        player: Some(RawPlayer {
            id: Some(1),
            name: Some("Lionel Messi".into()),
            nationality: Some("Argentina".into()),
            photo: Some("https://media.api-sports.io/football/players/154.png".into()),
        }),
        statistics: vec![RawStatistics {
            team: Some(RawTeam {
                name: Some("Inter Miami".into()),
            }),
        }],
    }]
}
