//! JSON bodies shared by the leaderboard HTTP server and its client.

use serde::{Deserialize, Serialize};

use crate::identifiers::{PlayerId, PlayerIdentity};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub player_id: PlayerId,
    pub player_name: String,
    pub score: u32,
}

impl ScoreSubmission {
    pub fn new(identity: &PlayerIdentity, score: u32) -> Self {
        Self {
            player_id: identity.player_id.clone(),
            player_name: identity.player_name.clone(),
            score,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub success: bool,
    pub score: u32,
    /// 1-based position among all players, which may lie below the displayed top.
    pub rank: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBestResponse {
    pub player_id: PlayerId,
    pub best_score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
