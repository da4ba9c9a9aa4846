use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifiers::PlayerId;
use super::api::ScoreSubmission;
use super::error::StoreError;

pub const LEADERBOARD_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn from_submission(submission: ScoreSubmission, timestamp: DateTime<Utc>) -> Self {
        Self {
            player_id: submission.player_id,
            player_name: submission.player_name,
            score: submission.score,
            timestamp,
        }
    }
}

pub trait LeaderboardStore: Send + Sync {
    /// Returns the 1-based rank of the player's entry among all players
    /// after the submission, or `None` when the store cannot tell.
    fn add_score(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = Result<Option<usize>, StoreError>> + Send;

    /// At most [`LEADERBOARD_LIMIT`] entries, best first.
    fn top_scores(&self) -> impl Future<Output = Result<Vec<LeaderboardEntry>, StoreError>> + Send;

    fn player_best_score(
        &self,
        player_id: &PlayerId,
    ) -> impl Future<Output = Result<u32, StoreError>> + Send;
}

pub fn validate_submission(submission: &ScoreSubmission) -> Result<(), StoreError> {
    if submission.player_id.as_str().trim().is_empty() {
        return Err(StoreError::InvalidSubmission("player id is empty".to_string()));
    }
    Ok(())
}

/// Merges `entry` into the full board: one entry per player holding their
/// best score, highest first, earlier timestamps winning ties. Anonymous
/// submissions are never merged with each other. Returns the 1-based rank
/// of the resulting entry among all players; only [`top_entries`] applies
/// [`LEADERBOARD_LIMIT`].
pub fn merge_entry(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) -> Option<usize> {
    let existing = if entry.player_id.is_anonymous() {
        None
    } else {
        entries.iter_mut().find(|e| e.player_id == entry.player_id)
    };

    let ranked = match existing {
        Some(existing) if existing.score >= entry.score => {
            existing.player_name = entry.player_name;
            existing.clone()
        }
        Some(existing) => {
            *existing = entry.clone();
            entry
        }
        None => {
            entries.push(entry.clone());
            entry
        }
    };

    entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));

    entries.iter().position(|e| *e == ranked).map(|idx| idx + 1)
}

/// The displayed leaderboard: the first [`LEADERBOARD_LIMIT`] entries of a
/// ranked board.
pub fn top_entries(entries: &[LeaderboardEntry]) -> Vec<LeaderboardEntry> {
    entries.iter().take(LEADERBOARD_LIMIT).cloned().collect()
}

pub fn best_score_for(entries: &[LeaderboardEntry], player_id: &PlayerId) -> u32 {
    entries
        .iter()
        .filter(|e| &e.player_id == player_id)
        .map(|e| e.score)
        .max()
        .unwrap_or(0)
}
