use crate::identifiers::PlayerId;
use crate::log;
use super::api::ScoreSubmission;
use super::error::StoreError;
use super::leaderboard::{LeaderboardEntry, LeaderboardStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Remote { rank: Option<usize> },
    Local { rank: Option<usize> },
    Failed(String),
    /// Zero scores are never submitted.
    Skipped,
}

/// Remote store first, local cache when the remote is absent or failing.
pub struct FallbackLeaderboardStore<R, L>
where
    R: LeaderboardStore,
    L: LeaderboardStore,
{
    remote: Option<R>,
    local: L,
}

impl<R, L> FallbackLeaderboardStore<R, L>
where
    R: LeaderboardStore,
    L: LeaderboardStore,
{
    pub fn new(remote: Option<R>, local: L) -> Self {
        Self { remote, local }
    }

    pub fn local_only(local: L) -> Self {
        Self { remote: None, local }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub async fn submit(&self, submission: ScoreSubmission) -> SubmissionOutcome {
        if let Some(remote) = &self.remote {
            match remote.add_score(submission.clone()).await {
                Ok(rank) => return SubmissionOutcome::Remote { rank },
                Err(e) => log!("Remote leaderboard unavailable, saving locally: {}", e),
            }
        }

        match self.local.add_score(submission).await {
            Ok(rank) => SubmissionOutcome::Local { rank },
            Err(e) => {
                log!("Failed to save score locally: {}", e);
                SubmissionOutcome::Failed(e.to_string())
            }
        }
    }
}

impl<R, L> LeaderboardStore for FallbackLeaderboardStore<R, L>
where
    R: LeaderboardStore,
    L: LeaderboardStore,
{
    async fn add_score(&self, submission: ScoreSubmission) -> Result<Option<usize>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.add_score(submission.clone()).await {
                Ok(rank) => return Ok(rank),
                Err(e) => log!("Remote leaderboard unavailable, saving locally: {}", e),
            }
        }
        self.local.add_score(submission).await
    }

    async fn top_scores(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.top_scores().await {
                Ok(entries) => return Ok(entries),
                Err(e) => log!("Remote leaderboard unavailable, reading local cache: {}", e),
            }
        }
        self.local.top_scores().await
    }

    async fn player_best_score(&self, player_id: &PlayerId) -> Result<u32, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.player_best_score(player_id).await {
                Ok(score) => return Ok(score),
                Err(e) => log!("Remote best score unavailable for {}: {}", player_id, e),
            }
        }
        self.local.player_best_score(player_id).await
    }
}
