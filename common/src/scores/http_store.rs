use std::time::Duration;

use crate::identifiers::PlayerId;
use super::api::{PlayerBestResponse, ScoreResponse, ScoreSubmission};
use super::error::StoreError;
use super::leaderboard::{LeaderboardEntry, LeaderboardStore};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client of the leaderboard server's JSON API.
#[derive(Clone)]
pub struct HttpLeaderboardStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpLeaderboardStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base_url = base_url.trim_end_matches('/');
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::InvalidUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/api/players/{id}/best` with the id percent-encoded as one segment.
    fn player_best_url(&self, player_id: &PlayerId) -> Result<reqwest::Url, StoreError> {
        let mut url = reqwest::Url::parse(&self.url("/api/players"))
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.base_url.clone()))?
            .push(player_id.as_str())
            .push("best");
        Ok(url)
    }
}

impl LeaderboardStore for HttpLeaderboardStore {
    async fn add_score(&self, submission: ScoreSubmission) -> Result<Option<usize>, StoreError> {
        let response: ScoreResponse = self
            .client
            .post(self.url("/api/score"))
            .json(&submission)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.rank)
    }

    async fn top_scores(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let entries = self
            .client
            .get(self.url("/api/leaderboard"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(entries)
    }

    async fn player_best_score(&self, player_id: &PlayerId) -> Result<u32, StoreError> {
        let response: PlayerBestResponse = self
            .client
            .get(self.player_best_url(player_id)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.best_score)
    }
}
