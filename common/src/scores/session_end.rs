use crate::identifiers::PlayerIdentity;
use crate::log;
use crate::mint::MintOffer;
use super::api::ScoreSubmission;
use super::fallback_store::{FallbackLeaderboardStore, SubmissionOutcome};
use super::high_score::HighScoreCache;
use super::leaderboard::LeaderboardStore;

#[derive(Clone, Debug, PartialEq)]
pub struct SessionEndReport {
    pub final_score: u32,
    pub previous_high_score: u32,
    pub is_new_high_score: bool,
    pub submission: SubmissionOutcome,
    pub mint_offer: MintOffer,
}

/// Everything that happens to a final score once a game is over.
pub struct SessionEndHandler<R, L>
where
    R: LeaderboardStore,
    L: LeaderboardStore,
{
    high_scores: HighScoreCache,
    leaderboard: FallbackLeaderboardStore<R, L>,
}

impl<R, L> SessionEndHandler<R, L>
where
    R: LeaderboardStore,
    L: LeaderboardStore,
{
    pub fn new(high_scores: HighScoreCache, leaderboard: FallbackLeaderboardStore<R, L>) -> Self {
        Self { high_scores, leaderboard }
    }

    pub fn leaderboard(&self) -> &FallbackLeaderboardStore<R, L> {
        &self.leaderboard
    }

    /// Best of the leaderboard's record for the player and the local cache.
    pub async fn best_known_high_score(&self, player: &PlayerIdentity) -> u32 {
        let local = self.high_scores.load();
        match self.leaderboard.player_best_score(&player.player_id).await {
            Ok(remote) => remote.max(local),
            Err(e) => {
                log!("Could not load best score for {}: {}", player, e);
                local
            }
        }
    }

    pub async fn handle(&self, player: &PlayerIdentity, final_score: u32) -> SessionEndReport {
        let previous_high_score = self.high_scores.load();
        let is_new_high_score = match self.high_scores.record(final_score) {
            Ok(recorded) => recorded,
            Err(e) => {
                log!("{}", e);
                final_score > previous_high_score
            }
        };

        let submission = if final_score > 0 {
            self.leaderboard
                .submit(ScoreSubmission::new(player, final_score))
                .await
        } else {
            SubmissionOutcome::Skipped
        };

        log!(
            "Session over for {}: score {}, high score {}{}, leaderboard {:?}",
            player,
            final_score,
            previous_high_score.max(final_score),
            if is_new_high_score { " (new)" } else { "" },
            submission
        );

        SessionEndReport {
            final_score,
            previous_high_score,
            is_new_high_score,
            submission,
            mint_offer: MintOffer::for_score(final_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::PlayerId;
    use crate::scores::FileLeaderboardStore;
    use crate::scores::fallback_store::tests::OfflineStore;

    fn handler(dir: &std::path::Path) -> SessionEndHandler<OfflineStore, FileLeaderboardStore> {
        SessionEndHandler::new(
            HighScoreCache::new(dir.join("high_score.json")),
            FallbackLeaderboardStore::new(
                Some(OfflineStore),
                FileLeaderboardStore::new(dir.join("leaderboard.json")),
            ),
        )
    }

    fn player() -> PlayerIdentity {
        PlayerIdentity::new(PlayerId::from("p1"), "Wild Boa".to_string())
    }

    #[tokio::test]
    async fn test_first_score_is_high_score_and_saved_locally() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path());

        let report = handler.handle(&player(), 70).await;
        assert!(report.is_new_high_score);
        assert_eq!(report.previous_high_score, 0);
        assert_eq!(report.submission, SubmissionOutcome::Local { rank: Some(1) });
        assert!(report.mint_offer.is_eligible());
        assert_eq!(handler.best_known_high_score(&player()).await, 70);
    }

    #[tokio::test]
    async fn test_zero_score_is_not_submitted() {
        let dir = tempfile::tempdir().unwrap();
        let report = handler(dir.path()).handle(&player(), 0).await;
        assert_eq!(report.submission, SubmissionOutcome::Skipped);
        assert!(!report.is_new_high_score);
        assert!(!report.mint_offer.is_eligible());
    }

    #[tokio::test]
    async fn test_lower_score_is_not_a_high_score() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path());
        handler.handle(&player(), 90).await;

        let report = handler.handle(&player(), 30).await;
        assert!(!report.is_new_high_score);
        assert_eq!(report.previous_high_score, 90);
        assert_eq!(handler.best_known_high_score(&player()).await, 90);
    }
}
