use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::identifiers::PlayerId;
use crate::log;
use super::api::ScoreSubmission;
use super::error::StoreError;
use super::leaderboard::{
    LeaderboardEntry, LeaderboardStore, best_score_for, merge_entry, top_entries,
    validate_submission,
};

/// Leaderboard kept in a JSON file. A missing or unreadable file reads as
/// an empty board; writes go through a temp file and a rename.
pub struct FileLeaderboardStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log!("Discarding corrupt leaderboard cache {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn write_entries(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

impl LeaderboardStore for FileLeaderboardStore {
    async fn add_score(&self, submission: ScoreSubmission) -> Result<Option<usize>, StoreError> {
        validate_submission(&submission)?;

        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        let rank = merge_entry(&mut entries, LeaderboardEntry::from_submission(submission, Utc::now()));
        self.write_entries(&entries).await?;
        Ok(rank)
    }

    async fn top_scores(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let entries = self.read_entries().await?;
        Ok(top_entries(&entries))
    }

    async fn player_best_score(&self, player_id: &PlayerId) -> Result<u32, StoreError> {
        let entries = self.read_entries().await?;
        Ok(best_score_for(&entries, player_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::LEADERBOARD_LIMIT;

    fn submission(player: &str, score: u32) -> ScoreSubmission {
        ScoreSubmission {
            player_id: PlayerId::from(player),
            player_name: format!("Player {}", player),
            score,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_board() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLeaderboardStore::new(dir.path().join("leaderboard.json"));
        assert!(store.top_scores().await.unwrap().is_empty());
        assert_eq!(store.player_best_score(&PlayerId::from("a")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_scores_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("leaderboard.json");

        let store = FileLeaderboardStore::new(&path);
        assert_eq!(store.add_score(submission("a", 30)).await.unwrap(), Some(1));
        assert_eq!(store.add_score(submission("b", 70)).await.unwrap(), Some(1));

        let reopened = FileLeaderboardStore::new(&path);
        let top = reopened.top_scores().await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player_id.as_str(), "b");
        assert_eq!(reopened.player_best_score(&PlayerId::from("a")).await.unwrap(), 30);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileLeaderboardStore::new(&path);
        assert!(store.top_scores().await.unwrap().is_empty());
        assert_eq!(store.add_score(submission("a", 10)).await.unwrap(), Some(1));
        assert_eq!(store.top_scores().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_best_score_survives_dropping_off_the_top() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLeaderboardStore::new(dir.path().join("leaderboard.json"));
        store.add_score(submission("late", 10)).await.unwrap();
        for i in 0..LEADERBOARD_LIMIT as u32 {
            store.add_score(submission(&format!("p{}", i), 100 + i)).await.unwrap();
        }

        let top = store.top_scores().await.unwrap();
        assert_eq!(top.len(), LEADERBOARD_LIMIT);
        assert!(top.iter().all(|e| e.player_id.as_str() != "late"));
        assert_eq!(store.player_best_score(&PlayerId::from("late")).await.unwrap(), 10);
        assert_eq!(
            store.add_score(submission("late", 5)).await.unwrap(),
            Some(LEADERBOARD_LIMIT + 1)
        );
    }

    #[tokio::test]
    async fn test_rejects_blank_player() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLeaderboardStore::new(dir.path().join("leaderboard.json"));
        let result = store.add_score(submission("", 10)).await;
        assert!(matches!(result, Err(StoreError::InvalidSubmission(_))));
    }
}
