use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::log;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HighScoreRecord {
    high_score: u32,
}

/// Best score seen on this machine, independent of any leaderboard.
pub struct HighScoreCache {
    path: PathBuf,
}

impl HighScoreCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable caches count as zero.
    pub fn load(&self) -> u32 {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return 0,
            Err(e) => {
                log!("Failed to read high score cache {}: {}", self.path.display(), e);
                return 0;
            }
        };
        serde_json::from_str::<HighScoreRecord>(&content)
            .map(|record| record.high_score)
            .unwrap_or(0)
    }

    /// Stores `score` when it beats the cached value; returns whether it did.
    pub fn record(&self, score: u32) -> Result<bool, String> {
        if score <= self.load() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create high score directory: {}", e))?;
        }
        let content = serde_json::to_string(&HighScoreRecord { high_score: score })
            .map_err(|e| format!("Failed to serialize high score: {}", e))?;
        std::fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write high score cache: {}", e))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(HighScoreCache::new(dir.path().join("high_score.json")).load(), 0);
    }

    #[test]
    fn test_record_only_improvements() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HighScoreCache::new(dir.path().join("high_score.json"));
        assert_eq!(cache.record(30), Ok(true));
        assert_eq!(cache.record(30), Ok(false));
        assert_eq!(cache.record(20), Ok(false));
        assert_eq!(cache.load(), 30);
        assert_eq!(cache.record(50), Ok(true));
        assert_eq!(cache.load(), 50);
    }

    #[test]
    fn test_zero_is_never_a_high_score() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HighScoreCache::new(dir.path().join("high_score.json"));
        assert_eq!(cache.record(0), Ok(false));
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_garbage_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_score.json");
        std::fs::write(&path, "{").unwrap();
        assert_eq!(HighScoreCache::new(&path).load(), 0);
    }
}
