//! Final-score bookkeeping: local high score, leaderboard stores, and the
//! game-over flow that ties them together.

pub mod api;
mod error;
mod fallback_store;
mod file_store;
mod high_score;
mod http_store;
mod leaderboard;
mod session_end;

pub use error::StoreError;
pub use fallback_store::{FallbackLeaderboardStore, SubmissionOutcome};
pub use file_store::FileLeaderboardStore;
pub use high_score::HighScoreCache;
pub use http_store::{DEFAULT_REQUEST_TIMEOUT, HttpLeaderboardStore};
pub use leaderboard::{
    LEADERBOARD_LIMIT, LeaderboardEntry, LeaderboardStore, best_score_for, merge_entry, top_entries,
    validate_submission,
};
pub use session_end::{SessionEndHandler, SessionEndReport};
