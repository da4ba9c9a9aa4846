/// Reference tick period of the browser game loop.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

pub const MIN_TICK_INTERVAL_MS: u64 = 50;
pub const MAX_TICK_INTERVAL_MS: u64 = 5000;

pub const HIGH_SCORE_FILE_NAME: &str = "high_score.json";
pub const LEADERBOARD_FILE_NAME: &str = "leaderboard.json";
pub const MINTED_NFTS_FILE_NAME: &str = "minted_nfts.json";

pub const DEFAULT_SERVER_PORT: u16 = 3000;
