use std::time::Duration;

use common::defaults::LEADERBOARD_FILE_NAME;

pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const INDEX_FILE_NAME: &str = "index.html";
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_millis(200);

pub fn default_data_file() -> String {
    format!("{}/{}", DEFAULT_DATA_DIR, LEADERBOARD_FILE_NAME)
}
