use std::path::PathBuf;
use std::time::Duration;

use common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
    validate_tick_interval_ms,
};
use common::defaults::{
    DEFAULT_TICK_INTERVAL_MS, HIGH_SCORE_FILE_NAME, LEADERBOARD_FILE_NAME, MINTED_NFTS_FILE_NAME,
};
use common::games::snake::SnakeBotType;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "retro_snake_autoplay.yaml";
pub const MAX_GAMES: u32 = 10_000;

pub fn get_config_manager(
    path: impl Into<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, AutoplayConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct AutoplayConfig {
    /// Generated and saved on first run when empty.
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub player_name: String,
    /// Leaderboard server; scores stay local when unset or unreachable.
    pub server_url: Option<String>,
    pub data_dir: String,
    pub tick_interval_ms: u64,
    pub games: u32,
    pub bot_type: SnakeBotType,
    #[serde(default)]
    pub mint_on_game_over: bool,
    pub seed: Option<u64>,
}

impl AutoplayConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn high_score_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(HIGH_SCORE_FILE_NAME)
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(LEADERBOARD_FILE_NAME)
    }

    pub fn minted_nfts_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(MINTED_NFTS_FILE_NAME)
    }

    /// Seed for the `index`-th game, so a seeded run replays identically.
    pub fn game_seed(&self, index: u32) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(index as u64))
    }
}

impl Validate for AutoplayConfig {
    fn validate(&self) -> Result<(), String> {
        validate_tick_interval_ms(self.tick_interval_ms)?;
        if self.games == 0 {
            return Err("games must be at least 1".to_string());
        }
        if self.games > MAX_GAMES {
            return Err(format!("games must not exceed {}", MAX_GAMES));
        }
        if self.data_dir.trim().is_empty() {
            return Err("data_dir must not be empty".to_string());
        }
        if let Some(url) = &self.server_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(format!("server_url must start with http:// or https://, got {}", url));
        }
        Ok(())
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            player_id: String::new(),
            player_name: String::new(),
            server_url: None,
            data_dir: "retro_snake_data".to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            games: 1,
            bot_type: SnakeBotType::Efficient,
            mint_on_game_over: false,
            seed: None,
        }
    }
}
