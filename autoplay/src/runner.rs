use chrono::Utc;
use tokio::sync::mpsc;

use common::games::SessionRng;
use common::games::snake::{SessionCommand, SessionSummary, SnakeSession, SnakeSessionSettings};
use common::id_generator::{generate_guest_name, generate_player_id};
use common::log;
use common::mint::{MintReceipt, MockMinter, NftMetadata};
use common::scores::{
    FallbackLeaderboardStore, FileLeaderboardStore, HighScoreCache, HttpLeaderboardStore,
    SessionEndHandler, SessionEndReport,
};
use common::{PlayerId, PlayerIdentity};

use crate::broadcaster::LogBroadcaster;
use crate::config::AutoplayConfig;

/// Fills in a missing player id or name. Returns true when the config changed
/// and should be saved.
pub fn ensure_identity(config: &mut AutoplayConfig, rng: &mut SessionRng) -> bool {
    let mut changed = false;
    if config.player_id.trim().is_empty() {
        config.player_id = generate_player_id(rng);
        changed = true;
    }
    if config.player_name.trim().is_empty() {
        config.player_name = generate_guest_name(rng);
        changed = true;
    }
    changed
}

#[derive(Debug)]
pub struct GameReport {
    pub index: u32,
    pub summary: SessionSummary,
    /// Absent for abandoned games.
    pub session_end: Option<SessionEndReport>,
    pub mint: Option<Result<MintReceipt, String>>,
}

pub struct AutoplayRunner {
    config: AutoplayConfig,
    identity: PlayerIdentity,
    session_end: SessionEndHandler<HttpLeaderboardStore, FileLeaderboardStore>,
    minter: Option<MockMinter>,
}

impl AutoplayRunner {
    pub fn new(config: AutoplayConfig) -> Self {
        let identity = PlayerIdentity::new(
            PlayerId::new(config.player_id.clone()),
            config.player_name.clone(),
        );

        let remote = config
            .server_url
            .as_deref()
            .and_then(|url| match HttpLeaderboardStore::new(url) {
                Ok(store) => Some(store),
                Err(e) => {
                    log!("Leaderboard client for {} unavailable, playing offline: {}", url, e);
                    None
                }
            });
        let leaderboard =
            FallbackLeaderboardStore::new(remote, FileLeaderboardStore::new(config.leaderboard_path()));
        let session_end =
            SessionEndHandler::new(HighScoreCache::new(config.high_score_path()), leaderboard);

        let minter = config.mint_on_game_over.then(|| {
            MockMinter::new(
                config.minted_nfts_path(),
                SessionRng::from_seed_or_random(config.seed),
            )
        });

        Self {
            config,
            identity,
            session_end,
            minter,
        }
    }

    pub fn with_minter(mut self, minter: MockMinter) -> Self {
        self.minter = Some(minter);
        self
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    pub async fn best_known_high_score(&self) -> u32 {
        self.session_end.best_known_high_score(&self.identity).await
    }

    /// Plays the configured number of games back to back. Ctrl+C abandons
    /// the current game and stops the run.
    pub async fn run(&mut self) -> Vec<GameReport> {
        log!(
            "Autoplay for {}: {} game(s), {:?} bot, leaderboard {}",
            self.identity,
            self.config.games,
            self.config.bot_type,
            if self.session_end.leaderboard().has_remote() { "remote" } else { "local" }
        );

        let mut reports = Vec::new();
        for index in 0..self.config.games {
            let Some((summary, interrupted)) = self.play_game(index).await else {
                break;
            };
            reports.push(self.finish_game(index, summary).await);
            if interrupted {
                log!("Interrupted, stopping after game {}", index);
                break;
            }
        }
        reports
    }

    async fn play_game(&self, index: u32) -> Option<(SessionSummary, bool)> {
        let settings = SnakeSessionSettings {
            tick_interval: self.config.tick_interval(),
            seed: self.config.game_seed(index),
            bot: Some(self.config.bot_type),
        };
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let broadcaster = LogBroadcaster::new(index);

        let mut game_handle =
            tokio::spawn(async move { SnakeSession::run(settings, command_rx, broadcaster).await });

        let mut interrupted = false;
        let result = loop {
            tokio::select! {
                result = &mut game_handle => break result,
                signal = tokio::signal::ctrl_c(), if !interrupted => {
                    if let Err(e) = signal {
                        log!("Failed to listen for Ctrl+C: {}", e);
                    }
                    interrupted = true;
                    let _ = command_tx.send(SessionCommand::Quit);
                }
            }
        };

        match result {
            Ok(summary) => Some((summary, interrupted)),
            Err(e) => {
                log!("Game {} task failed: {}", index, e);
                None
            }
        }
    }

    async fn finish_game(&mut self, index: u32, summary: SessionSummary) -> GameReport {
        if !summary.is_finished() {
            return GameReport {
                index,
                summary,
                session_end: None,
                mint: None,
            };
        }

        let report = self.session_end.handle(&self.identity, summary.final_score).await;
        let mint = match &mut self.minter {
            Some(minter) if report.mint_offer.is_eligible() => {
                log!(
                    "Minting {} score {} for ${:.2} (developer share ${:.2})",
                    report.mint_offer.rarity,
                    report.final_score,
                    report.mint_offer.fee_usd,
                    report.mint_offer.developer_share_usd
                );
                let metadata = NftMetadata::for_score(report.final_score, &self.identity, Utc::now());
                let result = minter
                    .mint(metadata, &self.identity.player_id, report.mint_offer.fee_usd)
                    .await
                    .map_err(|e| e.to_string());
                if let Err(e) = &result {
                    log!("Mint failed: {}", e);
                }
                Some(result)
            }
            _ => None,
        };

        GameReport {
            index,
            summary,
            session_end: Some(report),
            mint,
        }
    }
}
