use std::io::ErrorKind;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use crate::identifiers::PlayerId;
use crate::log;
use super::fee::MINIMUM_MINT_SCORE;
use super::metadata::{AttributeValue, NftMetadata};

pub const DEFAULT_FAILURE_RATE: f64 = 0.1;
pub const MAX_TOKEN_ID: u32 = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintedNft {
    pub token_id: String,
    pub transaction_hash: String,
    pub metadata: NftMetadata,
    pub player_id: PlayerId,
    pub fee_usd: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    pub token_id: String,
    pub transaction_hash: String,
}

#[derive(Debug)]
pub enum MintError {
    BelowMinimumScore { score: u32, minimum: u32 },
    NetworkCongestion,
    Ledger(String),
}

impl std::fmt::Display for MintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MintError::BelowMinimumScore { score, minimum } => {
                write!(f, "Minimum score of {} required for minting, got {}", minimum, score)
            }
            MintError::NetworkCongestion => write!(f, "Network congestion. Please try again."),
            MintError::Ledger(e) => write!(f, "Failed to record minted NFT: {}", e),
        }
    }
}

impl std::error::Error for MintError {}

/// Pretend minter: waits, sometimes fails, and on success records the token
/// in a local JSON ledger. Nothing touches a chain.
pub struct MockMinter {
    ledger_path: PathBuf,
    rng: SessionRng,
    latency: Range<Duration>,
    failure_rate: f64,
}

impl MockMinter {
    pub fn new(ledger_path: impl Into<PathBuf>, rng: SessionRng) -> Self {
        Self {
            ledger_path: ledger_path.into(),
            rng,
            latency: Duration::from_secs(2)..Duration::from_secs(5),
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }

    pub fn with_latency(mut self, latency: Range<Duration>) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate;
        self
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub async fn mint(
        &mut self,
        metadata: NftMetadata,
        player_id: &PlayerId,
        fee_usd: f64,
    ) -> Result<MintReceipt, MintError> {
        let score = match metadata.attribute("Score") {
            Some(AttributeValue::Number(score)) => *score,
            _ => 0,
        };
        if score < MINIMUM_MINT_SCORE {
            return Err(MintError::BelowMinimumScore {
                score,
                minimum: MINIMUM_MINT_SCORE,
            });
        }

        tokio::time::sleep(self.simulated_latency()).await;

        if self.rng.chance(self.failure_rate) {
            log!("Mock mint for {} failed: simulated congestion", player_id);
            return Err(MintError::NetworkCongestion);
        }

        let receipt = MintReceipt {
            token_id: self.rng.random_range(0..MAX_TOKEN_ID).to_string(),
            transaction_hash: self.transaction_hash(),
        };

        let mut ledger = self.read_ledger().await.map_err(MintError::Ledger)?;
        ledger.push(MintedNft {
            token_id: receipt.token_id.clone(),
            transaction_hash: receipt.transaction_hash.clone(),
            metadata,
            player_id: player_id.clone(),
            fee_usd,
            timestamp: Utc::now(),
        });
        self.write_ledger(&ledger).await.map_err(MintError::Ledger)?;

        log!("Minted token #{} for {} ({})", receipt.token_id, player_id, receipt.transaction_hash);
        Ok(receipt)
    }

    pub async fn player_nfts(&self, player_id: &PlayerId) -> Result<Vec<MintedNft>, String> {
        let ledger = self.read_ledger().await?;
        Ok(ledger.into_iter().filter(|nft| &nft.player_id == player_id).collect())
    }

    fn simulated_latency(&mut self) -> Duration {
        let start = self.latency.start.as_millis() as u64;
        let end = self.latency.end.as_millis() as u64;
        if start >= end {
            return self.latency.start;
        }
        Duration::from_millis(self.rng.random_range(start..end))
    }

    fn transaction_hash(&mut self) -> String {
        let mut hash = String::with_capacity(66);
        hash.push_str("0x");
        for _ in 0..4 {
            hash.push_str(&format!("{:016x}", self.rng.random::<u64>()));
        }
        hash
    }

    async fn read_ledger(&self) -> Result<Vec<MintedNft>, String> {
        match tokio::fs::read_to_string(&self.ledger_path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| format!("Failed to parse mint ledger: {}", e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(format!("Failed to read mint ledger: {}", e)),
        }
    }

    async fn write_ledger(&self, ledger: &[MintedNft]) -> Result<(), String> {
        if let Some(parent) = self.ledger_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Failed to create ledger directory: {}", e))?;
        }
        let content = serde_json::to_string_pretty(ledger)
            .map_err(|e| format!("Failed to serialize mint ledger: {}", e))?;
        tokio::fs::write(&self.ledger_path, content)
            .await
            .map_err(|e| format!("Failed to write mint ledger: {}", e))
    }
}
