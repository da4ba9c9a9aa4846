use serde::{Deserialize, Serialize};

pub const MINIMUM_MINT_SCORE: u32 = 50;

const BASE_FEE_USD: f64 = 0.50;
const FEE_PER_POINT_USD: f64 = 0.005;
const MAX_FEE_USD: f64 = 2.00;
const DEVELOPER_SHARE: f64 = 0.5;

/// `min(0.50 + 0.005 * score, 2.00)` in USD.
pub fn calculate_minting_fee(score: u32) -> f64 {
    (BASE_FEE_USD + FEE_PER_POINT_USD * score as f64).min(MAX_FEE_USD)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn for_score(score: u32) -> Self {
        match score {
            500.. => Rarity::Legendary,
            300..=499 => Rarity::Epic,
            200..=299 => Rarity::Rare,
            100..=199 => Rarity::Uncommon,
            _ => Rarity::Common,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the game-over screen offers for a score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintOffer {
    pub score: u32,
    pub fee_usd: f64,
    pub developer_share_usd: f64,
    pub minimum_score: u32,
    pub rarity: Rarity,
}

impl MintOffer {
    pub fn for_score(score: u32) -> Self {
        let fee_usd = calculate_minting_fee(score);
        Self {
            score,
            fee_usd,
            developer_share_usd: fee_usd * DEVELOPER_SHARE,
            minimum_score: MINIMUM_MINT_SCORE,
            rarity: Rarity::for_score(score),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.score >= self.minimum_score
    }

    pub fn player_share_usd(&self) -> f64 {
        self.fee_usd - self.developer_share_usd
    }
}
