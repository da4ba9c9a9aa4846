use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifiers::PlayerIdentity;
use super::fee::Rarity;

pub const GAME_NAME: &str = "Retro Snake";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(u32),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

impl NftAttribute {
    fn text(trait_type: &str, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Text(value.into()),
        }
    }
}

/// ERC-721 style metadata; `image` holds inline SVG markup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<NftAttribute>,
}

impl NftMetadata {
    pub fn for_score(score: u32, player: &PlayerIdentity, timestamp: DateTime<Utc>) -> Self {
        let date = timestamp.format("%Y-%m-%d").to_string();
        let rarity = Rarity::for_score(score);

        Self {
            name: format!("Snake Score: {}", score),
            description: format!(
                "A high score of {} points achieved by {} in the {} Game on {}.",
                score, player.player_name, GAME_NAME, date
            ),
            image: score_image_svg(score, &player.player_name),
            attributes: vec![
                NftAttribute {
                    trait_type: "Score".to_string(),
                    value: AttributeValue::Number(score),
                },
                NftAttribute::text("Player", player.player_name.clone()),
                NftAttribute::text("Date", date),
                NftAttribute::text("Game", GAME_NAME),
                NftAttribute::text("Rarity", rarity.as_str()),
            ],
        }
    }

    pub fn attribute(&self, trait_type: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| &a.value)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn score_image_svg(score: u32, player_name: &str) -> String {
    format!(
        concat!(
            r##"<svg width="400" height="400" xmlns="http://www.w3.org/2000/svg">"##,
            r##"<rect width="400" height="400" fill="#fefce8" stroke="#a16207" stroke-width="4"/>"##,
            r##"<text x="200" y="80" text-anchor="middle" font-family="monospace" font-size="24" fill="#a16207">SNAKE SCORE NFT</text>"##,
            r##"<text x="200" y="160" text-anchor="middle" font-family="monospace" font-size="48" fill="#dc2626">{}</text>"##,
            r##"<text x="200" y="220" text-anchor="middle" font-family="monospace" font-size="16" fill="#4b5563">by {}</text>"##,
            r##"<text x="200" y="280" text-anchor="middle" font-family="monospace" font-size="14" fill="#4b5563">{}</text>"##,
            r##"</svg>"##,
        ),
        score,
        escape_xml(player_name),
        GAME_NAME,
    )
}
