use std::fmt;

use serde::{Deserialize, Serialize};

pub const ANONYMOUS_PLAYER_ID: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_PLAYER_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_PLAYER_ID
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who played a session, as far as the leaderboard and the minter care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub player_id: PlayerId,
    pub player_name: String,
}

impl PlayerIdentity {
    pub fn new(player_id: PlayerId, player_name: String) -> Self {
        Self { player_id, player_name }
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.player_name, self.player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_id() {
        assert!(PlayerId::anonymous().is_anonymous());
        assert!(!PlayerId::from("guest-01").is_anonymous());
    }

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let identity = PlayerIdentity::new(PlayerId::from("p1"), "Sly Asp".to_string());
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json, serde_json::json!({ "playerId": "p1", "playerName": "Sly Asp" }));
        assert_eq!(identity.to_string(), "Sly Asp (p1)");
    }
}
