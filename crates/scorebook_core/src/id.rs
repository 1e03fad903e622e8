//! Identifiers for matches and players.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Match identifier - identifies a single scored match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Create a new random MatchId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from UUID bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "match_{}", self.0)
    }
}

/// Player identity as the scorer names them.
///
/// Names are trimmed on construction; two players are the same player iff
/// their trimmed names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Create a player name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Get as str
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PlayerName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for PlayerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_unique() {
        let id1 = MatchId::new();
        let id2 = MatchId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_match_id_display() {
        let id = MatchId::from_bytes([0u8; 16]);
        assert!(id.to_string().starts_with("match_"));
    }

    #[test]
    fn test_player_name_trimmed() {
        let name = PlayerName::new("  Rahul  ");
        assert_eq!(name.as_str(), "Rahul");
        assert_eq!(name, PlayerName::from("Rahul"));
    }

    #[test]
    fn test_player_name_serde() {
        let name = PlayerName::from("Ishan");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Ishan\"");
        let back: PlayerName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);

        let padded: PlayerName = serde_json::from_str("\"  Ishan \"").unwrap();
        assert_eq!(padded, name);
    }
}
