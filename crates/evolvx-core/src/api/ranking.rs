//! Ranking and leaderboard records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::wire::optional_timestamp;

/// Rank tier shown next to an MMR score.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
    /// A tier name this client does not know yet.
    Other(String),
}

impl RankTier {
    /// Tier for an averaged MMR score: 1000+ Gold, 500+ Silver, else Bronze.
    pub fn from_mmr(score: i64) -> Self {
        if score >= 1000 {
            RankTier::Gold
        } else if score >= 500 {
            RankTier::Silver
        } else {
            RankTier::Bronze
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Other(name) => name,
        }
    }
}

impl From<&str> for RankTier {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bronze" => RankTier::Bronze,
            "silver" => RankTier::Silver,
            "gold" => RankTier::Gold,
            _ => RankTier::Other(value.trim().to_string()),
        }
    }
}

impl std::fmt::Display for RankTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for RankTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RankTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RankTier::from(raw.as_str()))
    }
}

/// One entry of `GET /rankings/user/{id}`.
///
/// Older backends answer with `rank`/`mmr` instead of `rank_tier`/`mmr_score`;
/// both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRanking {
    pub muscle_group: String,
    #[serde(alias = "mmr")]
    pub mmr_score: i64,
    #[serde(alias = "rank")]
    pub rank_tier: RankTier,
    #[serde(default, with = "optional_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub age: Option<u32>,
    pub mmr_score: i64,
    pub rank_tier: RankTier,
    /// Only set on the friends leaderboard.
    #[serde(default)]
    pub is_current_user: bool,
}

/// Response of `GET /rankings/leaderboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub current_page: u32,
    pub muscle_group: String,
}

/// Response of `GET /rankings/leaderboard/friends`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendsLeaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub muscle_group: String,
}

/// Query of `GET /rankings/leaderboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardQuery {
    /// `overall` or a muscle group name.
    pub muscle_group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    pub page: u32,
    pub per_page: u32,
}

pub const OVERALL: &str = "overall";

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            muscle_group: OVERALL.to_string(),
            min_age: None,
            max_age: None,
            page: 1,
            per_page: 10,
        }
    }
}
