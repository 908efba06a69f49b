use serde::Serialize;

use super::stats::{GoalieStats, SkaterStats};

/// A list of players as they appear on the league roster page.
pub type Roster = Vec<PlayerRecord>;

/// One roster entry: the player, their self-rated position preferences and
/// any per-position season stats pulled for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    /// Site-assigned player id. `None` when the roster link carries no target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub center: u8,
    pub left_wing: u8,
    pub right_wing: u8,
    pub defense: u8,
    pub goalie: u8,
    pub analytics: PlayerAnalytics,
}

/// Season stat lines for a player, one collection per position played.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PlayerAnalytics {
    #[serde(rename = "center")]
    pub center_stats: Vec<SkaterStats>,
    #[serde(rename = "wing")]
    pub wing_stats: Vec<SkaterStats>,
    #[serde(rename = "defense")]
    pub defense_stats: Vec<SkaterStats>,
    #[serde(rename = "goalie")]
    pub goalie_stats: Vec<GoalieStats>,
}

impl PlayerAnalytics {
    pub fn is_empty(&self) -> bool {
        self.center_stats.is_empty()
            && self.wing_stats.is_empty()
            && self.defense_stats.is_empty()
            && self.goalie_stats.is_empty()
    }
}
