use serde::Serialize;

/// A list of team stat lines, possibly spanning several seasons.
pub type Standings = Vec<TeamStatRecord>;

/// A single row of the league standings for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStatRecord {
    /// Three-letter franchise code, empty when the name is not a known franchise.
    pub abbreviation: String,
    pub name: String,
    pub season: u32,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub overtime_losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub hits: u32,
    pub shots: u32,
    pub penalty_minutes: u32,
}
