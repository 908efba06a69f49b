use serde::Serialize;

/// A position filter understood by the `player` mode of the site.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Position {
    Center,
    Wing,
    Defense,
    Goalie,
}

/// One season's aggregated stat line for a skater (center, wing or defense).
///
/// `faceoff_percentage` is only filled for centers and `defense_rating` only
/// for defensemen; the other layouts leave them `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkaterStats {
    pub season: u32,
    #[serde(rename = "team_name")]
    pub team_names: Vec<String>,
    pub games_played: i32,
    pub goals: i32,
    pub assists: i32,
    pub penalty_minutes: i32,
    pub hits: i32,
    pub shots: i32,
    pub game_winning_goals: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faceoff_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_rating: Option<f64>,
    pub plus_minus: i32,
    pub wins: i32,
    pub losses: i32,
    pub overtime_losses: i32,
}

/// One season's aggregated stat line for a goalie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalieStats {
    pub season: u32,
    #[serde(rename = "team_name")]
    pub team_names: Vec<String>,
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub overtime_losses: i32,
    pub goals_against: i32,
    pub saves: i32,
    pub goals_against_average: f64,
    pub save_percentage: f64,
    pub saves_per_goal_against: f64,
    pub shutouts: i32,
}
