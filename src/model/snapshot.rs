use serde::Serialize;

use super::roster::Roster;
use super::standings::Standings;

/// Everything pulled in one run, handed to the output writer in one piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeagueSnapshot {
    pub players: Roster,
    /// `None` when team stats were not requested for this run.
    pub teams: Option<Standings>,
}
