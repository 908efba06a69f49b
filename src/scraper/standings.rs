use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::client::{endpoint_url, Endpoint, VIEW_SEASON};
use crate::config::RowErrorPolicy;
use crate::error::{Result, XbshlError};
use crate::model::{Standings, TeamStatRecord};
use crate::scraper::franchise::team_abbreviation;
use crate::scraper::{self, child_elements, collect_rows, inner_text, parse_int, table_rows};

const STANDINGS_TABLE_SELECTOR: &str = "table.table_1#sort_table";
/// Regular season; the standings page also lists playoff stages.
const REGULAR_SEASON_STAGE: &str = "1";

#[instrument(skip(client, base_url))]
pub(crate) async fn get_standings(
    client: &reqwest::Client,
    base_url: &str,
    season: u32,
    policy: RowErrorPolicy,
) -> Result<Standings> {
    let url = endpoint_url(base_url, Endpoint::Standings, &[]);
    let season_value = season.to_string();
    let form = [
        ("season", season_value.as_str()),
        ("stage", REGULAR_SEASON_STAGE),
        ("button", VIEW_SEASON),
    ];
    let document = scraper::post_document(client, &url, &form).await?;
    let teams = parse_standings(&document, season, policy)?;
    debug!(count = teams.len(), season, "parsed standings");
    Ok(teams)
}

pub(crate) fn parse_standings(
    document: &scraper::Html,
    season: u32,
    policy: RowErrorPolicy,
) -> Result<Standings> {
    let table_selector = Selector::parse(STANDINGS_TABLE_SELECTOR)?;
    let link_selector = Selector::parse("a")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or(XbshlError::ElementNotFound {
            context: "standings table",
        })?;

    let rows = table_rows(table).into_iter().map(|row| {
        let cells = child_elements(row, "td");
        // header rows only carry <th> cells
        if cells.is_empty() {
            return Ok(None);
        }
        parse_team_row(&cells, season, &link_selector).map(Some)
    });

    collect_rows(rows, policy, "standings row")
}

fn parse_team_row(
    cells: &[ElementRef],
    season: u32,
    link_selector: &Selector,
) -> Result<TeamStatRecord> {
    if cells.len() < 12 {
        return Err(XbshlError::structure(format!(
            "standings row has {} columns, expected 12",
            cells.len()
        )));
    }

    let name = cells[0]
        .select(link_selector)
        .next()
        .map(|link| inner_text(&link))
        .unwrap_or_else(|| inner_text(&cells[0]));
    let int = |index: usize| parse_int::<u32>(&inner_text(&cells[index]));

    Ok(TeamStatRecord {
        abbreviation: team_abbreviation(&name).to_string(),
        season,
        games_played: int(1)?,
        wins: int(2)?,
        losses: int(3)?,
        overtime_losses: int(4)?,
        points: int(5)?,
        // column 6 is not carried over
        goals_for: int(7)?,
        goals_against: int(8)?,
        hits: int(9)?,
        shots: int(10)?,
        penalty_minutes: int(11)?,
        name,
    })
}
