use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::client::{endpoint_url, Endpoint, VIEW_SEASON};
use crate::config::RowErrorPolicy;
use crate::error::{Result, XbshlError};
use crate::model::{PlayerAnalytics, PlayerRecord, Roster};
use crate::scraper::anchor::find_unique_anchor;
use crate::scraper::{self, child_elements, collect_rows, inner_text, table_rows};

/// Detail cells, one per roster entry.
const ENTRY_SELECTOR: &str = r#"td[colspan="2"][align="center"]"#;
/// Filled star icon; empty stars use a different image.
const STAR_MARKER: &str = "icon_star_2";

#[instrument(skip(client, base_url))]
pub(crate) async fn get_roster(
    client: &reqwest::Client,
    base_url: &str,
    season: &str,
    policy: RowErrorPolicy,
) -> Result<Roster> {
    let url = endpoint_url(base_url, Endpoint::LeagueRosters, &[]);
    let form = [("season", season), ("button", VIEW_SEASON)];
    let document = scraper::post_document(client, &url, &form).await?;
    let roster = parse_roster(&document, policy)?;
    debug!(count = roster.len(), season, "parsed roster");
    Ok(roster)
}

/// Extract every roster entry in document order. Player analytics are left
/// empty.
pub(crate) fn parse_roster(document: &scraper::Html, policy: RowErrorPolicy) -> Result<Roster> {
    let selector = Selector::parse(ENTRY_SELECTOR)?;
    let entries = document
        .select(&selector)
        .map(|entry| parse_entry(entry).map(Some));
    collect_rows(entries, policy, "roster entry")
}

fn parse_entry(entry: ElementRef) -> Result<PlayerRecord> {
    let [center, left_wing, right_wing, defense, goalie] = parse_preferences(entry)?;

    let anchor = find_unique_anchor(&entry)?;
    let name = inner_text(&anchor);
    let id = anchor.value().attr("href").and_then(player_id_from_href);

    Ok(PlayerRecord {
        id,
        name,
        center,
        left_wing,
        right_wing,
        defense,
        goalie,
        analytics: PlayerAnalytics::default(),
    })
}

/// Star counts from the nested preference table, ordered C, LW, RW, D, G.
fn parse_preferences(entry: ElementRef) -> Result<[u8; 5]> {
    let table = child_elements(entry, "table")
        .into_iter()
        .next()
        .ok_or_else(|| XbshlError::structure("roster entry has no preference table"))?;

    let rows = table_rows(table);
    let stars_row = rows
        .get(1)
        .ok_or_else(|| XbshlError::structure("preference table has no star row"))?;

    let cells: Vec<ElementRef> = stars_row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect();
    if cells.len() < 5 {
        return Err(XbshlError::structure(format!(
            "preference row has {} cells, expected 5",
            cells.len()
        )));
    }

    let mut stars = [0u8; 5];
    for (slot, cell) in stars.iter_mut().zip(&cells) {
        *slot = count_stars(cell);
    }
    Ok(stars)
}

fn count_stars(cell: &ElementRef) -> u8 {
    let count = cell
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|marker| marker.html().contains(STAR_MARKER))
        .count();
    u8::try_from(count).unwrap_or(u8::MAX)
}

/// The player id is the value after the second `=` of the profile link,
/// e.g. `index.php?mode=player&player_id=42` gives `42`.
fn player_id_from_href(href: &str) -> Option<String> {
    href.split('=')
        .nth(2)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
