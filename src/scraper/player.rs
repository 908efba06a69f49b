use ::scraper::{ElementRef, Selector};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::client::{endpoint_url, Endpoint, VIEW_SEASON};
use crate::config::RowErrorPolicy;
use crate::error::{Result, XbshlError};
use crate::model::{GoalieStats, PlayerAnalytics, Position, SkaterStats};
use crate::scraper::{
    self, child_elements, collect_rows, inner_text, parse_decimal, parse_int,
};

/// Rows that open one season's aggregated line (the site alternates two styles).
const SEASON_ROW_SELECTOR: &str = ".row_1g_h, .row_1f_h";
/// Element inside a season row holding text like `"Season 31"`.
const SEASON_LABEL_SELECTOR: &str = ".color_2a";

/// A stat column the site can show on a player page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stat {
    GamesPlayed,
    Goals,
    Assists,
    PenaltyMinutes,
    Hits,
    Shots,
    GameWinningGoals,
    FaceoffPercentage,
    DefenseRating,
    PlusMinus,
    Wins,
    Losses,
    OvertimeLosses,
    GoalsAgainst,
    Saves,
    GoalsAgainstAverage,
    SavePercentage,
    SavesPerGoalAgainst,
    Shutouts,
}

impl Stat {
    fn is_decimal(self) -> bool {
        matches!(
            self,
            Stat::FaceoffPercentage
                | Stat::DefenseRating
                | Stat::GoalsAgainstAverage
                | Stat::SavePercentage
                | Stat::SavesPerGoalAgainst
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StatValue {
    Int(i32),
    Decimal(f64),
}

/// Raw values read from one season row, before they are shaped into a record.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatLine {
    season: u32,
    team_names: Vec<String>,
    values: Vec<(Stat, StatValue)>,
}

impl StatLine {
    fn int(&self, stat: Stat) -> i32 {
        self.values
            .iter()
            .find_map(|(s, v)| match v {
                StatValue::Int(n) if *s == stat => Some(*n),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn decimal(&self, stat: Stat) -> Option<f64> {
        self.values.iter().find_map(|(s, v)| match v {
            StatValue::Decimal(x) if *s == stat => Some(*x),
            _ => None,
        })
    }
}

/// Column positions for one position's stats page. Column 0 always holds the
/// team links; unlisted columns (points, corsi, win %) are ignored.
pub(crate) struct StatLayout<R> {
    pub(crate) position: Position,
    columns: &'static [(usize, Stat)],
    build: fn(StatLine) -> R,
}

pub(crate) const CENTER: StatLayout<SkaterStats> = StatLayout {
    position: Position::Center,
    columns: &[
        (1, Stat::GamesPlayed),
        (2, Stat::Goals),
        (3, Stat::Assists),
        (5, Stat::PenaltyMinutes),
        (6, Stat::Hits),
        (7, Stat::Shots),
        (8, Stat::GameWinningGoals),
        (9, Stat::FaceoffPercentage),
        (10, Stat::PlusMinus),
        (12, Stat::Wins),
        (13, Stat::Losses),
        (14, Stat::OvertimeLosses),
    ],
    build: skater_from_line,
};

pub(crate) const WING: StatLayout<SkaterStats> = StatLayout {
    position: Position::Wing,
    columns: &[
        (1, Stat::GamesPlayed),
        (2, Stat::Goals),
        (3, Stat::Assists),
        (5, Stat::PenaltyMinutes),
        (6, Stat::Hits),
        (7, Stat::Shots),
        (8, Stat::GameWinningGoals),
        (9, Stat::PlusMinus),
        (11, Stat::Wins),
        (12, Stat::Losses),
        (13, Stat::OvertimeLosses),
    ],
    build: skater_from_line,
};

pub(crate) const DEFENSE: StatLayout<SkaterStats> = StatLayout {
    position: Position::Defense,
    columns: &[
        (1, Stat::GamesPlayed),
        (2, Stat::Goals),
        (3, Stat::Assists),
        (5, Stat::PenaltyMinutes),
        (6, Stat::Hits),
        (7, Stat::Shots),
        (8, Stat::GameWinningGoals),
        (9, Stat::DefenseRating),
        (10, Stat::PlusMinus),
        (12, Stat::Wins),
        (13, Stat::Losses),
        (14, Stat::OvertimeLosses),
    ],
    build: skater_from_line,
};

pub(crate) const GOALIE: StatLayout<GoalieStats> = StatLayout {
    position: Position::Goalie,
    columns: &[
        (1, Stat::GamesPlayed),
        (2, Stat::Wins),
        (3, Stat::Losses),
        (4, Stat::OvertimeLosses),
        (6, Stat::GoalsAgainst),
        (7, Stat::Saves),
        (8, Stat::GoalsAgainstAverage),
        (9, Stat::SavePercentage),
        (10, Stat::SavesPerGoalAgainst),
        (11, Stat::Shutouts),
    ],
    build: goalie_from_line,
};

fn skater_from_line(line: StatLine) -> SkaterStats {
    SkaterStats {
        games_played: line.int(Stat::GamesPlayed),
        goals: line.int(Stat::Goals),
        assists: line.int(Stat::Assists),
        penalty_minutes: line.int(Stat::PenaltyMinutes),
        hits: line.int(Stat::Hits),
        shots: line.int(Stat::Shots),
        game_winning_goals: line.int(Stat::GameWinningGoals),
        faceoff_percentage: line.decimal(Stat::FaceoffPercentage),
        defense_rating: line.decimal(Stat::DefenseRating),
        plus_minus: line.int(Stat::PlusMinus),
        wins: line.int(Stat::Wins),
        losses: line.int(Stat::Losses),
        overtime_losses: line.int(Stat::OvertimeLosses),
        season: line.season,
        team_names: line.team_names,
    }
}

fn goalie_from_line(line: StatLine) -> GoalieStats {
    GoalieStats {
        games_played: line.int(Stat::GamesPlayed),
        wins: line.int(Stat::Wins),
        losses: line.int(Stat::Losses),
        overtime_losses: line.int(Stat::OvertimeLosses),
        goals_against: line.int(Stat::GoalsAgainst),
        saves: line.int(Stat::Saves),
        goals_against_average: line.decimal(Stat::GoalsAgainstAverage).unwrap_or_default(),
        save_percentage: line.decimal(Stat::SavePercentage).unwrap_or_default(),
        saves_per_goal_against: line.decimal(Stat::SavesPerGoalAgainst).unwrap_or_default(),
        shutouts: line.int(Stat::Shutouts),
        season: line.season,
        team_names: line.team_names,
    }
}

/// Fetch and parse one position's season stats for a player.
#[instrument(skip(client, base_url, layout), fields(position = %layout.position))]
pub(crate) async fn get_position_stats<R>(
    client: &reqwest::Client,
    base_url: &str,
    player_id: &str,
    season: &str,
    layout: &StatLayout<R>,
    min_season: u32,
    policy: RowErrorPolicy,
) -> Result<Vec<R>> {
    let position = layout.position.to_string();
    let url = endpoint_url(
        base_url,
        Endpoint::Player,
        &[("filter_pos", position.as_str()), ("player_id", player_id)],
    );
    let form = [("season", season), ("button", VIEW_SEASON)];
    let document = scraper::post_document(client, &url, &form).await?;
    let stats = parse_position_stats(&document, layout, min_season, policy)?;
    debug!(count = stats.len(), player_id, "parsed season stats");
    Ok(stats)
}

/// Fetch every position's season stats for a player, in the order wing,
/// center, defense, goalie.
#[instrument(skip(client, base_url))]
pub(crate) async fn get_player_analytics(
    client: &reqwest::Client,
    base_url: &str,
    player_id: &str,
    season: &str,
    min_season: u32,
    policy: RowErrorPolicy,
) -> Result<PlayerAnalytics> {
    let wing_stats =
        get_position_stats(client, base_url, player_id, season, &WING, min_season, policy).await?;
    let center_stats =
        get_position_stats(client, base_url, player_id, season, &CENTER, min_season, policy)
            .await?;
    let defense_stats =
        get_position_stats(client, base_url, player_id, season, &DEFENSE, min_season, policy)
            .await?;
    let goalie_stats =
        get_position_stats(client, base_url, player_id, season, &GOALIE, min_season, policy)
            .await?;

    Ok(PlayerAnalytics {
        center_stats,
        wing_stats,
        defense_stats,
        goalie_stats,
    })
}

/// Extract the season rows of a player page, dropping seasons older than
/// `min_season`.
pub(crate) fn parse_position_stats<R>(
    document: &scraper::Html,
    layout: &StatLayout<R>,
    min_season: u32,
    policy: RowErrorPolicy,
) -> Result<Vec<R>> {
    let row_selector = Selector::parse(SEASON_ROW_SELECTOR)?;
    let label_selector = Selector::parse(SEASON_LABEL_SELECTOR)?;
    let link_selector = Selector::parse("a")?;

    let rows = document.select(&row_selector).map(|row| -> Result<Option<R>> {
        let season = parse_season(&row, &label_selector)?;
        if season < min_season {
            return Ok(None);
        }
        let line = parse_stat_line(row, season, layout.columns, &link_selector, layout.position)?;
        Ok(Some((layout.build)(line)))
    });

    collect_rows(rows, policy, "season stat row")
}

/// Season number from a label like `"Season 31"`.
fn parse_season(row: &ElementRef, label_selector: &Selector) -> Result<u32> {
    let label = row
        .select(label_selector)
        .next()
        .ok_or(XbshlError::ElementNotFound {
            context: "season label in stat row",
        })?;
    let text = inner_text(&label);
    match text.split_whitespace().nth(1) {
        Some(number) => parse_int(number),
        None => Err(XbshlError::Format {
            value: text,
            reason: "expected a season label like \"Season 31\"".to_string(),
        }),
    }
}

fn parse_stat_line(
    row: ElementRef,
    season: u32,
    columns: &[(usize, Stat)],
    link_selector: &Selector,
    position: Position,
) -> Result<StatLine> {
    let cells = child_elements(row, "td");
    let cell = |index: usize| {
        cells.get(index).ok_or_else(|| {
            XbshlError::structure(format!(
                "{position} stat row has {} columns, needs column {index}",
                cells.len()
            ))
        })
    };

    let team_names = cell(0)?
        .select(link_selector)
        .map(|link| inner_text(&link))
        .collect_vec();

    let values = columns
        .iter()
        .map(|&(index, stat)| -> Result<(Stat, StatValue)> {
            let text = inner_text(cell(index)?);
            let value = if stat.is_decimal() {
                StatValue::Decimal(parse_decimal(&text)?)
            } else {
                StatValue::Int(parse_int(&text)?)
            };
            Ok((stat, value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(StatLine {
        season,
        team_names,
        values,
    })
}
