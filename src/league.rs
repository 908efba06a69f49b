use std::path::PathBuf;

use futures::{stream, StreamExt, TryStreamExt};
use tracing::{info, instrument};

use crate::client::{Session, XbshlClient};
use crate::config::ScrapeConfig;
use crate::error::{Result, XbshlError};
use crate::model::{LeagueSnapshot, PlayerAnalytics, Roster, Standings};
use crate::output;

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub players: usize,
    /// Team stat lines across every pulled season.
    pub teams: usize,
    pub files: Vec<PathBuf>,
}

/// The binary takes its settings from the environment only.
pub fn reject_arguments<I>(args: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let extra: Vec<String> = args.into_iter().collect();
    if extra.is_empty() {
        Ok(())
    } else {
        Err(XbshlError::Config(format!(
            "unexpected arguments {extra:?}; settings are read from XBSHL_* environment variables"
        )))
    }
}

/// Pull the roster, player analytics and standings the config asks for.
pub async fn scrape(session: &Session) -> Result<LeagueSnapshot> {
    let config = session.config();

    let mut players = session.get_roster().await?;
    info!(count = players.len(), season = %config.target_season, "fetched roster");

    if config.eager_mode {
        attach_analytics(session, &mut players).await?;
    }

    let teams = if config.pull_team_stats {
        Some(pull_standings(session).await?)
    } else {
        None
    };

    Ok(LeagueSnapshot { players, teams })
}

#[instrument(skip_all, fields(players = players.len()))]
async fn attach_analytics(session: &Session, players: &mut Roster) -> Result<()> {
    let concurrency = session.config().concurrency;
    let ids: Vec<Option<String>> = players.iter().map(|p| p.id.clone()).collect();

    // `buffered` yields in input order, so results line up with the roster
    let analytics: Vec<PlayerAnalytics> = stream::iter(ids)
        .map(|id| async move {
            match id {
                Some(id) => session.get_player_analytics(&id).await,
                None => Ok(PlayerAnalytics::default()),
            }
        })
        .buffered(concurrency)
        .try_collect()
        .await?;

    for (player, analytics) in players.iter_mut().zip(analytics) {
        player.analytics = analytics;
    }
    info!(concurrency, "fetched player analytics");
    Ok(())
}

async fn pull_standings(session: &Session) -> Result<Standings> {
    let mut teams = Standings::new();
    for &season in &session.config().seasons_to_pull {
        teams.extend(session.get_team_stats(season).await?);
    }
    info!(count = teams.len(), "fetched team stats");
    Ok(teams)
}

/// Log in, scrape and write both documents to the configured output
/// directory. Nothing is written if any step before the write fails.
pub async fn run(config: &ScrapeConfig) -> Result<RunSummary> {
    config.validate()?;

    let session = XbshlClient::new(config)?.authenticate().await?;
    let snapshot = scrape(&session).await?;
    let files = output::write_snapshot(&snapshot, &config.output_dir)?;

    Ok(RunSummary {
        players: snapshot.players.len(),
        teams: snapshot.teams.as_ref().map_or(0, Vec::len),
        files,
    })
}
