use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Result, XbshlError};

pub const ENV_PREFIX: &str = "XBSHL_";

const DEFAULT_BASE_URL: &str = "http://xbox-sports.com/leagues/xbshl";
const DEFAULT_LOGIN_URL: &str = "http://forum.xbox-sports.com/login.php?do=login";

/// What to do when a single roster entry or stat row cannot be extracted.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RowErrorPolicy {
    /// Abort the whole run on the first bad row.
    #[default]
    Fatal,
    /// Log a warning, drop the row and keep going.
    Skip,
}

/// Settings for one scrape run.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// Season value posted to the roster and player pages.
    #[serde(default = "default_target_season")]
    pub target_season: String,
    /// Seasons pulled from the standings page. The smallest one is also the
    /// cut-off for per-player season stats.
    #[serde(default = "default_seasons_to_pull")]
    pub seasons_to_pull: Vec<u32>,
    /// Fetch per-position stats for every rostered player.
    #[serde(default = "default_true")]
    pub eager_mode: bool,
    #[serde(default = "default_true")]
    pub pull_team_stats: bool,
    #[serde(default)]
    pub on_row_error: RowErrorPolicy,
    /// Number of players whose stats may be in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_url")]
    pub login_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_target_season() -> String {
    "30".to_string()
}

fn default_seasons_to_pull() -> Vec<u32> {
    vec![30]
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    1
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_login_url() -> String {
    DEFAULT_LOGIN_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target_season: default_target_season(),
            seasons_to_pull: default_seasons_to_pull(),
            eager_mode: true,
            pull_team_stats: true,
            on_row_error: RowErrorPolicy::default(),
            concurrency: default_concurrency(),
            base_url: default_base_url(),
            login_url: default_login_url(),
            username: None,
            password: None,
            output_dir: default_output_dir(),
        }
    }
}

impl ScrapeConfig {
    /// Load the config from `XBSHL_*` environment variables, reading a `.env`
    /// file first if one exists.
    pub fn from_env() -> Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        Self::from_vars(std::env::vars())
    }

    /// Load the config from an explicit set of `XBSHL_*` key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_season.trim().is_empty() {
            return Err(XbshlError::Config("target season must not be empty".into()));
        }
        if self.seasons_to_pull.is_empty() {
            return Err(XbshlError::Config(
                "at least one season to pull is required".into(),
            ));
        }
        if self.concurrency == 0 {
            return Err(XbshlError::Config("concurrency must be at least 1".into()));
        }
        Ok(())
    }

    /// Lowest season kept when filtering per-player stats.
    pub fn minimum_season_threshold(&self) -> u32 {
        self.seasons_to_pull.iter().copied().min().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ScrapeConfig::from_vars(Vec::new()).unwrap();
        assert_eq!(config.target_season, "30");
        assert_eq!(config.seasons_to_pull, vec![30]);
        assert!(config.eager_mode);
        assert!(config.pull_team_stats);
        assert_eq!(config.on_row_error, RowErrorPolicy::Fatal);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.username.is_none());
    }

    #[test]
    fn test_reads_prefixed_values() {
        let config = ScrapeConfig::from_vars(vars(&[
            ("XBSHL_TARGET_SEASON", "31"),
            ("XBSHL_SEASONS_TO_PULL", "31,29,30"),
            ("XBSHL_EAGER_MODE", "false"),
            ("XBSHL_ON_ROW_ERROR", "skip"),
            ("XBSHL_CONCURRENCY", "4"),
            ("XBSHL_USERNAME", "scout"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.target_season, "31");
        assert_eq!(config.seasons_to_pull, vec![31, 29, 30]);
        assert!(!config.eager_mode);
        assert_eq!(config.on_row_error, RowErrorPolicy::Skip);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.username.as_deref(), Some("scout"));
        assert_eq!(config.minimum_season_threshold(), 29);
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let err = ScrapeConfig::from_vars(vars(&[("XBSHL_CONCURRENCY", "0")])).unwrap_err();
        assert!(matches!(err, XbshlError::Config(_)));
    }

    #[test]
    fn test_rejects_empty_season_list() {
        let config = ScrapeConfig {
            seasons_to_pull: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(XbshlError::Config(_))));
    }

    #[test]
    fn test_row_error_policy_from_str() {
        assert_eq!("skip".parse::<RowErrorPolicy>().unwrap(), RowErrorPolicy::Skip);
        assert_eq!(RowErrorPolicy::Fatal.to_string(), "fatal");
    }
}
