use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, UPGRADE_INSECURE_REQUESTS};
use tracing::{debug, info, instrument};

use crate::config::{RowErrorPolicy, ScrapeConfig};
use crate::error::{Result, XbshlError};
use crate::model::*;
use crate::scraper;
use crate::scraper::player::{CENTER, DEFENSE, GOALIE, WING};

/// Value of the `button` field the site's season pickers submit.
pub(crate) const VIEW_SEASON: &str = "view+season";

/// The `mode` pages of the league site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    LeagueRosters,
    Standings,
    Player,
}

/// Build `<base_url>/index.php?mode=<endpoint>` plus any extra query pairs.
pub(crate) fn endpoint_url(base_url: &str, endpoint: Endpoint, params: &[(&str, &str)]) -> String {
    let mut url = format!("{}/index.php?mode={endpoint}", base_url.trim_end_matches('/'));
    for (key, value) in params {
        url.push('&');
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
    url
}

/// Unauthenticated entry point for the league site.
///
/// `XbshlClient` wraps a cookie-enabled [`reqwest::Client`]; logging in with
/// [`XbshlClient::authenticate`] yields a [`Session`] that carries the login
/// cookies on every later request.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> xbshl_scraper::Result<()> {
/// use xbshl_scraper::{ScrapeConfig, XbshlClient};
///
/// let config = ScrapeConfig::default();
/// let session = XbshlClient::new(&config)?.authenticate().await?;
/// let roster = session.get_roster().await?;
/// println!("Found {} players", roster.len());
/// # Ok(())
/// # }
/// ```
pub struct XbshlClient {
    http: reqwest::Client,
    config: ScrapeConfig,
}

impl XbshlClient {
    /// Create a client with a fresh cookie store.
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| XbshlError::Http {
                url: config.base_url.clone(),
                source: e,
            })?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// The client must keep cookies (`cookie_store(true)`) for the session to
    /// stay logged in.
    pub fn with_client(client: reqwest::Client, config: &ScrapeConfig) -> Self {
        Self {
            http: client,
            config: config.clone(),
        }
    }

    /// Log in with the configured credentials.
    #[instrument(skip(self), fields(url = %self.config.login_url))]
    pub async fn authenticate(self) -> Result<Session> {
        let url = &self.config.login_url;

        let mut form: Vec<(&str, &str)> = Vec::new();
        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            form.push(("vb_login_username", username.as_str()));
            form.push(("vb_login_password", password.as_str()));
            form.push(("do", "login"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let response = self
            .http
            .post(url)
            .headers(headers)
            .form(&form)
            .send()
            .await
            .map_err(|e| XbshlError::Http {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(XbshlError::Auth {
                url: url.clone(),
                status,
            });
        }
        info!("authenticated");

        Ok(Session {
            http: self.http,
            config: self.config,
        })
    }
}

/// A logged-in connection to the league site.
pub struct Session {
    http: reqwest::Client,
    config: ScrapeConfig,
}

impl Session {
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    fn policy(&self) -> RowErrorPolicy {
        self.config.on_row_error
    }

    /// POST a form to one of the site's mode pages and return the raw markup.
    #[instrument(skip(self, form))]
    pub async fn post(&self, endpoint: Endpoint, form: &[(&str, &str)]) -> Result<String> {
        let url = endpoint_url(&self.config.base_url, endpoint, &[]);
        let body = scraper::post_form(&self.http, &url, form).await?;
        debug!(bytes = body.len(), "received page");
        Ok(body)
    }

    /// Fetch the league roster for the configured target season.
    pub async fn get_roster(&self) -> Result<Roster> {
        scraper::roster::get_roster(
            &self.http,
            &self.config.base_url,
            &self.config.target_season,
            self.policy(),
        )
        .await
    }

    /// Fetch a player's center stats for seasons at or above the threshold.
    pub async fn get_center_stats(&self, player_id: &str) -> Result<Vec<SkaterStats>> {
        scraper::player::get_position_stats(
            &self.http,
            &self.config.base_url,
            player_id,
            &self.config.target_season,
            &CENTER,
            self.config.minimum_season_threshold(),
            self.policy(),
        )
        .await
    }

    /// Fetch a player's wing stats for seasons at or above the threshold.
    pub async fn get_wing_stats(&self, player_id: &str) -> Result<Vec<SkaterStats>> {
        scraper::player::get_position_stats(
            &self.http,
            &self.config.base_url,
            player_id,
            &self.config.target_season,
            &WING,
            self.config.minimum_season_threshold(),
            self.policy(),
        )
        .await
    }

    /// Fetch a player's defense stats for seasons at or above the threshold.
    pub async fn get_defense_stats(&self, player_id: &str) -> Result<Vec<SkaterStats>> {
        scraper::player::get_position_stats(
            &self.http,
            &self.config.base_url,
            player_id,
            &self.config.target_season,
            &DEFENSE,
            self.config.minimum_season_threshold(),
            self.policy(),
        )
        .await
    }

    /// Fetch a player's goalie stats for seasons at or above the threshold.
    pub async fn get_goalie_stats(&self, player_id: &str) -> Result<Vec<GoalieStats>> {
        scraper::player::get_position_stats(
            &self.http,
            &self.config.base_url,
            player_id,
            &self.config.target_season,
            &GOALIE,
            self.config.minimum_season_threshold(),
            self.policy(),
        )
        .await
    }

    /// Fetch all four position pages for a player.
    pub async fn get_player_analytics(&self, player_id: &str) -> Result<PlayerAnalytics> {
        scraper::player::get_player_analytics(
            &self.http,
            &self.config.base_url,
            player_id,
            &self.config.target_season,
            self.config.minimum_season_threshold(),
            self.policy(),
        )
        .await
    }

    /// Fetch the standings of one season.
    pub async fn get_team_stats(&self, season: u32) -> Result<Standings> {
        scraper::standings::get_standings(&self.http, &self.config.base_url, season, self.policy())
            .await
    }
}
