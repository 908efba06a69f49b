pub use client::{Endpoint, Session, XbshlClient};
pub use config::{RowErrorPolicy, ScrapeConfig};
pub use error::{Result, XbshlError};
pub use league::{run, scrape, RunSummary};
pub use model::*;
pub use scraper::franchise::team_abbreviation;

pub mod client;
pub mod config;
pub mod error;
pub mod league;
pub mod model;
pub mod output;
pub(crate) mod scraper;

#[cfg(test)]
mod mock_site;
