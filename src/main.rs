use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use xbshl_scraper::league::reject_arguments;
use xbshl_scraper::ScrapeConfig;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let result = async {
        reject_arguments(std::env::args().skip(1))?;
        let config = ScrapeConfig::from_env()?;
        xbshl_scraper::run(&config).await
    }
    .await;

    match result {
        Ok(summary) => {
            println!("Scrape successful. Found {} players.", summary.players);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "scrape failed");
            ExitCode::FAILURE
        }
    }
}
