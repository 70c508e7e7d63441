use buoy_relay::config::{self, Config};
use buoy_relay::logging;
use buoy_relay::module::aprs::AprsClient;
use buoy_relay::module::ndbc::{FeedFetcher, parser};

use anyhow::Result;
use chrono::Utc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load("config.toml")?;

    // Initialize logging
    let _logging_guard = logging::init_logging("logs", "buoy-relay", &config.log_level);

    tracing::info!("buoy-relay starting...");
    if config.aprs.callsign == config::DEFAULT_CALLSIGN {
        tracing::warn!(
            "No callsign configured; APRS-IS will reject the login. \
             Set [aprs].callsign or BUOY_RELAY_CALLSIGN."
        );
    }

    // Fetch and normalize the latest observations
    let fetcher = FeedFetcher::new(&config.feed.url);
    let lines = fetcher.fetch_lines().await?;
    let observations = parser::parse_feed(&lines, Utc::now());

    if observations.is_empty() {
        tracing::info!("No fresh buoy observations to relay");
        return Ok(());
    }

    // Relay each observation to APRS-IS
    let client = AprsClient::new(&config.aprs);
    let sent = client.send_all(&observations).await;
    tracing::info!("Relayed {}/{} observations to APRS-IS", sent, observations.len());

    Ok(())
}
