use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Placeholder callsign used until the operator configures a real one.
pub const DEFAULT_CALLSIGN: &str = "N0CALL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// NDBC latest-observations table URL
    #[serde(default = "default_feed_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AprsConfig {
    #[serde(default = "default_aprs_host")]
    pub host: String,

    #[serde(default = "default_aprs_port")]
    pub port: u16,

    #[serde(default = "default_callsign")]
    pub callsign: String,

    /// APRS-IS passcode for the callsign ("-1" is receive-only)
    #[serde(default = "default_passcode")]
    pub passcode: String,

    /// Spacing between consecutive packets, in milliseconds
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Per-packet connect-and-send deadline, in seconds
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub aprs: AprsConfig,
}

fn default_feed_url() -> String {
    "https://www.ndbc.noaa.gov/data/latest_obs/latest_obs.txt".to_string()
}

fn default_aprs_host() -> String {
    "wg3k-ca.firenet.us".to_string()
}

fn default_aprs_port() -> u16 {
    10155
}

fn default_callsign() -> String {
    DEFAULT_CALLSIGN.to_string()
}

fn default_passcode() -> String {
    "-1".to_string()
}

fn default_rate_limit_ms() -> u64 {
    1000
}

fn default_send_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
        }
    }
}

impl Default for AprsConfig {
    fn default() -> Self {
        Self {
            host: default_aprs_host(),
            port: default_aprs_port(),
            callsign: default_callsign(),
            passcode: default_passcode(),
            rate_limit_ms: default_rate_limit_ms(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            feed: FeedConfig::default(),
            aprs: AprsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist. Credentials may always be supplied (or
    /// overridden) through `BUOY_RELAY_CALLSIGN` / `BUOY_RELAY_PASSCODE`
    /// so they never have to live in the file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let mut config = if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {path}"))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {path}"))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(callsign) = std::env::var("BUOY_RELAY_CALLSIGN") {
            if !callsign.is_empty() {
                self.aprs.callsign = callsign;
            }
        }
        if let Ok(passcode) = std::env::var("BUOY_RELAY_PASSCODE") {
            if !passcode.is_empty() {
                self.aprs.passcode = passcode;
            }
        }
    }
}
