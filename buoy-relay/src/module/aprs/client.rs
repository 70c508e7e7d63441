//! APRS-IS client
//!
//! Opens one TCP connection per packet, sends the login line and the
//! object report, and closes. Nothing is read back; APRS-IS does not
//! acknowledge individual packets.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use super::packet;
use crate::config::AprsConfig;
use crate::module::ndbc::StationObservation;

pub struct AprsClient {
    host: String,
    port: u16,
    callsign: String,
    passcode: String,
    rate_limit: Duration,
    send_timeout: Duration,
}

impl AprsClient {
    pub fn new(config: &AprsConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            callsign: config.callsign.clone(),
            passcode: config.passcode.clone(),
            rate_limit: Duration::from_millis(config.rate_limit_ms),
            send_timeout: Duration::from_secs(config.send_timeout_secs),
        }
    }

    /// Relay every observation in order, one connection per packet.
    ///
    /// A failed or timed-out send is logged and skipped; the remaining
    /// stations still go out. The rate-limit pause runs after every
    /// attempt, including the last. Returns the number of packets sent.
    pub async fn send_all(&self, observations: &[StationObservation]) -> usize {
        let mut sent = 0;

        for observation in observations {
            let report = packet::object_report(&self.callsign, observation);

            match timeout(self.send_timeout, self.send_packet(&report)).await {
                Ok(Ok(())) => {
                    info!("{}: sent to APRS-IS: {}", observation.station_id, report);
                    sent += 1;
                }
                Ok(Err(e)) => {
                    warn!("{}: send failed: {:#}", observation.station_id, e);
                }
                Err(_) => {
                    warn!(
                        "{}: send timed out after {:?}",
                        observation.station_id, self.send_timeout
                    );
                }
            }

            sleep(self.rate_limit).await;
        }

        sent
    }

    async fn send_packet(&self, report: &str) -> Result<()> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .with_context(|| {
                format!("Failed to connect to APRS-IS at {}:{}", self.host, self.port)
            })?;

        let login = format!(
            "user {} pass {} vers buoy-relay {}\n",
            self.callsign,
            self.passcode,
            env!("CARGO_PKG_VERSION"),
        );
        stream
            .write_all(login.as_bytes())
            .await
            .context("Failed to send APRS-IS login")?;
        stream
            .write_all(format!("{report}\n").as_bytes())
            .await
            .context("Failed to send APRS packet")?;
        stream
            .shutdown()
            .await
            .context("Failed to close APRS-IS connection")?;

        Ok(())
    }
}
