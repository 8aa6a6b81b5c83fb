//! Periodic speedtest polling

use crate::metrics::GaugeSet;
use crate::speedtest::Invoke;
use anyhow::{Context, Result};
use protocol::Outcome;
use std::time::Duration;
use tracing::{error, info};

/// What a completed cycle did with the tool's output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Published,
    ErrorLogged,
}

pub struct Poller<I> {
    invoker: I,
    gauges: GaugeSet,
    interval: Duration,
}

impl<I: Invoke> Poller<I> {
    pub fn new(invoker: I, gauges: GaugeSet, interval: Duration) -> Self {
        Self {
            invoker,
            gauges,
            interval,
        }
    }

    /// Invoke, parse and publish once.
    ///
    /// Errors are fatal: the tool could not run or printed something that is
    /// neither a result nor an error document.
    pub async fn cycle(&self) -> Result<CycleOutcome> {
        let out = self
            .invoker
            .invoke()
            .await
            .context("Failed to run speedtest")?;

        match protocol::parse(&out).context("Unrecognized speedtest output")? {
            Outcome::Success(result) => {
                self.gauges.publish(&result);
                info!(
                    "Published: isp={} server={} ({}) latency={:.3}ms download={}B/s upload={}B/s {}",
                    result.isp,
                    result.server.name,
                    result.server.location,
                    result.ping.latency,
                    result.download.bandwidth,
                    result.upload.bandwidth,
                    result.result.url
                );
                Ok(CycleOutcome::Published)
            }
            Outcome::Failure(failure) => {
                error!("ERROR: {}", failure.error);
                Ok(CycleOutcome::ErrorLogged)
            }
        }
    }

    /// Cycle forever, sleeping `interval` after each cycle.
    ///
    /// Only returns when a cycle fails fatally.
    pub async fn run(self) -> anyhow::Error {
        loop {
            if let Err(e) = self.cycle().await {
                return e;
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
