//! Speedtest Exporter - Prometheus metrics from periodic speedtest CLI runs

mod config;
mod metrics;
mod poller;
mod server;
mod speedtest;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "speedtest_exporter")]
#[command(version)]
#[command(about = "Export speedtest CLI results as Prometheus metrics", long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the `speedtest` command
    #[arg(long, alias = "speedTestBinary")]
    speedtest_binary: Option<String>,

    /// Listen address, e.g. ":9300" or "127.0.0.1:9300"
    #[arg(long)]
    addr: Option<String>,

    /// Perform speedtest every interval, e.g. 30m, 45s, 1h30m
    #[arg(long)]
    interval: Option<String>,

    /// Use mock response instead of running speedtest
    #[arg(long, alias = "useMockResponse")]
    use_mock_response: bool,

    /// HTTP path of the metrics endpoint
    #[arg(long)]
    metrics_path: Option<String>,
}

impl Args {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            binary: self.speedtest_binary.clone(),
            addr: self.addr.clone(),
            interval: self.interval.clone(),
            metrics_path: self.metrics_path.clone(),
            use_mock_response: self.use_mock_response,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting speedtest_exporter v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.overrides())?;
    let interval = config.interval()?;

    if config.speedtest.use_mock_response {
        info!("Using mock response");
    }

    let gauges = metrics::GaugeSet::new().context("Failed to register gauges")?;

    // Bind before the first measurement so a bad address fails fast
    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!(
        "Listening on {}, interval {}",
        bind_addr,
        humantime::format_duration(interval)
    );

    // Poll loop owns the only writer handle
    let invoker = speedtest::Invoker::from_config(&config);
    let poller = poller::Poller::new(invoker, gauges.clone(), interval);
    let mut poll_task = tokio::spawn(poller.run());

    let router = server::build_router(gauges, &config.http.metrics_path);

    tokio::select! {
        res = &mut poll_task => {
            let err = res.context("Poll task panicked")?;
            error!("Poll loop halted: {:#}", err);
            Err(err)
        }
        res = axum::serve(listener, router).into_future() => {
            res.context("Metrics server failed")
        }
    }
}
