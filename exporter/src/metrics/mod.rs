//! Prometheus gauges for speedtest results
//!
//! All metrics use the `speedtest_` prefix. The poll loop is the only writer;
//! scrapes read the current values at any time.

use prometheus::{Encoder, Gauge, Opts, Registry, TextEncoder};
use protocol::MeasurementResult;
use std::sync::Arc;

/// Last published value of each speedtest gauge
#[derive(Clone)]
pub struct GaugeSet {
    registry: Arc<Registry>,
    ping_jitter: Gauge,
    ping_latency: Gauge,
    download_bandwidth: Gauge,
    download_bytes: Gauge,
    download_elapsed: Gauge,
    upload_bandwidth: Gauge,
    upload_bytes: Gauge,
    upload_elapsed: Gauge,
}

fn register(registry: &Registry, name: &str, help: &str) -> prometheus::Result<Gauge> {
    let gauge = Gauge::with_opts(Opts::new(name, help))?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl GaugeSet {
    /// Create all gauges at zero in a fresh registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        Ok(Self {
            ping_jitter: register(&registry, "speedtest_ping_jitter", "SpeedTest ping jitter")?,
            ping_latency: register(&registry, "speedtest_ping_latency", "SpeedTest ping latency")?,
            download_bandwidth: register(
                &registry,
                "speedtest_download_bandwidth",
                "SpeedTest download bandwidth",
            )?,
            download_bytes: register(
                &registry,
                "speedtest_download_bytes",
                "SpeedTest download bytes",
            )?,
            download_elapsed: register(
                &registry,
                "speedtest_download_elapsed",
                "SpeedTest download elapsed",
            )?,
            upload_bandwidth: register(
                &registry,
                "speedtest_upload_bandwidth",
                "SpeedTest upload bandwidth",
            )?,
            upload_bytes: register(&registry, "speedtest_upload_bytes", "SpeedTest upload bytes")?,
            upload_elapsed: register(
                &registry,
                "speedtest_upload_elapsed",
                "SpeedTest upload elapsed",
            )?,
            registry: Arc::new(registry),
        })
    }

    /// Overwrite every gauge with the values of `result`
    pub fn publish(&self, result: &MeasurementResult) {
        self.ping_jitter.set(result.ping.jitter);
        self.ping_latency.set(result.ping.latency);

        self.download_bandwidth.set(result.download.bandwidth);
        self.download_bytes.set(result.download.bytes);
        self.download_elapsed.set(result.download.elapsed);

        self.upload_bandwidth.set(result.upload.bandwidth);
        self.upload_bytes.set(result.upload.bytes);
        self.upload_elapsed.set(result.upload.elapsed);
    }

    /// Current values in publish order
    #[cfg(test)]
    pub fn values(&self) -> [f64; 8] {
        [
            self.ping_jitter.get(),
            self.ping_latency.get(),
            self.download_bandwidth.get(),
            self.download_bytes.get(),
            self.download_elapsed.get(),
            self.upload_bandwidth.get(),
            self.upload_bytes.get(),
            self.upload_elapsed.get(),
        ]
    }

    /// Render all gauges in Prometheus text format
    pub fn render(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
