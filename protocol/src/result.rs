//! Result and error shapes emitted by the speedtest CLI

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successful speedtest run.
///
/// Every field defaults, so a partial document decodes with zero values
/// instead of failing. Unknown fields such as `type` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeasurementResult {
    /// ISO-8601 instant the run finished
    pub timestamp: String,
    pub ping: Ping,
    pub download: Transfer,
    pub upload: Transfer,
    pub packet_loss: f64,
    pub isp: String,
    pub interface: Interface,
    pub server: Server,
    pub result: ResultLink,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ping {
    /// Milliseconds
    pub jitter: f64,
    /// Milliseconds
    pub latency: f64,
}

/// Download or upload phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfer {
    /// Bytes per second
    pub bandwidth: f64,
    /// Total bytes transferred
    pub bytes: f64,
    /// Milliseconds
    pub elapsed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Interface {
    pub internal_ip: String,
    pub name: String,
    pub mac_addr: String,
    pub is_vpn: bool,
    pub external_ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: u64,
    pub name: String,
    pub location: String,
    pub country: String,
    pub host: String,
    pub port: u16,
    pub ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultLink {
    pub id: String,
    pub url: String,
}

impl MeasurementResult {
    /// Parsed `timestamp`, `None` if the tool emitted something unparsable
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Explicit failure reported by the tool, e.g. no network or license not accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementError {
    pub error: String,
}
