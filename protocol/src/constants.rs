//! Invocation constants and defaults

/// Default name (or path) of the speedtest binary
pub const DEFAULT_BINARY: &str = "speedtest";

/// Default listen address for the metrics endpoint
pub const DEFAULT_LISTEN_ADDR: &str = ":9300";

/// Default time between two measurements
pub const DEFAULT_INTERVAL: &str = "30m";

/// Default HTTP path of the metrics endpoint
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// Non-interactive arguments: accept the license, emit a single JSON document
pub const SPEEDTEST_ARGS: [&str; 4] = [
    "--accept-license",
    "--precision=0",
    "--format=json",
    "--progress=no",
];

/// Canned output of one successful run, served in mock mode
pub const MOCK_RESPONSE: &[u8] = br#"{"type":"result","timestamp":"2020-10-24T01:32:34Z","ping":{"jitter":0.083000000000000004,"latency":3.222},"download":{"bandwidth":53038114,"bytes":435642344,"elapsed":8312},"upload":{"bandwidth":89205892,"bytes":429968780,"elapsed":4808},"packetLoss":0,"isp":"JPNE","interface":{"internalIp":"192.168.100.11","name":"eth0","macAddr":"00:15:5D:0B:0C:15","isVpn":false,"externalIp":"106.72.179.96"},"server":{"id":14623,"name":"IPA CyberLab","location":"Bunkyo","country":"Japan","host":"speed.coe.ad.jp","port":8080,"ip":"103.95.184.74"},"result":{"id":"ee0d6f53-dbed-44d1-a231-cad85743cde3","url":"https://www.speedtest.net/result/c/ee0d6f53-dbed-44d1-a231-cad85743cde3"}}"#;
