//! Decoding of raw speedtest output

use crate::error::ProtocolError;
use crate::result::{MeasurementError, MeasurementResult};
use serde::Deserialize;
use serde_json::Value;

/// A recognized speedtest document
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The run completed and produced measurements
    Success(MeasurementResult),

    /// The tool reported an explicit error
    Failure(MeasurementError),
}

impl Outcome {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Failure(_) => "failure",
        }
    }
}

/// Decode raw output, trying the result shape first and the error shape second.
///
/// A document carrying a top-level `error` key never counts as a result: every
/// result field defaults, so it would otherwise decode as an all-zero run.
pub fn parse(bytes: &[u8]) -> Result<Outcome, ProtocolError> {
    let value: Value = serde_json::from_slice(bytes).map_err(ProtocolError::NotJson)?;

    let success = if value.get("error").is_some() {
        "document carries an `error` key".to_string()
    } else {
        match MeasurementResult::deserialize(&value) {
            Ok(result) => return Ok(Outcome::Success(result)),
            Err(e) => e.to_string(),
        }
    };

    match MeasurementError::deserialize(&value) {
        Ok(error) => Ok(Outcome::Failure(error)),
        Err(e) => Err(ProtocolError::Undecodable {
            success,
            failure: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MOCK_RESPONSE;

    const RESULT_WITHOUT_TYPE: &str = r#"
    {
        "timestamp": "2020-10-24T01:32:34Z",
        "ping": { "jitter": 0.083000000000000004, "latency": 3.222 },
        "download": { "bandwidth": 53038114, "bytes": 435642344, "elapsed": 8312 },
        "upload": { "bandwidth": 89205892, "bytes": 429968780, "elapsed": 4808 },
        "packetLoss": 0,
        "isp": "JPNE",
        "interface": {
            "internalIp": "10.0.0.1",
            "name": "eth0",
            "macAddr": "FF:FF:FF:FF:FF:FF",
            "isVpn": false,
            "externalIp": "1.1.1.1"
        },
        "server": {
            "id": 14623,
            "name": "IPA CyberLab",
            "location": "Bunkyo",
            "country": "Japan",
            "host": "speed.coe.ad.jp",
            "port": 8080,
            "ip": "103.95.184.74"
        },
        "result": {
            "id": "b3d6bd12-1ef1-455d-9fc0-157f49d69e14",
            "url": "https://www.speedtest.net/result/c/b3d6bd12-1ef1-455d-9fc0-157f49d69e14"
        }
    }"#;

    fn expect_success(bytes: &[u8]) -> MeasurementResult {
        match parse(bytes).unwrap() {
            Outcome::Success(result) => result,
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_mock_response() {
        let result = expect_success(MOCK_RESPONSE);

        assert_eq!(result.timestamp, "2020-10-24T01:32:34Z");
        assert_eq!(result.ping.jitter, 0.083);
        assert_eq!(result.ping.latency, 3.222);
        assert_eq!(result.download.bandwidth, 53038114.0);
        assert_eq!(result.download.bytes, 435642344.0);
        assert_eq!(result.download.elapsed, 8312.0);
        assert_eq!(result.upload.bandwidth, 89205892.0);
        assert_eq!(result.upload.bytes, 429968780.0);
        assert_eq!(result.upload.elapsed, 4808.0);
        assert_eq!(result.packet_loss, 0.0);
        assert_eq!(result.isp, "JPNE");
        assert_eq!(result.interface.internal_ip, "192.168.100.11");
        assert_eq!(result.interface.mac_addr, "00:15:5D:0B:0C:15");
        assert!(!result.interface.is_vpn);
        assert_eq!(result.interface.external_ip, "106.72.179.96");
        assert_eq!(result.server.id, 14623);
        assert_eq!(result.server.name, "IPA CyberLab");
        assert_eq!(result.server.port, 8080);
        assert_eq!(result.result.id, "ee0d6f53-dbed-44d1-a231-cad85743cde3");
        assert!(result.timestamp().is_some());
    }

    #[test]
    fn test_type_field_is_ignored() {
        let without = expect_success(RESULT_WITHOUT_TYPE.as_bytes());
        let with_type = RESULT_WITHOUT_TYPE.replacen('{', r#"{ "type": "result","#, 1);
        let with = expect_success(with_type.as_bytes());

        assert_eq!(with, without);
        assert_eq!(with.server.host, "speed.coe.ad.jp");
        assert_eq!(with.interface.name, "eth0");
    }

    #[test]
    fn test_error_document_falls_back() {
        let outcome = parse(br#"{"error": "Cannot read: Resource temporarily unavailable"}"#).unwrap();
        assert_eq!(
            outcome,
            Outcome::Failure(MeasurementError {
                error: "Cannot read: Resource temporarily unavailable".to_string(),
            })
        );
        assert_eq!(outcome.variant_name(), "failure");
    }

    #[test]
    fn test_log_type_error_document_falls_back() {
        let outcome = parse(
            br#"{"type":"log","timestamp":"2020-10-24T01:32:34Z","message":"x","level":"error","error":"No servers defined"}"#,
        )
        .unwrap();
        assert!(matches!(outcome, Outcome::Failure(e) if e.error == "No servers defined"));
    }

    #[test]
    fn test_not_json_is_undecodable() {
        assert!(matches!(parse(b"not json"), Err(ProtocolError::NotJson(_))));
        assert!(parse(b"").is_err());
    }

    #[test]
    fn test_wrong_types_are_undecodable() {
        let err = parse(br#"{"ping": "fast"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Undecodable { .. }));

        let err = parse(br#"{"error": 42}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Undecodable { .. }));

        assert!(parse(br#""not json""#).is_err());
    }
}
