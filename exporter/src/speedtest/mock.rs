//! Canned speedtest output for local development

use super::{Invoke, InvokeError};
use protocol::MOCK_RESPONSE;
use tracing::info;

pub struct MockSpeedtest;

impl Invoke for MockSpeedtest {
    async fn invoke(&self) -> Result<Vec<u8>, InvokeError> {
        info!("{}", String::from_utf8_lossy(MOCK_RESPONSE));
        Ok(MOCK_RESPONSE.to_vec())
    }
}
