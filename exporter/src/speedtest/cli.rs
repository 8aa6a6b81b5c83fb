//! Ookla speedtest CLI runner

use super::{Invoke, InvokeError};
use protocol::SPEEDTEST_ARGS;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub struct SpeedtestCli {
    binary: String,
}

impl SpeedtestCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Invoke for SpeedtestCli {
    /// Run the binary to completion and return its stdout.
    ///
    /// The CLI prints its `{"error": ...}` document and exits non-zero when a
    /// run fails, so a non-zero status only counts as failure without output.
    async fn invoke(&self) -> Result<Vec<u8>, InvokeError> {
        debug!("Running {} {}", self.binary, SPEEDTEST_ARGS.join(" "));

        let output = Command::new(&self.binary)
            .args(SPEEDTEST_ARGS)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| InvokeError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        info!("{}", String::from_utf8_lossy(&output.stdout));

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !stderr.is_empty() {
            debug!("{} stderr: {}", self.binary, stderr);
        }

        if !output.status.success() {
            if output.stdout.iter().all(u8::is_ascii_whitespace) {
                return Err(InvokeError::Failed {
                    binary: self.binary.clone(),
                    status: output.status,
                    stderr,
                });
            }
            warn!("{} exited with {}", self.binary, output.status);
        }

        Ok(output.stdout)
    }
}
