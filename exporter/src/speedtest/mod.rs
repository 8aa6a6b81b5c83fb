//! Speedtest invocation

mod cli;
mod mock;

pub use cli::SpeedtestCli;
pub use mock::MockSpeedtest;

use crate::config::Config;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Failed to start {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {status} without output: {stderr}")]
    Failed {
        binary: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Produces the raw output of one speedtest run
pub trait Invoke: Send + Sync {
    fn invoke(&self) -> impl Future<Output = Result<Vec<u8>, InvokeError>> + Send;
}

/// Invoker selected by configuration
pub enum Invoker {
    Cli(SpeedtestCli),
    Mock(MockSpeedtest),
}

impl Invoker {
    pub fn from_config(config: &Config) -> Self {
        if config.speedtest.use_mock_response {
            Invoker::Mock(MockSpeedtest)
        } else {
            Invoker::Cli(SpeedtestCli::new(config.speedtest.binary.clone()))
        }
    }
}

impl Invoke for Invoker {
    async fn invoke(&self) -> Result<Vec<u8>, InvokeError> {
        match self {
            Invoker::Cli(cli) => cli.invoke().await,
            Invoker::Mock(mock) => mock.invoke().await,
        }
    }
}
