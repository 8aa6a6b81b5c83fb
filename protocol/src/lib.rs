//! Speedtest Protocol Library
//!
//! Output contract of the Ookla `speedtest` CLI when run with `--format=json`.
//! This includes the result and error shapes, the fixed invocation arguments
//! and the decoding logic shared by the exporter.

pub mod constants;
pub mod error;
pub mod parse;
pub mod result;

pub use constants::*;
pub use error::ProtocolError;
pub use parse::{parse, Outcome};
pub use result::{MeasurementError, MeasurementResult};
