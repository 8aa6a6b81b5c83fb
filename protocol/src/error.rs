//! Protocol error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Output is not JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("Output matches neither result nor error shape (result: {success}; error: {failure})")]
    Undecodable { success: String, failure: String },
}
