//! Error types for the wallet sweeper

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("provider rejected the request: {0}")]
    ProviderRejected(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
