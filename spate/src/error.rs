use spate_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid target url: {0}")]
    InvalidTarget(#[from] url::ParseError),

    #[error("failed to construct the http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
