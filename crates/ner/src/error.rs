//! NER error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NerError {
    #[error("invalid ner configuration: {0}")]
    Config(String),

    #[error("ner backend unreachable: {0}")]
    Transport(String),

    #[error("ner backend failed: {0}")]
    Backend(String),

    #[error("malformed ner response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
