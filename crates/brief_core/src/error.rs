use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Feed error: {0}")]
    Feed(#[from] rss::Error),

    #[error("Invalid guid {0:?}: expected ai_news_YYYYMMDD")]
    InvalidGuid(String),

    #[error("Audio file not found or unreadable: {}", .0.display())]
    MissingAudio(PathBuf),

    #[error("Audio file is empty: {}", .0.display())]
    EmptyAudio(PathBuf),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
