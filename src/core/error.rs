use thiserror::Error;

/// Errors produced by the catalog client, configuration loader and player handoff.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid JSON from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to read config '{path}': {source}")]
    ConfigIo {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Player command is empty")]
    EmptyPlayerCommand,

    #[error("Failed to launch player '{program}': {source}")]
    PlayerSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to open browser: {0}")]
    Browser(std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
