use crate::core::{ExplorerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV: &str = "MOVIE_EXPLORER_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browse_url: String,
    pub watch_url: String,
    pub image_base: String,
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    pub lang: u32,
    pub order_by: String,
    pub page_size: u32,
    /// Hosts whose landing pages embed an HLS player config.
    pub playable_hosts: Vec<String>,
    /// `{URL}` is replaced by the manifest, otherwise the URL is appended.
    pub player_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browse_url: "https://movie2k.ch/data/browse/".to_string(),
            watch_url: "https://movie2k.ch/data/watch/".to_string(),
            image_base: "https://image.tmdb.org/t/p/w500".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
                .to_string(),
            timeout: 10,
            lang: 2,
            order_by: "trending".to_string(),
            page_size: 20,
            playable_hosts: vec!["savefiles.com".to_string(), "streamhls.to".to_string()],
            player_command: "mpv --no-ytdl {URL}".to_string(),
        }
    }
}

impl Config {
    /// Loads the explicit path, then `MOVIE_EXPLORER_CONFIG`, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ExplorerError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ExplorerError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Shared HTTP client for the catalog API and landing pages.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout())
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(client)
    }
}
