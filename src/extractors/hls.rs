use crate::config::Config;
use crate::core::{Extractor, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

/// Scrapes the JavaScript player config of a landing page for its `.m3u8`.
pub struct HlsExtractor {
    client: reqwest::Client,
}

impl HlsExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_client(config.http_client()?))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

// Ordered by confidence: the player's `file:` entry pointing at a master
// playlist, any `file:` playlist, then any absolute playlist URL in quotes.
// Each pattern has a double-quoted and a single-quoted alternative so the URL
// body may contain the other quote character.
fn manifest_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r#"["']?file["']?\s*:\s*(?:"([^"]+master\.m3u8[^"]*)"|'([^']+master\.m3u8[^']*)')"#,
            r#"["']?file["']?\s*:\s*(?:"([^"]+\.m3u8[^"]*)"|'([^']+\.m3u8[^']*)')"#,
            r#"(?:"(https?:\\?/\\?/[^"\s<>]+?\.m3u8[^"\s<>]*)"|'(https?:\\?/\\?/[^'\s<>]+?\.m3u8[^'\s<>]*)')"#,
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Returns the first HLS manifest URL referenced in `text`, with `\/` unescaped.
pub fn find_hls_manifest(text: &str) -> Option<String> {
    manifest_patterns().iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().replace("\\/", "/"))
    })
}

#[async_trait]
impl Extractor for HlsExtractor {
    fn name(&self) -> &'static str {
        "HLS"
    }

    fn suitable(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
    }

    async fn extract(&self, url: &Url) -> Result<Option<String>> {
        let response = self
            .client
            .get(url.as_str())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await?;

        // Error pages are still searched; some hosts serve the player with a 403.
        let status = response.status();
        if !status.is_success() {
            debug!("Landing page {} answered HTTP {}", url, status);
        }

        let html = response.text().await?;
        debug!("Landing page {} is {} bytes", url, html.len());
        Ok(find_hls_manifest(&html))
    }
}
