use crate::core::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

/// Finds a playable manifest URL behind a landing page.
#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn suitable(&self, url: &Url) -> bool;
    /// `Ok(None)` means the page was fetched but held no manifest.
    async fn extract(&self, url: &Url) -> Result<Option<String>>;
}

#[derive(Default)]
pub struct ExtractorEngine {
    pub extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorEngine {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    pub fn register_extractor(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    /// Best-effort extraction. Every failure is logged and reported as `None`.
    pub async fn extract_stream_url(&self, landing_url: &str) -> Option<String> {
        let parsed_url = match Url::parse(landing_url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Invalid landing page URL {}: {}", landing_url, e);
                return None;
            }
        };

        let Some(extractor) = self.extractors.iter().find(|e| e.suitable(&parsed_url)) else {
            warn!("No suitable extractor found for URL: {}", landing_url);
            return None;
        };

        debug!("Using {} extractor for {}", extractor.name(), parsed_url);
        match extractor.extract(&parsed_url).await {
            Ok(Some(manifest)) => {
                info!("Found HLS manifest: {}", manifest);
                Some(manifest)
            }
            Ok(None) => {
                info!("No HLS manifest on {}", parsed_url);
                None
            }
            Err(e) => {
                warn!("Extraction from {} failed: {}", parsed_url, e);
                None
            }
        }
    }
}
