pub mod hls;

pub use hls::{find_hls_manifest, HlsExtractor};

use crate::config::Config;
use crate::core::{ExtractorEngine, Result};

/// Engine with the built-in extractors registered.
pub fn default_engine(config: &Config) -> Result<ExtractorEngine> {
    let mut engine = ExtractorEngine::new();
    engine.register_extractor(Box::new(HlsExtractor::new(config)?));
    Ok(engine)
}
