pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod player;
pub mod utils;

pub use crate::config::Config;
pub use crate::core::{
    CatalogClient, CatalogEntry, ExplorerError, ExtractionOutcome, ExtractorEngine, MovieDetail,
    Pager, StreamLink,
};
pub use crate::extractors::{find_hls_manifest, HlsExtractor};
