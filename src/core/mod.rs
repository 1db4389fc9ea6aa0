pub mod catalog;
pub mod error;
pub mod extractor;
pub mod models;
pub mod paging;
pub mod streams;
pub mod task;

pub use catalog::CatalogClient;
pub use error::{ExplorerError, Result};
pub use extractor::{Extractor, ExtractorEngine};
pub use models::{poster_url, CatalogEntry, MovieDetail, StreamLink};
pub use paging::Pager;
pub use streams::{rank_streams, RankedStream};
pub use task::{spawn_extraction, ExtractionHandle, ExtractionOutcome};
