use crate::config::Config;
use crate::core::models::BrowseResponse;
use crate::core::{CatalogEntry, ExplorerError, MovieDetail, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Client for the browse and watch endpoints of the content API.
///
/// The API is an undocumented third party; only the fields mapped in
/// [`crate::core::models`] are read and no retry is attempted.
pub struct CatalogClient {
    client: reqwest::Client,
    config: Config,
}

impl CatalogClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: Config) -> Self {
        Self { client, config }
    }

    /// Fetches one page of the catalog. Page numbers start at 1.
    pub async fn fetch_catalog(&self, page: u32, page_size: u32) -> Result<Vec<CatalogEntry>> {
        let page = page.max(1);
        info!("Fetching catalog page {} ({} per page)", page, page_size);

        let query = [
            ("lang", self.config.lang.to_string()),
            ("order_by", self.config.order_by.clone()),
            ("page", page.to_string()),
            ("limit", page_size.to_string()),
        ];
        let res: BrowseResponse = self.get_json(&self.config.browse_url, &query).await?;

        debug!("Catalog page {} has {} entries", page, res.movies.len());
        Ok(res.movies)
    }

    /// Fetches the detail record and stream list of a single title.
    pub async fn fetch_detail(&self, id: &str) -> Result<MovieDetail> {
        info!("Fetching details for {}", id);
        let detail: MovieDetail = self
            .get_json(&self.config.watch_url, &[("_id", id.to_string())])
            .await?;
        debug!("{} lists {} streams", id, detail.streams.len());
        Ok(detail)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(ExplorerError::HttpStatus {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ExplorerError::Json {
            url: final_url,
            source,
        })
    }
}
