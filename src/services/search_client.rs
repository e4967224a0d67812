use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::{configuration::SearchSettings, domain::search_query::SearchQuery, error::ScoutError};

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
}

pub struct SearchClient {
    client: Client,
    endpoint: Url,
}

impl SearchClient {
    pub fn new(settings: &SearchSettings) -> Result<Self, ScoutError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(SearchClient {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    /// Fetches the raw result page for `query`. Non-2xx responses are errors.
    pub async fn fetch(&self, query: &SearchQuery) -> Result<String, ScoutError> {
        log::info!("Searching {} for: {}", self.endpoint, query);

        let res = self
            .client
            .get(self.endpoint.clone())
            .query(&SearchParams { q: query.as_str() })
            .send()
            .await?;

        log::info!("Search responded with status {}", res.status());
        if !res.status().is_success() {
            return Err(ScoutError::HttpStatus(res.status()));
        }

        let page_source = res.text().await?;
        log::info!("Fetched {} bytes of results markup", page_source.len());

        Ok(page_source)
    }
}
