use std::time::Duration;
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use log::{info, warn};
use crate::error::{FetchError, ScrapeError};
use crate::extractor::FieldExtractor;
use crate::product::Product;

const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Fetches a listing page with one GET and extracts every card on it.
pub struct StaticPageFetcher<'a> {
    client: Client,
    extractor: &'a FieldExtractor,
}

impl<'a> StaticPageFetcher<'a> {
    pub fn new(extractor: &'a FieldExtractor, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(StaticPageFetcher { client, extractor })
    }

    fn random_user_agent(&self) -> &'static str {
        let mut rng = rand::thread_rng();
        USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())]
    }

    pub fn fetch(&self, url: &str) -> Result<Vec<Product>, ScrapeError> {
        info!("Fetching {}", url);
        let html = self.fetch_html(url)?;
        let products = self.extractor.extract_all(&html)?;
        info!("Found {} products on {}", products.len(), url);
        Ok(products)
    }

    fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, self.random_user_agent())
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Request to {} failed with status: {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(resp.text()?)
    }
}
