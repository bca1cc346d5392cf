//! Scraping of listing pages that reveal more products through a
//! "show more" button.
//!
//! Every render pass re-extracts the whole page, so the latest pass is a
//! superset of all earlier ones. Only that latest snapshot is kept.

use std::time::Duration;
use log::{debug, info, warn};
use crate::browser::{BrowserSession, SessionLauncher};
use crate::config::ScrapeConfig;
use crate::delay_manager;
use crate::error::{FetchError, ScrapeError, SessionError};
use crate::extractor::FieldExtractor;
use crate::product::Product;

/// Outcome of one attempt to reveal more products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Expanded,
    /// The control is gone or never became clickable.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationReport {
    pub products: Vec<Product>,
    pub expansions: usize,
}

pub struct IncrementalPageFetcher<'a, L: SessionLauncher> {
    launcher: L,
    extractor: &'a FieldExtractor,
    show_more: String,
    control_timeout: Duration,
    settle_delay: Duration,
    poll_interval: Duration,
}

impl<'a, L: SessionLauncher> IncrementalPageFetcher<'a, L> {
    pub fn new(launcher: L, extractor: &'a FieldExtractor, config: &ScrapeConfig) -> Self {
        IncrementalPageFetcher {
            launcher,
            extractor,
            show_more: config.selectors.show_more.clone(),
            control_timeout: config.control_timeout(),
            settle_delay: config.settle_delay(),
            poll_interval: config.poll_interval(),
        }
    }

    pub fn fetch(&self, url: &str) -> Result<Vec<Product>, ScrapeError> {
        self.fetch_with_report(url).map(|report| report.products)
    }

    /// Expands the page until the show-more control is exhausted.
    /// The session is dropped on every return path.
    pub fn fetch_with_report(&self, url: &str) -> Result<PaginationReport, ScrapeError> {
        let mut session = self.launcher.launch().map_err(FetchError::Session)?;

        info!("Loading {}", url);
        session.navigate(url).map_err(FetchError::Session)?;

        let mut products = self.render_pass(&mut session, 0)?;
        let mut expansions = 0;

        loop {
            match self.expand(&mut session)? {
                Expansion::Expanded => {
                    expansions += 1;
                    let next = self.render_pass(&mut session, products.len())?;
                    if next.len() <= products.len() {
                        debug!("Expansion {} revealed no new products yet", expansions);
                    }
                    products = next;
                }
                Expansion::Exhausted => break,
            }
        }

        info!(
            "Pagination exhausted after {} expansions: {} products",
            expansions,
            products.len()
        );
        Ok(PaginationReport { products, expansions })
    }

    /// Waits (bounded by the settle delay) for more than `known` cards, then
    /// extracts everything currently on the page.
    fn render_pass<S: BrowserSession>(
        &self,
        session: &mut S,
        known: usize,
    ) -> Result<Vec<Product>, ScrapeError> {
        let mut markup = String::new();
        let grew = delay_manager::wait_until(self.settle_delay, self.poll_interval, || {
            markup = session.page_source()?;
            Ok::<_, SessionError>(self.extractor.count_cards(&markup) > known)
        })
        .map_err(FetchError::Session)?;

        if !grew {
            debug!("No new cards within {:?}, extracting current page", self.settle_delay);
        }

        let products = self.extractor.extract_all(&markup)?;
        debug!("Render pass found {} products", products.len());
        Ok(products)
    }

    fn expand<S: BrowserSession>(&self, session: &mut S) -> Result<Expansion, ScrapeError> {
        let clickable = session
            .wait_for_clickable(&self.show_more, self.control_timeout, self.poll_interval)
            .map_err(FetchError::Session)?;
        if !clickable {
            debug!("Control '{}' not clickable within {:?}", self.show_more, self.control_timeout);
            return Ok(Expansion::Exhausted);
        }

        if !session.click(&self.show_more).map_err(FetchError::Session)? {
            warn!("Control '{}' disappeared before it could be clicked", self.show_more);
            return Ok(Expansion::Exhausted);
        }
        Ok(Expansion::Expanded)
    }
}
