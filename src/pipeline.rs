use std::fs;
use std::path::{Path, PathBuf};
use log::{info, error};
use crate::browser::SessionLauncher;
use crate::config::ScrapeConfig;
use crate::csv_writer;
use crate::error::{ScrapeError, WriteError};
use crate::extractor::FieldExtractor;
use crate::load_more::IncrementalPageFetcher;
use crate::product::Product;
use crate::static_page::StaticPageFetcher;
use crate::targets::{self, PageStrategy, Target};

#[derive(Debug)]
pub struct TargetReport {
    pub target: Target,
    pub output: PathBuf,
    /// Number of products written, or why the target was abandoned.
    pub result: Result<usize, ScrapeError>,
}

impl TargetReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Picks the fetcher matching each target's strategy.
pub struct PageScraper<'a, L: SessionLauncher> {
    static_page: StaticPageFetcher<'a>,
    load_more: IncrementalPageFetcher<'a, L>,
}

impl<'a, L: SessionLauncher> PageScraper<'a, L> {
    pub fn new(
        extractor: &'a FieldExtractor,
        launcher: L,
        config: &ScrapeConfig,
    ) -> Result<Self, ScrapeError> {
        Ok(PageScraper {
            static_page: StaticPageFetcher::new(extractor, config.http_timeout())?,
            load_more: IncrementalPageFetcher::new(launcher, extractor, config),
        })
    }

    pub fn scrape(&self, target: &Target) -> Result<Vec<Product>, ScrapeError> {
        match target.strategy {
            PageStrategy::Static => self.static_page.fetch(target.url.as_str()),
            PageStrategy::LoadMore => self.load_more.fetch(target.url.as_str()),
        }
    }

    /// Scrapes one target and writes its CSV. Returns the number of rows written.
    pub fn run_target(&self, target: &Target, output: &Path) -> Result<usize, ScrapeError> {
        let products = self.scrape(target)?;
        csv_writer::write_products(&products, output)?;
        Ok(products.len())
    }
}

/// Scrapes every target in order. A failing target is logged and skipped;
/// only setup problems abort the whole run.
pub fn run_all<L: SessionLauncher>(
    config: &ScrapeConfig,
    launcher: L,
) -> Result<Vec<TargetReport>, ScrapeError> {
    let extractor = FieldExtractor::with_selectors(&config.selectors)?;
    let targets = targets::all_targets(&config.base_url)?;
    fs::create_dir_all(&config.output_dir).map_err(WriteError::Io)?;

    let scraper = PageScraper::new(&extractor, launcher, config)?;
    let total = targets.len();
    let mut reports = Vec::with_capacity(total);

    for (i, target) in targets.into_iter().enumerate() {
        let output = config.output_dir.join(target.file_name);
        info!(
            "Processing {} / {} : {} ({:?})",
            i + 1,
            total,
            target.url,
            target.strategy
        );

        let result = scraper.run_target(&target, &output);
        match &result {
            Ok(count) => info!("Saved {} products to {:?}", count, output),
            Err(e) => error!("Failed to scrape {}: {}", target.url, e),
        }
        reports.push(TargetReport { target, output, result });
    }

    Ok(reports)
}
