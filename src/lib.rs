pub mod browser;
pub mod config;
pub mod csv_writer;
pub mod delay_manager;
pub mod error;
pub mod extractor;
pub mod load_more;
pub mod logger;
pub mod pipeline;
pub mod product;
pub mod static_page;
pub mod targets;

#[cfg(test)]
mod test_support;

// Exporting types for convenience
pub use browser::{BrowserSession, ChromeLauncher, SessionLauncher};
pub use config::ScrapeConfig;
pub use error::{ExtractionError, FetchError, ScrapeError, SessionError, WriteError};
pub use extractor::FieldExtractor;
pub use load_more::IncrementalPageFetcher;
pub use product::Product;
pub use static_page::StaticPageFetcher;
