use url::Url;
use crate::error::FetchError;

/// How the products of a page become visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStrategy {
    /// Everything is in the initial HTML.
    Static,
    /// More products appear after clicking the show-more control.
    LoadMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: Url,
    pub file_name: &'static str,
    pub strategy: PageStrategy,
}

const PAGES: [(&str, &str, PageStrategy); 6] = [
    ("test-sites/e-commerce/more/", "home.csv", PageStrategy::Static),
    ("test-sites/e-commerce/more/computers/", "computers.csv", PageStrategy::Static),
    ("test-sites/e-commerce/more/computers/laptops/", "laptops.csv", PageStrategy::LoadMore),
    ("test-sites/e-commerce/more/computers/tablets/", "tablets.csv", PageStrategy::LoadMore),
    ("test-sites/e-commerce/more/phones/", "phones.csv", PageStrategy::Static),
    ("test-sites/e-commerce/more/phones/touch/", "touch.csv", PageStrategy::LoadMore),
];

/// The six listing pages of the demo shop, resolved against `base_url`.
pub fn all_targets(base_url: &str) -> Result<Vec<Target>, FetchError> {
    let base = Url::parse(base_url)?;
    PAGES
        .iter()
        .map(|&(path, file_name, strategy)| -> Result<Target, FetchError> {
            Ok(Target {
                url: base.join(path)?,
                file_name,
                strategy,
            })
        })
        .collect()
}
