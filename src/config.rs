use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use log::{info, error};

const CONFIG_FILE: &str = "scraper.json";

/// CSS selectors used to locate product cards and their fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub card: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub rating: String,
    pub reviews: String,
    pub show_more: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            card: ".thumbnail".to_string(),
            title: ".title".to_string(),
            description: ".description".to_string(),
            price: ".price".to_string(),
            rating: "p[data-rating]".to_string(),
            reviews: ".ratings > p.float-end".to_string(),
            show_more: ".ecomerce-items-scroll-more".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub http_timeout_secs: u64,
    /// How long to wait for the show-more control to become clickable.
    pub control_timeout_secs: u64,
    /// Upper bound on the wait for new cards after a click.
    pub settle_delay_ms: u64,
    pub poll_interval_ms: u64,
    pub headless: bool,
    pub browser_idle_timeout_secs: u64,
    pub selectors: Selectors,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            base_url: "https://webscraper.io/".to_string(),
            output_dir: PathBuf::from("."),
            http_timeout_secs: 30,
            control_timeout_secs: 10,
            settle_delay_ms: 2000,
            poll_interval_ms: 250,
            headless: true,
            browser_idle_timeout_secs: 90,
            selectors: Selectors::default(),
        }
    }
}

impl ScrapeConfig {
    /// Reads `scraper.json` from the working directory, or falls back to defaults.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file {:?} found. Using defaults.", path);
            return ScrapeConfig::default();
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to read config file {:?}: {}", path, e);
                return ScrapeConfig::default();
            }
        };

        match serde_json::from_str::<ScrapeConfig>(&content) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                error!("Failed to parse config file {:?}: {}. Using defaults.", path, e);
                ScrapeConfig::default()
            }
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn control_timeout(&self) -> Duration {
        Duration::from_secs(self.control_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn browser_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.browser_idle_timeout_secs)
    }
}
