use listing_scraper_lib::{logger, pipeline, ChromeLauncher, ScrapeConfig};

use std::error::Error;
use log::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    info!("Starting listing scraper...");

    let config = ScrapeConfig::load();
    let launcher = ChromeLauncher::new(config.headless, config.browser_idle_timeout());

    let reports = pipeline::run_all(&config, launcher)?;

    let failed: Vec<_> = reports.iter().filter(|r| !r.is_success()).collect();
    for report in &failed {
        warn!("No output for {} ({})", report.target.url, report.target.file_name);
    }

    info!(
        "Scraping completed. {} of {} pages saved.",
        reports.len() - failed.len(),
        reports.len()
    );

    if !failed.is_empty() {
        return Err(format!("{} of {} pages failed", failed.len(), reports.len()).into());
    }
    Ok(())
}
