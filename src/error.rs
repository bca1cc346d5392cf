use reqwest::StatusCode;
use thiserror::Error;

/// A product card that could not be turned into a `Product`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("invalid {name} pattern: {reason}")]
    InvalidPattern { name: &'static str, reason: String },
    #[error("{field}: no element matches '{selector}'")]
    MissingElement { field: &'static str, selector: String },
    #[error("{field}: element has no '{attribute}' attribute")]
    MissingAttribute { field: &'static str, attribute: String },
    #[error("{field}: value is empty")]
    EmptyField { field: &'static str },
    #[error("{field}: cannot parse '{value}' as a number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field}: {value} is out of range")]
    OutOfRange { field: &'static str, value: String },
}

/// Failures of the browser capability itself.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to launch browser: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    #[error("browser call failed: {0}")]
    Protocol(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("browser session error: {0}")]
    Session(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Everything that can abort the scrape of one target page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
