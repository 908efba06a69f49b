use ::scraper::error::SelectorErrorKind;
use std::path::PathBuf;

/// All errors that can occur while scraping the league site.
#[derive(thiserror::Error, Debug)]
pub enum XbshlError {
    /// The login POST came back with a non-success status.
    #[error("could not authenticate with {url}: status {status}")]
    Auth {
        url: String,
        status: reqwest::StatusCode,
    },

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// The markup around an element does not have the expected shape.
    #[error("unexpected page structure: {context}")]
    StructureMismatch { context: String },

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// A cell that should hold a number could not be parsed.
    #[error("failed to parse number from {value:?}: {reason}")]
    Format { value: String, reason: String },

    /// Invalid scrape configuration or command line usage.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Environment variables could not be deserialized into a config.
    #[error("failed to load configuration from environment: {0}")]
    Env(#[from] envy::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Records could not be serialized to XML.
    #[error("failed to serialize {document}: {reason}")]
    Serialize {
        document: &'static str,
        reason: String,
    },
}

impl XbshlError {
    /// Whether the error is confined to a single roster entry or stat row,
    /// as opposed to the page or the session as a whole.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            XbshlError::StructureMismatch { .. }
                | XbshlError::ElementNotFound { .. }
                | XbshlError::Format { .. }
        )
    }

    pub(crate) fn structure(context: impl Into<String>) -> Self {
        XbshlError::StructureMismatch {
            context: context.into(),
        }
    }
}

impl<'a> From<SelectorErrorKind<'a>> for XbshlError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        XbshlError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, XbshlError>;
