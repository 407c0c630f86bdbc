pub mod atom;
pub mod rss;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::FetchError;

/// One fetched feed: its display title plus entries in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub entries: Vec<FeedEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub url: String,
    pub title: String,
    pub published: Option<DateTime<Utc>>,
}

/// Stable identity of an entry: SHA-256 of its URL, as lowercase hex.
/// Keyed on the URL alone so identity survives feed re-ordering and
/// title edits.
pub fn fingerprint(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub trait FeedTransport {
    fn fetch(&self, url: &str) -> Result<FeedDocument, FetchError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: crate::http::http_client()?,
        })
    }
}

impl FeedTransport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<FeedDocument, FetchError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        let text = String::from_utf8_lossy(&bytes);

        if text.contains("<rss") {
            rss::parse(&bytes[..])
        } else {
            atom::parse(&bytes[..])
        }
    }
}
