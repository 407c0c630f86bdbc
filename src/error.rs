use thiserror::Error;

/// A feed could not be fetched or its body could not be parsed.
///
/// Always scoped to a single feed: the poll cycle logs it and moves on
/// to the next feed in the list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid RSS document: {0}")]
    Rss(#[from] rss::Error),
    #[error("invalid Atom document: {0}")]
    Atom(#[from] atom_syndication::Error),
}

/// The messaging sink rejected a call or could not be reached.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("slack rejected the call: {0}")]
    Api(String),
    #[error("slack response missing `{0}`")]
    MalformedResponse(&'static str),
}
