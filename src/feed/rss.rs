use std::io::{BufReader, Read};

use chrono::{DateTime, FixedOffset};
use rss::Channel;
use url::Url;

use super::{FeedDocument, FeedEntry};
use crate::error::FetchError;

fn normalize_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => url.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Items without a `<link>` are dropped: the entry URL is the dedup key,
/// so a linkless item has no usable identity.
pub fn parse<R: Read>(reader: R) -> Result<FeedDocument, FetchError> {
    let channel = Channel::read_from(BufReader::new(reader))?;

    let entries = channel
        .items()
        .iter()
        .filter_map(|item| {
            let link = item.link()?;
            Some(FeedEntry {
                url: normalize_url(link),
                title: item.title().unwrap_or("untitled").to_string(),
                published: item
                    .pub_date()
                    .and_then(|d| DateTime::<FixedOffset>::parse_from_rfc2822(d).ok())
                    .map(|d| d.to_utc()),
            })
        })
        .collect();

    Ok(FeedDocument {
        title: channel.title().to_string(),
        entries,
    })
}
