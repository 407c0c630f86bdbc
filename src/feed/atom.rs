use std::io::{BufReader, Read};

use atom_syndication::Feed;

use super::{FeedDocument, FeedEntry};
use crate::error::FetchError;

/// Entries without a link are dropped, as in the RSS parser. `published`
/// falls back to the mandatory `updated` element.
pub fn parse<R: Read>(reader: R) -> Result<FeedDocument, FetchError> {
    let feed = Feed::read_from(BufReader::new(reader))?;

    let entries = feed
        .entries()
        .iter()
        .filter_map(|entry| {
            let link = entry.links().first()?;
            Some(FeedEntry {
                url: link.href().to_string(),
                title: entry.title().as_str().to_string(),
                published: entry
                    .published()
                    .or(Some(entry.updated()))
                    .map(|d| d.to_utc()),
            })
        })
        .collect();

    Ok(FeedDocument {
        title: feed.title().as_str().to_string(),
        entries,
    })
}
