//! # Feed builder
//!
//! Builds the RSS 2.0 document straight from the media directory on every
//! request. There is no persisted feed state: an item exists because a
//! `*.mp4` file exists, its identity is the filename, and its description is
//! whatever the optional `<name>.description` sidecar contains.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use rss::{
    Channel, ChannelBuilder, EnclosureBuilder, ImageBuilder, Item,
    ItemBuilder,
};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::vars::{MEDIA_MIME_TYPE, MEDIA_SUFFIX, SIDECAR_SUFFIX};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("couldn't serialize feed: {0}")]
    Xml(#[from] rss::Error),
    #[error("feed wasn't valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub struct FeedBuilder<'a> {
    config: &'a Config,
    media_dir: &'a Path,
}

impl<'a> FeedBuilder<'a> {
    pub fn new(config: &'a Config, media_dir: &'a Path) -> FeedBuilder<'a> {
        FeedBuilder { config, media_dir }
    }

    /// Renders the feed as a pretty-printed XML document with a leading
    /// declaration line. Output is deterministic for a given directory state.
    pub fn build(&self) -> Result<String, FeedError> {
        let mut buf = Vec::from(XML_DECLARATION.as_bytes());
        buf = self.channel().pretty_write_to(buf, b' ', 2)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn channel(&self) -> Channel {
        let mut channel = ChannelBuilder::default();
        channel
            .title(self.config.feed_title.as_str())
            .link(self.config.feed_url.as_str())
            .description(self.config.feed_description.as_str())
            .items(self.scan_items());

        if !self.config.feed_owner.is_empty() {
            channel.managing_editor(Some(self.config.feed_owner.clone()));
        }
        if !self.config.feed_image_url.is_empty() {
            // RSS requires title and link inside <image>; reuse the channel's.
            channel.image(Some(
                ImageBuilder::default()
                    .url(self.config.feed_image_url.as_str())
                    .title(self.config.feed_title.as_str())
                    .link(self.config.feed_url.as_str())
                    .build(),
            ));
        }

        channel.build()
    }

    /// One item per `*.mp4` entry, sorted by filename. An unlistable
    /// directory just means an empty feed.
    fn scan_items(&self) -> Vec<Item> {
        let mut entries = match fs::read_dir(self.media_dir) {
            Ok(entries) => {
                entries.filter_map(|entry| entry.ok()).collect::<Vec<_>>()
            }
            Err(err) => {
                debug!(
                    dir = %self.media_dir.display(),
                    "couldn't list media dir: {err}"
                );
                return Vec::new();
            }
        };
        entries.sort_by_key(|entry| entry.file_name());

        let mut items = Vec::new();
        for entry in entries {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if !name.ends_with(MEDIA_SUFFIX) {
                continue;
            }
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(_) => continue,
            };

            let description = fs::read_to_string(
                self.media_dir.join(format!("{name}{SIDECAR_SUFFIX}")),
            )
            .unwrap_or_default();

            let link = media_link(&self.config.feed_url, &name);
            let enclosure = EnclosureBuilder::default()
                .url(link.clone())
                .length(metadata.len().to_string())
                .mime_type(MEDIA_MIME_TYPE)
                .build();

            let title = name
                .strip_suffix(MEDIA_SUFFIX)
                .unwrap_or(&name)
                .to_owned();

            let mut item = ItemBuilder::default();
            item.title(Some(title))
                .link(Some(link))
                .description(Some(description))
                .enclosure(Some(enclosure));
            if let Some(pub_date) =
                metadata.modified().ok().and_then(format_mtime)
            {
                item.pub_date(Some(pub_date));
            }

            items.push(item.build());
        }

        items
    }
}

/// Joins the configured base URL, the `files` sub-path, and a filename.
/// Escaping is whatever `Url`'s segment handling provides; a base that
/// doesn't parse as an absolute URL degrades to plain concatenation.
pub fn media_link(base: &str, filename: &str) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            match url.path_segments_mut() {
                Ok(mut segments) => {
                    segments.pop_if_empty().extend(["files", filename]);
                }
                Err(()) => return format!("{base}/files/{filename}"),
            }
            url.to_string()
        }
        Err(_) => {
            format!("{}/files/{filename}", base.trim_end_matches('/'))
        }
    }
}

/// RFC 822 publish date, `02 Jan 06 15:04 UTC` style. A zero modification
/// time yields no date at all rather than a placeholder.
fn format_mtime(mtime: SystemTime) -> Option<String> {
    if mtime == SystemTime::UNIX_EPOCH {
        return None;
    }
    let mtime: DateTime<Utc> = mtime.into();
    Some(format!("{} UTC", mtime.format("%d %b %y %H:%M")))
}
