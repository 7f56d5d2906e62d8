use std::path::Path;

use brief_core::{EpisodeId, Error, FeedEntry, Result};
use chrono::{DateTime, Utc};

use crate::document::FeedDocument;
use crate::episode::{build_entry, EpisodeDescriptor, FeedSettings};
use crate::upsert::Upserted;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUpdate {
    pub entry: FeedEntry,
    pub outcome: Upserted,
    pub item_count: usize,
}

/// Publishes the audio for `guid` into the feed at `feed_path`.
///
/// The guid, the audio file and the existing feed are all validated before
/// anything is written; on error the feed file is left as it was.
pub fn update_feed(
    feed_path: &Path,
    guid: &str,
    audio_path: &Path,
    settings: &FeedSettings,
    now: DateTime<Utc>,
) -> Result<FeedUpdate> {
    let id: EpisodeId = guid.parse()?;
    let descriptor = EpisodeDescriptor::from_audio(id, audio_path)?;
    let entry = build_entry(&descriptor, settings);

    let mut doc = FeedDocument::load_or_new(feed_path, settings)?;
    let outcome = doc.upsert_episode(&entry);
    doc.touch_last_build_date(now);
    doc.save(feed_path)?;

    tracing::info!(
        "Feed updated: {} {:?}, enclosure={} length={} pubDate={}",
        entry.guid,
        outcome,
        entry.enclosure.url,
        entry.enclosure.length,
        entry.pub_date
    );

    Ok(FeedUpdate {
        entry,
        outcome,
        item_count: doc.item_count(),
    })
}

/// Refreshes `lastBuildDate` so podcast clients re-poll the feed. Items,
/// including their `pubDate`s, are written back unchanged. The feed must
/// already exist.
pub fn nudge_feed(feed_path: &Path, now: DateTime<Utc>) -> Result<FeedDocument> {
    if !feed_path.is_file() {
        return Err(Error::Config(format!("No feed to nudge at {}", feed_path.display())));
    }
    let mut doc = FeedDocument::load(feed_path)?;
    doc.touch_last_build_date(now);
    doc.save(feed_path)?;

    tracing::info!(
        "Feed nudged: {} items, lastBuildDate={}",
        doc.item_count(),
        doc.last_build_date().unwrap_or_default()
    );
    Ok(doc)
}
