use std::fs;
use std::path::PathBuf;

use brief_core::Error;
use brief_feed::{nudge_feed, update_feed, FeedDocument, FeedSettings, Upserted};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>AI Exec Brief</title>
    <link>https://example.github.io/ai-news-audio-feed</link>
    <description>Weekly brief</description>
    <lastBuildDate>Mon, 08 Sep 2025 06:00:00 GMT</lastBuildDate>
    <item>
      <title>Episode A</title>
      <description>Existing episode</description>
      <pubDate>Mon, 08 Sep 2025 00:00:00 GMT</pubDate>
      <guid isPermaLink="false">ai_news_20250908</guid>
      <enclosure url="https://example.github.io/ai-news-audio-feed/audio/ai_news_20250908.mp3" length="4321" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

struct Fixture {
    dir: TempDir,
    feed: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let feed = dir.path().join("feed.xml");
        fs::write(&feed, FEED).unwrap();
        fs::create_dir(dir.path().join("audio")).unwrap();
        Self { dir, feed }
    }

    fn audio(&self, name: &str, bytes: usize) -> PathBuf {
        let path = self.dir.path().join("audio").join(name);
        fs::write(&path, vec![0xffu8; bytes]).unwrap();
        path
    }
}

fn settings() -> FeedSettings {
    FeedSettings::new("https://example.github.io/ai-news-audio-feed", "AI Exec Brief").unwrap()
}

#[test]
fn test_new_episode_is_inserted_first_and_old_entry_unchanged() {
    let fx = Fixture::new();
    let before = FeedDocument::load(&fx.feed).unwrap().entries();
    let audio = fx.audio("ai_news_20250915.mp3", 2048);

    let update = update_feed(&fx.feed, "ai_news_20250915", &audio, &settings(), Utc::now()).unwrap();
    assert_eq!(update.outcome, Upserted::Inserted);
    assert_eq!(update.item_count, 2);

    let after = FeedDocument::load(&fx.feed).unwrap().entries();
    assert_eq!(after[0].guid, "ai_news_20250915");
    assert_eq!(after[0].enclosure.length, 2048);
    assert_eq!(
        after[0].enclosure.url,
        "https://example.github.io/ai-news-audio-feed/audio/ai_news_20250915.mp3"
    );
    assert_eq!(after[1], before[0]);
}

#[test]
fn test_rerun_is_idempotent() {
    let fx = Fixture::new();
    let audio = fx.audio("ai_news_20250915.mp3", 2048);

    let first_run = Utc.with_ymd_and_hms(2025, 9, 15, 6, 0, 0).unwrap();
    let second_run = Utc.with_ymd_and_hms(2025, 9, 15, 7, 30, 0).unwrap();
    let first = update_feed(&fx.feed, "ai_news_20250915", &audio, &settings(), first_run).unwrap();
    let second = update_feed(&fx.feed, "ai_news_20250915", &audio, &settings(), second_run).unwrap();

    assert_eq!(first.entry, second.entry);
    assert_eq!(second.outcome, Upserted::Replaced(0));
    assert_eq!(second.item_count, 2);

    let doc = FeedDocument::load(&fx.feed).unwrap();
    assert_eq!(doc.entries()[0].pub_date, "Mon, 15 Sep 2025 00:00:00 GMT");
    assert_eq!(doc.last_build_date(), Some("Mon, 15 Sep 2025 07:30:00 GMT"));
}

#[test]
fn test_zero_byte_audio_leaves_feed_untouched() {
    let fx = Fixture::new();
    let audio = fx.audio("ai_news_20250915.mp3", 0);
    let original = fs::read(&fx.feed).unwrap();

    let result = update_feed(&fx.feed, "ai_news_20250915", &audio, &settings(), Utc::now());
    assert!(matches!(result, Err(Error::EmptyAudio(_))));
    assert_eq!(fs::read(&fx.feed).unwrap(), original);
}

#[test]
fn test_missing_audio_and_bad_guid_leave_feed_untouched() {
    let fx = Fixture::new();
    let original = fs::read(&fx.feed).unwrap();
    let missing = fx.dir.path().join("audio").join("ai_news_20250915.mp3");

    let result = update_feed(&fx.feed, "ai_news_20250915", &missing, &settings(), Utc::now());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("ai_news_20250915.mp3"), "{}", message);

    let audio = fx.audio("ai_news_20250915.mp3", 10);
    let result = update_feed(&fx.feed, "ai_news_2025-09-15", &audio, &settings(), Utc::now());
    assert!(matches!(result, Err(Error::InvalidGuid(_))));

    assert_eq!(fs::read(&fx.feed).unwrap(), original);
}

#[test]
fn test_missing_feed_starts_new_channel() {
    let fx = Fixture::new();
    fs::remove_file(&fx.feed).unwrap();
    let audio = fx.audio("ai_news_20250915.mp3", 64);

    let update = update_feed(&fx.feed, "ai_news_20250915", &audio, &settings(), Utc::now()).unwrap();
    assert_eq!(update.item_count, 1);
    let doc = FeedDocument::load(&fx.feed).unwrap();
    assert_eq!(doc.channel().title(), "AI Exec Brief");
    assert_eq!(doc.entries().len(), 1);
}

#[test]
fn test_nudge_only_refreshes_last_build_date() {
    let fx = Fixture::new();
    let before = FeedDocument::load(&fx.feed).unwrap().entries();

    let now = Utc.with_ymd_and_hms(2025, 9, 16, 0, 24, 56).unwrap();
    let doc = nudge_feed(&fx.feed, now).unwrap();
    assert_eq!(doc.item_count(), 1);

    let reloaded = FeedDocument::load(&fx.feed).unwrap();
    assert_eq!(reloaded.last_build_date(), Some("Tue, 16 Sep 2025 00:24:56 GMT"));
    assert_eq!(reloaded.entries(), before);
    assert_eq!(reloaded.entries()[0].pub_date, "Mon, 08 Sep 2025 00:00:00 GMT");
}

#[test]
fn test_nudge_requires_existing_feed() {
    let fx = Fixture::new();
    fs::remove_file(&fx.feed).unwrap();
    assert!(matches!(nudge_feed(&fx.feed, Utc::now()), Err(Error::Config(_))));
    assert!(!fx.feed.exists());
}
