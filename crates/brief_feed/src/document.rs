use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use brief_core::{Enclosure, Error, FeedEntry, Result};
use chrono::{DateTime, Utc};
use rss::extension::itunes::{ITunesItemExtension, NAMESPACE as ITUNES_NAMESPACE};
use rss::{Channel, Guid, Item};
use tempfile::NamedTempFile;

use crate::episode::FeedSettings;
use crate::upsert::{upsert, Upserted};

/// The whole feed held in memory. Items this crate does not write are
/// carried through untouched.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    channel: Channel,
}

impl FeedDocument {
    pub fn new(settings: &FeedSettings) -> Self {
        let mut channel = Channel::default();
        channel.set_title(settings.show_title.clone());
        channel.set_link(settings.base_url().to_string());
        channel.set_description(format!("{}: weekly AI executive audio brief", settings.show_title));
        Self { channel }
    }

    pub fn parse(xml: &str) -> Result<Self> {
        Ok(Self {
            channel: Channel::read_from(xml.as_bytes())?,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            channel: Channel::read_from(BufReader::new(file))?,
        })
    }

    /// Loads `path`, or starts an empty channel when the file does not exist.
    pub fn load_or_new(path: &Path, settings: &FeedSettings) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("No feed at {}, starting a new channel", path.display());
            Ok(Self::new(settings))
        }
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Entries for every item that has both a guid and an enclosure.
    pub fn entries(&self) -> Vec<FeedEntry> {
        self.channel.items().iter().filter_map(entry_from_item).collect()
    }

    pub fn item_count(&self) -> usize {
        self.channel.items().len()
    }

    pub fn last_build_date(&self) -> Option<&str> {
        self.channel.last_build_date()
    }

    pub fn upsert_episode(&mut self, entry: &FeedEntry) -> Upserted {
        let mut item = item_from_entry(entry);
        if self.declares_itunes() {
            let mut itunes = ITunesItemExtension::default();
            itunes.set_episode_type("full".to_string());
            item.set_itunes_ext(itunes);
        }

        let mut items = self.channel.items().to_vec();
        let outcome = upsert(&mut items, item);
        self.channel.set_items(items);
        outcome
    }

    /// `lastBuildDate` records when the file was regenerated, so unlike
    /// episode dates it follows the clock.
    pub fn touch_last_build_date(&mut self, now: DateTime<Utc>) {
        self.channel
            .set_last_build_date(now.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
    }

    pub fn to_xml(&self) -> Result<String> {
        let bytes = self.channel.write_to(Vec::new())?;
        String::from_utf8(bytes).map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Writes to a temporary file next to `path` and renames it into place,
    /// so readers never observe a half-written feed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(xml.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    fn declares_itunes(&self) -> bool {
        self.channel.namespaces().values().any(|ns| ns == ITUNES_NAMESPACE)
    }
}

fn item_from_entry(entry: &FeedEntry) -> Item {
    let mut guid = Guid::default();
    guid.set_value(entry.guid.clone());
    guid.set_permalink(false);

    let mut enclosure = rss::Enclosure::default();
    enclosure.set_url(entry.enclosure.url.clone());
    enclosure.set_length(entry.enclosure.length.to_string());
    enclosure.set_mime_type(entry.enclosure.mime_type.clone());

    let mut item = Item::default();
    item.set_title(entry.title.clone());
    item.set_description(entry.description.clone());
    item.set_pub_date(entry.pub_date.clone());
    item.set_guid(guid);
    item.set_enclosure(enclosure);
    item
}

fn entry_from_item(item: &Item) -> Option<FeedEntry> {
    let enclosure = item.enclosure()?;
    Some(FeedEntry {
        guid: item.guid()?.value().to_string(),
        title: item.title().unwrap_or_default().to_string(),
        description: item.description().unwrap_or_default().to_string(),
        enclosure: Enclosure {
            url: enclosure.url().to_string(),
            length: enclosure.length().trim().parse().unwrap_or(0),
            mime_type: enclosure.mime_type().to_string(),
        },
        pub_date: item.pub_date().unwrap_or_default().to_string(),
    })
}
