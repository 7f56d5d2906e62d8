use std::fs::{self, File};
use std::path::{Path, PathBuf};

use brief_core::{Enclosure, EpisodeId, Error, FeedEntry, Result, AUDIO_MIME_TYPE};
use url::Url;

pub const DEFAULT_SHOW_TITLE: &str = "AI Exec Brief";

#[derive(Debug, Clone)]
pub struct FeedSettings {
    base_url: Url,
    pub show_title: String,
}

impl FeedSettings {
    pub fn new(base_url: &str, show_title: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid feed base URL {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("Feed base URL cannot be a base: {}", base_url)));
        }
        Ok(Self {
            base_url,
            show_title: show_title.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Public URL of a file under the feed's `audio/` directory.
    pub fn audio_url(&self, file_name: &str) -> String {
        format!("{}/audio/{}", self.base_url(), file_name)
    }
}

/// A validated audio artifact ready to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeDescriptor {
    pub id: EpisodeId,
    pub audio_path: PathBuf,
    pub file_name: String,
    pub length: u64,
}

impl EpisodeDescriptor {
    /// Reads the byte length of `audio_path`. Missing, unreadable and empty
    /// files are rejected so a broken enclosure is never published.
    pub fn from_audio(id: EpisodeId, audio_path: impl AsRef<Path>) -> Result<Self> {
        let audio_path = audio_path.as_ref().to_path_buf();
        let missing = || Error::MissingAudio(audio_path.clone());

        let metadata = fs::metadata(&audio_path).map_err(|_| missing())?;
        if !metadata.is_file() {
            return Err(missing());
        }
        File::open(&audio_path).map_err(|_| missing())?;
        if metadata.len() == 0 {
            return Err(Error::EmptyAudio(audio_path.clone()));
        }

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(missing)?;

        Ok(Self {
            id,
            file_name,
            length: metadata.len(),
            audio_path,
        })
    }
}

/// Builds the feed entry for an episode. Every field is a function of the
/// descriptor and settings, never of the current time.
pub fn build_entry(descriptor: &EpisodeDescriptor, settings: &FeedSettings) -> FeedEntry {
    let id = descriptor.id;
    FeedEntry {
        guid: id.guid(),
        title: format!("{} - {}", settings.show_title, id.short_date()),
        description: format!("Weekly AI executive brief for {}.", id.long_date()),
        enclosure: Enclosure {
            url: settings.audio_url(&descriptor.file_name),
            length: descriptor.length,
            mime_type: AUDIO_MIME_TYPE.to_string(),
        },
        pub_date: id.pub_date(),
    }
}
