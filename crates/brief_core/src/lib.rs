pub mod artifacts;
pub mod episode;
pub mod error;
pub mod inference;
pub mod types;

pub use episode::EpisodeId;
pub use error::Error;
pub use inference::{BriefModel, BriefRequest, SpeechSynthesizer};
pub use types::{Document, FeedEntry, Footnote, Enclosure, Paragraph, Section, AUDIO_MIME_TYPE};

pub type Result<T> = std::result::Result<T, Error>;
