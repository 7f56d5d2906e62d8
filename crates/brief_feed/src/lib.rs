//! Idempotent episode upsert for the podcast RSS feed.

pub mod document;
pub mod episode;
pub mod update;
pub mod upsert;

pub use document::FeedDocument;
pub use episode::{build_entry, EpisodeDescriptor, FeedSettings};
pub use update::{nudge_feed, update_feed, FeedUpdate};
pub use upsert::{upsert, HasGuid, Upserted};

pub mod prelude {
    pub use super::{nudge_feed, update_feed, EpisodeDescriptor, FeedDocument, FeedSettings, Upserted};
    pub use brief_core::{EpisodeId, FeedEntry, Result, Error};
}
