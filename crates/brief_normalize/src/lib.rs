//! Coerces loosely-structured brief payloads into a [`brief_core::Document`].
//!
//! The entry point is [`normalize_brief`]. It never fails: malformed input
//! degrades through sections, then free `spoken` text, then an external
//! plain-text transcript, and finally to an empty document.

mod citations;
mod footnotes;
pub mod normalize;
pub mod raw;
pub mod text;
pub mod transcript;

pub use normalize::{normalize_brief, normalize_transcript, BriefSource, Normalized};
pub use raw::{RawBrief, RawFootnote, RawParagraph, RawParagraphs, RawSection, RawSentence};
pub use transcript::{parse_transcript, Transcript};

pub mod prelude {
    pub use super::{normalize_brief, BriefSource, Normalized};
    pub use brief_core::{Document, Footnote, Paragraph, Section};
}
