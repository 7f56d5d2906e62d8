//! Output formats for a normalized brief: the HTML email body, the
//! plain-text transcript, the TTS script and the email subject.

pub mod html;
pub mod transcript;

use brief_core::{Document, EpisodeId};

/// Text handed to speech synthesis: paragraph texts only, no titles or
/// citation markers.
pub fn spoken_text(doc: &Document) -> String {
    doc.paragraphs()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn subject_line(id: EpisodeId) -> String {
    format!("AI Exec Brief (transcript) - {}", id.short_date())
}
