use std::collections::BTreeSet;

use brief_core::{Document, Paragraph, Section};
use serde::Serialize;
use serde_json::Value;

use crate::citations::{collapse_whitespace, extract_inline_citations};
use crate::footnotes::FootnoteTable;
use crate::raw::{RawBrief, RawFootnote, RawParagraph, RawParagraphs, RawSection, RawSentence};
use crate::text::free_text_paragraphs;
use crate::transcript::parse_transcript;

/// Which producer in the fallback chain yielded the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BriefSource {
    Sections,
    Spoken,
    Transcript,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub document: Document,
    pub source: BriefSource,
}

impl Normalized {
    fn empty() -> Self {
        Self {
            document: Document::default(),
            source: BriefSource::Empty,
        }
    }
}

/// Normalizes a drafted brief, falling back to `transcript` when the JSON
/// carries no usable text. Total: the worst case is an empty document with
/// [`BriefSource::Empty`].
pub fn normalize_brief(value: &Value, transcript: Option<&str>) -> Normalized {
    let raw = RawBrief::from_value(value);
    let table = FootnoteTable::build(&raw.footnotes);

    let normalized = from_sections(&raw, &table)
        .map(|document| Normalized { document, source: BriefSource::Sections })
        .or_else(|| {
            raw.spoken
                .as_deref()
                .and_then(|spoken| from_free_text(spoken, &raw.footnotes))
                .map(|document| Normalized { document, source: BriefSource::Spoken })
        })
        .or_else(|| {
            transcript
                .and_then(|text| from_free_text(text, &raw.footnotes))
                .map(|document| Normalized { document, source: BriefSource::Transcript })
        })
        .unwrap_or_else(Normalized::empty);

    tracing::debug!(
        "Normalized brief from {:?}: {} sections, {} paragraphs, {} footnotes",
        normalized.source,
        normalized.document.sections.len(),
        normalized.document.paragraph_count(),
        normalized.document.footnotes.len()
    );
    normalized
}

/// Normalizes a plain-text transcript on its own.
pub fn normalize_transcript(text: &str) -> Normalized {
    match from_free_text(text, &[]) {
        Some(document) => Normalized { document, source: BriefSource::Transcript },
        None => Normalized::empty(),
    }
}

fn from_sections(raw: &RawBrief, table: &FootnoteTable) -> Option<Document> {
    let sections: Vec<Section> = raw
        .sections
        .as_ref()?
        .iter()
        .filter_map(|section| coerce_section(section, table))
        .collect();

    if sections.iter().all(|s| s.paragraphs.is_empty()) {
        return None;
    }
    Some(Document {
        sections,
        footnotes: table.footnotes.clone(),
    })
}

fn from_free_text(text: &str, json_footnotes: &[RawFootnote]) -> Option<Document> {
    let parsed = parse_transcript(text);
    let table = if json_footnotes.is_empty() {
        FootnoteTable::build(&parsed.footnotes)
    } else {
        FootnoteTable::build(json_footnotes)
    };

    let paragraphs: Vec<Paragraph> = free_text_paragraphs(&parsed.body)
        .iter()
        .filter_map(|block| {
            let (text, ids) = extract_inline_citations(block);
            (!text.is_empty()).then(|| Paragraph {
                text,
                citations: resolve_all(ids, &table),
            })
        })
        .collect();

    if paragraphs.is_empty() {
        return None;
    }
    Some(Document {
        sections: vec![Section::untitled(paragraphs)],
        footnotes: table.footnotes,
    })
}

fn coerce_section(section: &RawSection, table: &FootnoteTable) -> Option<Section> {
    match section {
        RawSection::Title(title) => {
            let title = collapse_whitespace(title);
            (!title.is_empty()).then(|| Section { title, paragraphs: Vec::new() })
        }
        RawSection::Object { title, paragraphs } => {
            let title = collapse_whitespace(title);
            let paragraphs: Vec<Paragraph> = match paragraphs {
                RawParagraphs::List(items) => items.iter().filter_map(|p| coerce_paragraph(p, table)).collect(),
                RawParagraphs::Single(text) => coerce_paragraph(&RawParagraph::Text(text.clone()), table)
                    .into_iter()
                    .collect(),
                RawParagraphs::Missing => Vec::new(),
            };
            if title.is_empty() && paragraphs.is_empty() {
                None
            } else {
                Some(Section { title, paragraphs })
            }
        }
        RawSection::Unknown => None,
    }
}

fn coerce_paragraph(paragraph: &RawParagraph, table: &FootnoteTable) -> Option<Paragraph> {
    let (text, ids) = match paragraph {
        RawParagraph::Text(text) => (collapse_whitespace(text), Vec::new()),
        RawParagraph::Cited { text, sources } => (collapse_whitespace(text), sources.clone()),
        RawParagraph::Sentences(sentences) => {
            let mut texts = Vec::with_capacity(sentences.len());
            let mut ids = Vec::new();
            for sentence in sentences {
                let (text, sources) = match sentence {
                    RawSentence::Text(text) => (text.as_str(), &[][..]),
                    RawSentence::Cited { text, sources } => (text.as_str(), sources.as_slice()),
                    RawSentence::Unknown => continue,
                };
                let text = collapse_whitespace(text);
                if text.is_empty() {
                    continue;
                }
                texts.push(text);
                ids.extend_from_slice(sources);
            }
            (texts.join(" "), ids)
        }
        RawParagraph::Unknown => return None,
    };

    if text.is_empty() {
        return None;
    }
    Some(Paragraph {
        text,
        citations: resolve_all(ids, table),
    })
}

fn resolve_all(ids: Vec<u32>, table: &FootnoteTable) -> BTreeSet<u32> {
    ids.into_iter()
        .filter_map(|id| {
            let resolved = table.resolve(id);
            if resolved.is_none() {
                tracing::debug!("Dropping dangling citation {}", id);
            }
            resolved
        })
        .collect()
}
