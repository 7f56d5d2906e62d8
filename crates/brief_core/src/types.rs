use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// A normalized brief: ordered sections plus the footnote table their
/// paragraphs cite into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
    pub footnotes: BTreeMap<u32, Footnote>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All paragraphs in presentation order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.sections.iter().flat_map(|s| s.paragraphs.iter())
    }

    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
}

impl Section {
    pub fn untitled(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            title: String::new(),
            paragraphs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub citations: BTreeSet<u32>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: BTreeSet::new(),
        }
    }

    pub fn with_citations(text: impl Into<String>, citations: impl IntoIterator<Item = u32>) -> Self {
        Self {
            text: text.into(),
            citations: citations.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    pub length: u64,
    pub mime_type: String,
}

/// One podcast episode as it appears in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub guid: String,
    pub title: String,
    pub description: String,
    pub enclosure: Enclosure,
    pub pub_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_count_spans_sections() {
        let doc = Document {
            sections: vec![
                Section::untitled(vec![Paragraph::new("One."), Paragraph::new("Two.")]),
                Section {
                    title: "Market".to_string(),
                    paragraphs: vec![Paragraph::with_citations("Three.", [2, 1])],
                },
            ],
            footnotes: BTreeMap::new(),
        };

        assert!(!doc.is_empty());
        assert_eq!(doc.paragraph_count(), 3);
        let texts: Vec<&str> = doc.paragraphs().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["One.", "Two.", "Three."]);
        assert_eq!(doc.sections[1].paragraphs[0].citations.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_default_document_is_empty() {
        assert!(Document::default().is_empty());
        assert_eq!(Document::default().paragraph_count(), 0);
    }
}
