//! Tagged views over the shapes a drafting model actually returns.
//!
//! Each `from_value` is total: any JSON maps onto some variant, with
//! `Unknown` / `Missing` absorbing shapes that carry nothing usable.

use serde_json::{Map, Value};

use crate::citations::{citation_id, citation_ids};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBrief {
    pub sections: Option<Vec<RawSection>>,
    pub footnotes: Vec<RawFootnote>,
    pub spoken: Option<String>,
}

impl RawBrief {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                sections: match map.get("sections") {
                    Some(Value::Array(items)) => Some(items.iter().map(RawSection::from_value).collect()),
                    _ => None,
                },
                footnotes: map.get("footnotes").map(RawFootnote::list_from_value).unwrap_or_default(),
                spoken: map.get("spoken").and_then(Value::as_str).map(str::to_string),
            },
            // A reply that is only a list is taken to be the section list.
            Value::Array(items) => Self {
                sections: Some(items.iter().map(RawSection::from_value).collect()),
                ..Self::default()
            },
            Value::String(s) => Self {
                spoken: Some(s.clone()),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawSection {
    Object { title: String, paragraphs: RawParagraphs },
    Title(String),
    Unknown,
}

impl RawSection {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Title(s.clone()),
            Value::Object(map) => Self::Object {
                title: map.get("title").and_then(scalar_text).unwrap_or_default(),
                paragraphs: RawParagraphs::from_value(map.get("paragraphs")),
            },
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawParagraphs {
    List(Vec<RawParagraph>),
    Single(String),
    Missing,
}

impl RawParagraphs {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) => Self::List(items.iter().map(RawParagraph::from_value).collect()),
            Some(Value::String(s)) => Self::Single(s.clone()),
            _ => Self::Missing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawParagraph {
    Text(String),
    Cited { text: String, sources: Vec<u32> },
    Sentences(Vec<RawSentence>),
    Unknown,
}

impl RawParagraph {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Object(map) => match map.get("sentences") {
                Some(Value::Array(items)) => Self::Sentences(items.iter().map(RawSentence::from_value).collect()),
                Some(Value::Null) | None => {
                    let (text, sources) = cited_fields(map);
                    Self::Cited { text, sources }
                }
                Some(single) => Self::Sentences(vec![RawSentence::from_value(single)]),
            },
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawSentence {
    Text(String),
    Cited { text: String, sources: Vec<u32> },
    Unknown,
}

impl RawSentence {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Object(map) => {
                let (text, sources) = cited_fields(map);
                Self::Cited { text, sources }
            }
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawFootnote {
    /// 1-based position in the source list.
    pub position: usize,
    pub id: Option<u32>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl RawFootnote {
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| Self::from_value(i + 1, item))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn from_value(position: usize, value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                position,
                id: map.get("id").and_then(citation_id),
                title: map.get("title").and_then(scalar_text).and_then(non_empty),
                url: map.get("url").and_then(scalar_text).and_then(non_empty),
            }),
            // A bare link.
            Value::String(s) => Some(Self {
                position,
                id: None,
                title: None,
                url: non_empty(s.clone()),
            }),
            _ => None,
        }
    }
}

fn cited_fields(map: &Map<String, Value>) -> (String, Vec<u32>) {
    let text = map.get("text").and_then(scalar_text).unwrap_or_default();
    let sources = citation_ids(map.get("sources").or_else(|| map.get("citations")));
    (text, sources)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
