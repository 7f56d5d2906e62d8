use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref INLINE_MARKER: Regex = Regex::new(r"\s*\[(\d+(?:\s*,\s*\d+)*)\]").unwrap();
}

/// A citation id is a positive integer, given either as a JSON number or as
/// a string such as `"3"` or `"[3]"`. Anything else yields `None`.
pub(crate) fn citation_id(value: &Value) -> Option<u32> {
    let id = match value {
        Value::Number(n) => match n.as_u64() {
            Some(u) => u32::try_from(u).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u32::MAX as f64)
                .map(|f| f as u32),
        },
        Value::String(s) => s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim()
            .parse::<u32>()
            .ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

/// Ids from a `sources` field, which may be a list or a single scalar.
pub(crate) fn citation_ids(value: Option<&Value>) -> Vec<u32> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(citation_id).collect(),
        Some(other) => citation_id(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Strips `[n]` / `[n, m]` markers out of free text, returning the cleaned
/// text and the ids in order of appearance.
pub(crate) fn extract_inline_citations(text: &str) -> (String, Vec<u32>) {
    let mut ids = Vec::new();
    for caps in INLINE_MARKER.captures_iter(text) {
        ids.extend(caps[1].split(',').filter_map(|n| n.trim().parse::<u32>().ok()));
    }
    let cleaned = INLINE_MARKER.replace_all(text, "");
    (collapse_whitespace(&cleaned), ids.into_iter().filter(|id| *id > 0).collect())
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
