//! Plain-text transcripts: spoken body, optional `---` divider, then a
//! `Sources:` block of `[id] title --- url` or `[id] url` lines.

use lazy_static::lazy_static;
use regex::Regex;

use crate::raw::RawFootnote;

lazy_static! {
    static ref SOURCES_HEADER: Regex =
        Regex::new(r"(?im)^[ \t]*(?:-{3,}[ \t]*)?sources[ \t]*:[ \t\r]*$").unwrap();
    static ref LABELLED_LINE: Regex = Regex::new(r"^\[(\d+)\]\s*(.*)$").unwrap();
}

const TITLE_SEPARATORS: [&str; 2] = ["---", "\u{2014}"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub body: String,
    pub footnotes: Vec<RawFootnote>,
}

pub fn parse_transcript(text: &str) -> Transcript {
    let Some(header) = SOURCES_HEADER.find_iter(text).last() else {
        return Transcript {
            body: text.trim().to_string(),
            footnotes: Vec::new(),
        };
    };

    let footnotes = text[header.end()..]
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .filter_map(|(i, line)| parse_source_line(i + 1, line))
        .collect();

    Transcript {
        body: strip_divider(&text[..header.start()]).to_string(),
        footnotes,
    }
}

fn strip_divider(body: &str) -> &str {
    let body = body.trim_end();
    let (head, last) = body.rsplit_once('\n').unwrap_or(("", body));
    let last = last.trim();
    if last.len() >= 3 && last.chars().all(|c| c == '-') {
        head.trim()
    } else {
        body.trim()
    }
}

fn parse_source_line(position: usize, line: &str) -> Option<RawFootnote> {
    let (id, rest) = match LABELLED_LINE.captures(line) {
        Some(caps) => (
            caps[1].parse::<u32>().ok().filter(|id| *id > 0),
            caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
        ),
        None => (None, line.trim_start_matches(['-', '*']).trim().to_string()),
    };

    let (title, url) = split_title_url(&rest)?;
    Some(RawFootnote {
        position,
        id,
        title,
        url: Some(url),
    })
}

fn split_title_url(rest: &str) -> Option<(Option<String>, String)> {
    for sep in TITLE_SEPARATORS {
        if let Some((title, url)) = rest.rsplit_once(sep) {
            let url = url.split_whitespace().next()?.to_string();
            let title = title.trim();
            return Some(((!title.is_empty()).then(|| title.to_string()), url));
        }
    }

    // No separator: the link is the first http(s) token, the rest is title.
    let mut tokens: Vec<&str> = rest.split_whitespace().collect();
    let idx = tokens
        .iter()
        .position(|t| t.starts_with("http://") || t.starts_with("https://"))?;
    let url = tokens.remove(idx).to_string();
    let title = tokens.join(" ");
    Some(((!title.is_empty()).then_some(title), url))
}
