//! Paragraph recovery for free text that arrives without structure.

use lazy_static::lazy_static;
use regex::Regex;

use crate::citations::collapse_whitespace;

/// Sentences per regrouped paragraph.
pub const SENTENCES_PER_PARAGRAPH: usize = 4;

/// Below this many blank-line blocks, blocks are re-cut by sentence.
pub const MIN_BLOCKS: usize = 3;

lazy_static! {
    static ref BLANK_LINE: Regex = Regex::new(r"\n[ \t\r]*\n").unwrap();
}

/// Non-empty blank-line separated blocks, whitespace collapsed.
pub fn split_blocks(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");
    BLANK_LINE
        .split(&text)
        .map(collapse_whitespace)
        .filter(|b| !b.is_empty())
        .collect()
}

/// Splits on `.`, `?` or `!` followed by whitespace. The punctuation stays
/// with its sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '?' | '!') {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if next.is_whitespace() {
                let end = i + c.len_utf8();
                sentences.push(collapse_whitespace(&text[start..end]));
                start = end;
            }
        }
    }
    sentences.push(collapse_whitespace(&text[start..]));
    sentences.retain(|s| !s.is_empty());
    sentences
}

pub fn regroup(sentences: &[String], size: usize) -> Vec<String> {
    sentences.chunks(size.max(1)).map(|chunk| chunk.join(" ")).collect()
}

/// Paragraph texts for free text. Authored blank-line structure is kept when
/// there is enough of it; otherwise each block is cut into sentences and
/// regrouped so the result is neither one wall of text nor one sentence per
/// paragraph. Sentences never move across a blank line.
pub fn free_text_paragraphs(text: &str) -> Vec<String> {
    let blocks = split_blocks(text);
    if blocks.len() >= MIN_BLOCKS {
        return blocks;
    }
    blocks
        .iter()
        .flat_map(|block| regroup(&split_sentences(block), SENTENCES_PER_PARAGRAPH))
        .collect()
}
