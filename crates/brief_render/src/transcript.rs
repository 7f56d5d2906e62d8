use brief_core::Document;

use crate::spoken_text;

/// Plain-text transcript: the spoken paragraphs separated by blank lines,
/// then a `---` / `Sources:` block. Section titles and citation markers are
/// not part of the spoken body.
pub fn render(doc: &Document) -> String {
    let mut out = spoken_text(doc);
    if !doc.footnotes.is_empty() {
        out.push_str("\n\n---\nSources:");
        for (id, note) in &doc.footnotes {
            match note.title.as_deref() {
                Some(title) => out.push_str(&format!("\n[{}] {} --- {}", id, title, note.url)),
                None => out.push_str(&format!("\n[{}] {}", id, note.url)),
            }
        }
    }
    out.push('\n');
    out
}
