use brief_core::{Document, Paragraph};

const BODY_STYLE: &str =
    "font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Arial,sans-serif;font-size:15px;line-height:1.6;color:#111;";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Capitalizes the first letter of each word and lowercases the rest. An
/// apostrophe does not start a new word.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = in_word && (c == '\'' || c == '\u{2019}');
        }
    }
    out
}

/// Email body: one `<p>` per paragraph with `<sup>` markers, then the
/// sources list. Citation ids are rendered exactly as stored.
pub fn render(doc: &Document) -> String {
    let mut parts = vec![format!("<div style=\"{}\">", BODY_STYLE)];

    for section in &doc.sections {
        if !section.title.is_empty() {
            parts.push(format!(
                "<p style='margin:0 0 8px 0;'><strong>{}</strong></p>",
                escape(&title_case(&section.title))
            ));
        }
        for paragraph in &section.paragraphs {
            parts.push(format!("<p>{}</p>", render_paragraph(paragraph)));
        }
    }

    if !doc.footnotes.is_empty() {
        parts.push("<hr><p><strong>Sources</strong></p><ul>".to_string());
        for (id, note) in &doc.footnotes {
            let url = escape(&note.url);
            let link = format!("<a href=\"{}\">{}</a>", url, url);
            match note.title.as_deref() {
                Some(title) => parts.push(format!("<li>[{}] {} \u{2014} {}</li>", id, escape(title), link)),
                None => parts.push(format!("<li>[{}] {}</li>", id, link)),
            }
        }
        parts.push("</ul>".to_string());
    }

    parts.push("</div>".to_string());
    parts.join("\n")
}

fn render_paragraph(paragraph: &Paragraph) -> String {
    let text = escape(&paragraph.text);
    if paragraph.citations.is_empty() {
        return text;
    }
    let ids: Vec<String> = paragraph.citations.iter().map(u32::to_string).collect();
    format!("{}<sup>{}</sup>", text, ids.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::{Footnote, Section};
    use std::collections::BTreeMap;

    fn doc() -> Document {
        let mut footnotes = BTreeMap::new();
        footnotes.insert(
            1,
            Footnote {
                title: Some("R&D <report>".to_string()),
                url: "https://a.example/?q=1&r=2".to_string(),
            },
        );
        footnotes.insert(3, Footnote { title: None, url: "https://c.example".to_string() });
        Document {
            sections: vec![
                Section {
                    title: "new PRODUCTS".to_string(),
                    paragraphs: vec![Paragraph::with_citations("Launches <soon>.", [3, 1])],
                },
                Section::untitled(vec![Paragraph::new("Plain.")]),
            ],
            footnotes,
        }
    }

    #[test]
    fn test_render_structure() {
        let html = render(&doc());
        assert!(html.contains("<strong>New Products</strong>"));
        assert!(html.contains("<p>Launches &lt;soon&gt;.<sup>1,3</sup></p>"));
        assert!(html.contains("<p>Plain.</p>"));
        assert!(html.contains("<li>[1] R&amp;D &lt;report&gt; \u{2014} <a href=\"https://a.example/?q=1&amp;r=2\">"));
        assert!(html.contains("<li>[3] <a href=\"https://c.example\">https://c.example</a></li>"));
        assert_eq!(html.matches("<p>").count(), 3);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("market dynamics"), "Market Dynamics");
        assert_eq!(title_case("AI TALENT shifts"), "Ai Talent Shifts");
        assert_eq!(title_case("what's new: gpt-5"), "What's New: Gpt-5");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_no_sources_block_without_footnotes() {
        let html = render(&Document {
            sections: vec![Section::untitled(vec![Paragraph::new("Only.")])],
            ..Document::default()
        });
        assert!(!html.contains("Sources"));
        assert!(html.starts_with("<div"));
        assert!(html.ends_with("</div>"));
    }
}
