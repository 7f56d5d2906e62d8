use brief_core::{Document, Footnote, Paragraph, Section};
use brief_normalize::{normalize_brief, normalize_transcript, BriefSource};
use brief_render::transcript;
use serde_json::json;

fn texts(doc: &Document) -> Vec<&str> {
    doc.paragraphs().map(|p| p.text.as_str()).collect()
}

#[test]
fn test_transcript_reads_back_paragraphs_and_sources() {
    let drafted = normalize_brief(
        &json!({
            "sections": [
                {"title": "Market", "paragraphs": [
                    {"text": "Agents moved into production.", "sources": [1]},
                    {"text": "Chip supply loosened.", "sources": [1, 2]}
                ]},
                {"title": "Talent", "paragraphs": ["Hiring tilted toward evaluation skills."]}
            ],
            "footnotes": [
                {"id": 1, "title": "Agent survey", "url": "https://one.example"},
                {"id": 2, "url": "https://two.example"}
            ]
        }),
        None,
    );
    assert_eq!(drafted.source, BriefSource::Sections);

    let text = transcript::render(&drafted.document);
    assert!(!text.contains("Market"));
    assert!(!text.contains("[1, 2]"));

    let reread = normalize_transcript(&text);
    assert_eq!(reread.source, BriefSource::Transcript);
    assert_eq!(texts(&reread.document), texts(&drafted.document));
    assert_eq!(reread.document.footnotes, drafted.document.footnotes);
}

#[test]
fn test_short_transcript_keeps_its_words_and_sources() {
    let mut doc = Document {
        sections: vec![Section {
            title: "Market".to_string(),
            paragraphs: vec![Paragraph::with_citations("A one. B two. C three. D four. E five.", [1])],
        }],
        ..Document::default()
    };
    doc.footnotes.insert(1, Footnote { title: None, url: "https://one.example".to_string() });

    let reread = normalize_transcript(&transcript::render(&doc));
    // Fewer than three blocks are regrouped by sentence when read back.
    assert_eq!(texts(&reread.document), vec!["A one. B two. C three. D four.", "E five."]);
    assert_eq!(texts(&reread.document).join(" "), texts(&doc).join(" "));
    assert_eq!(reread.document.footnotes, doc.footnotes);
}
