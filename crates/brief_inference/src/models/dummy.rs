use std::fmt;

use async_trait::async_trait;
use brief_core::{BriefModel, BriefRequest, Result};
use serde_json::{json, Value};

/// Offline model returning a fixed, well-formed brief.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BriefModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn draft_brief(&self, request: &BriefRequest) -> Result<Value> {
        let opening = format!("Hello, here is your weekly update for {}.", request.episode.long_date());
        Ok(json!({
            "sections": [
                {
                    "title": "New products and capabilities",
                    "paragraphs": [{"sentences": [
                        {"text": opening, "sources": []},
                        {"text": "Several vendors shipped agent tooling this week.", "sources": [1]}
                    ]}]
                },
                {
                    "title": "Market dynamics",
                    "paragraphs": [{"text": "Funding stayed concentrated in infrastructure.", "sources": [2]}]
                }
            ],
            "footnotes": [
                {"id": 1, "title": "Agent tooling roundup", "url": "https://example.com/agents"},
                {"id": 2, "title": "Funding tracker", "url": "https://example.com/funding"}
            ]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::EpisodeId;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let request = BriefRequest {
            episode: EpisodeId::from_stamp("20250915").unwrap(),
            target_minutes: 4.5,
            headlines: Vec::new(),
            notes: String::new(),
        };

        let value = model.draft_brief(&request).await.unwrap();
        assert_eq!(value["sections"].as_array().unwrap().len(), 2);
        assert_eq!(value["footnotes"][1]["id"], 2);
        let opening = value["sections"][0]["paragraphs"][0]["sentences"][0]["text"].as_str().unwrap();
        assert!(opening.contains("Monday, September 15, 2025"));
    }
}
