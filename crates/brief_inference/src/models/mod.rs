use std::sync::Arc;

use brief_core::{BriefModel, BriefRequest, Error, Result};
use serde_json::{json, Value};

use crate::InferenceConfig;

pub mod dummy;
pub mod openai;

pub async fn create_model(config: &InferenceConfig) -> Result<Arc<dyn BriefModel>> {
    match config.model_name.to_lowercase().as_str() {
        "openai" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| Error::Config("OpenAI API key is required".to_string()))?;
            let model = openai::OpenAiModel::new(api_key, config.base_url.clone(), config.text_model.clone());
            Ok(Arc::new(model))
        }
        "dummy" => Ok(Arc::new(dummy::DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model {:?}. Available models: openai, dummy",
            other
        ))),
    }
}

pub(crate) fn system_prompt(request: &BriefRequest) -> String {
    format!(
        "You are a senior strategic AI analyst preparing a weekly {:.1}-minute executive audio brief. \
         Return a JSON object with: \
         \"sections\": [{{\"title\": string, \"paragraphs\": [{{\"sentences\": [{{\"text\": string, \"sources\": [int]}}]}}]}}], \
         \"footnotes\": [{{\"id\": int, \"title\": string, \"url\": string}}], \
         \"spoken\": the full script as plain text with no citations or URLs. \
         The script begins with \"Hello, here is your weekly update for {}\".",
        request.target_minutes,
        request.episode.long_date()
    )
}

pub(crate) fn user_prompt(request: &BriefRequest) -> String {
    let mut prompt = format!(
        "Write a concise audio brief of about {} words covering new products, strategic impact, \
         implementation opportunities, market dynamics and talent shifts.",
        (request.target_minutes * 160.0) as u32
    );
    if !request.headlines.is_empty() {
        prompt.push_str("\n\nOptional recent headlines:\n");
        prompt.push_str(&request.headlines.join("\n"));
    }
    if !request.notes.trim().is_empty() {
        prompt.push_str("\n\nNotes for this week:\n");
        prompt.push_str(request.notes.trim());
    }
    prompt
}

/// Parses a model reply as JSON. Code fences are tolerated; a reply that is
/// not a JSON object becomes `{"spoken": <reply>, "footnotes": []}`.
pub fn parse_reply(content: &str) -> Value {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    match serde_json::from_str::<Value>(unfenced) {
        Ok(value @ Value::Object(_)) => value,
        _ => {
            tracing::warn!("Model reply was not a JSON object, treating it as spoken text");
            json!({ "spoken": trimmed, "footnotes": [] })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::EpisodeId;

    fn request() -> BriefRequest {
        BriefRequest {
            episode: EpisodeId::from_stamp("20250915").unwrap(),
            target_minutes: 4.5,
            headlines: vec!["- Chip launch (https://x)".to_string()],
            notes: "Keep it tight.".to_string(),
        }
    }

    #[test]
    fn test_parse_reply_object() {
        let value = parse_reply("{\"spoken\": \"Hi.\", \"footnotes\": []}");
        assert_eq!(value["spoken"], "Hi.");
    }

    #[test]
    fn test_parse_reply_fenced() {
        let value = parse_reply("```json\n{\"sections\": []}\n```");
        assert!(value["sections"].is_array());
    }

    #[test]
    fn test_parse_reply_falls_back_to_spoken() {
        let value = parse_reply("  Sorry, here is plain text.  ");
        assert_eq!(value["spoken"], "Sorry, here is plain text.");
        assert_eq!(value["footnotes"], json!([]));

        let value = parse_reply("[1, 2]");
        assert_eq!(value["spoken"], "[1, 2]");
    }

    #[test]
    fn test_prompts_carry_request_context() {
        let request = request();
        assert!(system_prompt(&request).contains("Monday, September 15, 2025"));
        let user = user_prompt(&request);
        assert!(user.contains("about 720 words"));
        assert!(user.contains("Chip launch"));
        assert!(user.contains("Keep it tight."));
    }

    #[tokio::test]
    async fn test_create_model() {
        let dummy = InferenceConfig {
            model_name: "dummy".to_string(),
            ..InferenceConfig::default()
        };
        assert_eq!(create_model(&dummy).await.unwrap().name(), "Dummy");

        let missing_key = InferenceConfig::default();
        assert!(matches!(create_model(&missing_key).await, Err(Error::Config(_))));

        let unknown = InferenceConfig {
            model_name: "llama".to_string(),
            ..InferenceConfig::default()
        };
        assert!(matches!(create_model(&unknown).await, Err(Error::Config(_))));

        let openai = InferenceConfig {
            api_key: Some("sk-test".to_string()),
            ..InferenceConfig::default()
        };
        assert_eq!(create_model(&openai).await.unwrap().name(), "OpenAI");
    }
}
