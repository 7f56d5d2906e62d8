use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use brief_core::{BriefModel, BriefRequest, Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{parse_reply, system_prompt, user_prompt};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEXT_MODEL: &str = "gpt-4o-mini";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

pub struct OpenAiModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    text_model: String,
}

impl OpenAiModel {
    pub fn new(api_key: String, base_url: Option<String>, text_model: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            text_model: text_model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
        }
    }

    fn chat_request(&self, request: &BriefRequest) -> ChatRequest {
        ChatRequest {
            model: self.text_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt(request),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(request),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
            temperature: 0.4,
            max_tokens: 1600,
        }
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .finish()
    }
}

#[async_trait]
impl BriefModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn draft_brief(&self, request: &BriefRequest) -> Result<Value> {
        tracing::info!("🧠 Drafting brief for {} with {}", request.episode, self.text_model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.chat_request(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "OpenAI returned {}: {}",
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let content = response
            .json::<ChatResponse>()
            .await?
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| Error::Inference("OpenAI returned an empty reply".to_string()))?;

        Ok(parse_reply(&content))
    }
}
