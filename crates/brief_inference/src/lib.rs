use std::fmt;

pub mod headlines;
pub mod models;
pub mod tts;

pub const DEFAULT_MODEL: &str = "openai";

#[derive(Clone)]
pub struct InferenceConfig {
    /// `openai` or `dummy`.
    pub model_name: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Chat model id sent to the API.
    pub text_model: Option<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: None,
            text_model: None,
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("model_name", &self.model_name)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .finish()
    }
}

#[derive(Clone)]
pub struct TtsConfig {
    pub api_key: String,
    pub voice_id: String,
    pub model_id: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for TtsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtsConfig")
            .field("api_key", &"<redacted>")
            .field("voice_id", &self.voice_id)
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub mod prelude {
    pub use super::headlines::fetch_headlines;
    pub use super::models::create_model;
    pub use super::tts::create_synthesizer;
    pub use super::{InferenceConfig, TtsConfig};
    pub use brief_core::{BriefModel, BriefRequest, Error, Result, SpeechSynthesizer};
}

pub use models::create_model;
pub use tts::create_synthesizer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_keys() {
        let config = InferenceConfig {
            api_key: Some("sk-secret".to_string()),
            ..InferenceConfig::default()
        };
        let tts = TtsConfig {
            api_key: "xi-secret".to_string(),
            voice_id: "voice".to_string(),
            model_id: None,
            base_url: None,
        };
        assert!(!format!("{:?}", config).contains("sk-secret"));
        assert!(!format!("{:?}", tts).contains("xi-secret"));
    }
}
