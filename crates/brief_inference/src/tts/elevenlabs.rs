use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use brief_core::{Error, Result, SpeechSynthesizer};
use reqwest::Client;
use serde::Serialize;

use crate::TtsConfig;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.3,
            similarity_boost: 0.8,
            style: 0.1,
            use_speaker_boost: true,
        }
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model_id: &'a str,
    text: &'a str,
    voice_settings: &'a VoiceSettings,
}

pub struct ElevenLabsTts {
    client: Arc<Client>,
    api_key: String,
    voice_id: String,
    model_id: String,
    base_url: String,
    voice_settings: VoiceSettings,
}

impl ElevenLabsTts {
    pub fn new(config: &TtsConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: config.api_key.clone(),
            voice_id: config.voice_id.clone(),
            model_id: config.model_id.clone().unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            voice_settings: VoiceSettings::default(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id)
    }
}

impl fmt::Debug for ElevenLabsTts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevenLabsTts")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("voice_id", &self.voice_id)
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsTts {
    fn name(&self) -> &str {
        "ElevenLabs"
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(Error::Speech("Refusing to synthesize empty text".to_string()));
        }
        tracing::info!("🔊 Synthesizing {} characters with voice {}", text.len(), self.voice_id);

        let response = self
            .client
            .post(self.endpoint())
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .timeout(REQUEST_TIMEOUT)
            .json(&SpeechRequest {
                model_id: &self.model_id,
                text,
                voice_settings: &self.voice_settings,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Speech(format!(
                "ElevenLabs TTS error {}: {}",
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let audio = response.bytes().await?.to_vec();
        if audio.is_empty() {
            return Err(Error::Speech("ElevenLabs returned no audio".to_string()));
        }
        Ok(audio)
    }
}
