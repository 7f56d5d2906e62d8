use std::sync::Arc;

use brief_core::{Error, Result, SpeechSynthesizer};

use crate::TtsConfig;

pub mod elevenlabs;

pub use elevenlabs::ElevenLabsTts;

pub fn create_synthesizer(config: &TtsConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
    if config.api_key.trim().is_empty() {
        return Err(Error::Config("ElevenLabs API key is required".to_string()));
    }
    if config.voice_id.trim().is_empty() {
        return Err(Error::Config("ElevenLabs voice id is required".to_string()));
    }
    Ok(Arc::new(ElevenLabsTts::new(config)))
}
