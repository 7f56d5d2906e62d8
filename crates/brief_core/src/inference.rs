use async_trait::async_trait;
use serde_json::Value;

use crate::{EpisodeId, Result};

/// What the drafting model is asked to produce for one episode.
#[derive(Debug, Clone)]
pub struct BriefRequest {
    pub episode: EpisodeId,
    pub target_minutes: f32,
    /// Recent headlines offered to the model as optional context.
    pub headlines: Vec<String>,
    pub notes: String,
}

#[async_trait]
pub trait BriefModel: Send + Sync {
    fn name(&self) -> &str;

    /// Draft a brief. The returned JSON is loosely shaped; callers pass it
    /// through the normalizer rather than trusting its structure.
    async fn draft_brief(&self, request: &BriefRequest) -> Result<Value>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn name(&self) -> &str;

    /// Render text to MPEG audio bytes.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}
