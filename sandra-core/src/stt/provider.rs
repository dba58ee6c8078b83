use anyhow::Result;
use async_trait::async_trait;

use super::types::Transcript;
use crate::audio::WavClip;

/// Trait for speech-to-text providers
#[async_trait]
pub trait SpeechToText: Send + Sync {
    fn name(&self) -> &'static str;

    /// Transcribe a complete recording spoken in `language` (a BCP 47 tag).
    /// A recording with no speech yields a blank transcript, not an error.
    async fn transcribe(&self, clip: &WavClip, language: &str) -> Result<Transcript>;
}
