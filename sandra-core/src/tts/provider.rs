use anyhow::Result;
use async_trait::async_trait;

use super::types::{AudioData, Voice};

/// Remote speech synthesis
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    fn name(&self) -> &'static str;

    fn default_voice(&self) -> Voice;

    /// Synthesize `text` as mono 16-bit PCM. Any error means the caller
    /// should fall back to local speech for this utterance.
    async fn synthesize(&self, text: &str, voice: Option<&Voice>) -> Result<AudioData>;

    async fn list_voices(&self) -> Result<Vec<Voice>> {
        Ok(vec![self.default_voice()])
    }
}
