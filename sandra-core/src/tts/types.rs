use serde::{Deserialize, Serialize};

use crate::audio::{try_encode_wav, AudioError, WavClip};

/// Decoded audio returned from TTS synthesis, mono 16-bit PCM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioData {
    /// Consume the samples into a playable container. Fails when the
    /// provider reported a zero or oversized rate.
    pub fn into_wav(self) -> Result<WavClip, AudioError> {
        try_encode_wav(&self.samples, self.sample_rate)
    }
}

/// Voice configuration for TTS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language_code: String,
}

/// Result of trying to voice a reply. Remote failures never surface as
/// errors; they select the local speech path instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    Audio(WavClip),
    Fallback { text: String, reason: String },
}
