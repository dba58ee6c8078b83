//! Remote text-to-speech

pub mod gemini;
pub mod mock;
pub mod provider;
pub mod types;

pub use gemini::{GeminiTts, GeminiTtsConfig};
pub use provider::TextToSpeech;
pub use types::{AudioData, SpeechOutcome, Voice};
