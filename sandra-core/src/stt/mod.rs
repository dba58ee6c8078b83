//! Remote speech recognition for recorded user turns

pub mod gemini;
pub mod mock;
pub mod provider;
pub mod types;

pub use gemini::{GeminiStt, GeminiSttConfig};
pub use provider::SpeechToText;
pub use types::Transcript;
