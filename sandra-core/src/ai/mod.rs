pub mod error;
pub mod gemini;
pub mod mock;
pub mod provider;
pub mod types;

pub use error::AiError;
pub use gemini::{GeminiClient, GeminiConfig, GeminiProvider};
pub use provider::GenerativeModel;
pub use types::*;
