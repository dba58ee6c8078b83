pub mod config;
pub mod manager;

#[cfg(test)]
mod tests;

pub use config::{ChatSettings, GeminiSettings, Settings, VoiceSettings};
pub use manager::SettingsManager;
