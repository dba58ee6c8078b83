use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_TEXT_MODEL, DEFAULT_TTS_MODEL};
use crate::chat::SessionOptions;
use crate::prompt;
use crate::stt::GeminiSttConfig;
use crate::tts::GeminiTtsConfig;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiSettings {
    /// Leave empty to read the key from `GEMINI_API_KEY`
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Model that transcribes recorded turns
    #[serde(default = "default_text_model")]
    pub stt_model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            text_model: default_text_model(),
            tts_model: default_tts_model(),
            stt_model: default_text_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceSettings {
    #[serde(default = "default_voice_name")]
    pub voice_name: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Rate assumed when a speech response does not declare one
    #[serde(default = "default_sample_rate")]
    pub default_sample_rate: u32,

    #[serde(default)]
    pub muted: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice_name: default_voice_name(),
            language: default_language(),
            default_sample_rate: default_sample_rate(),
            muted: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChatSettings {
    /// Overrides the built-in receptionist persona
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Where reply audio is written; defaults to ~/.sandra/audio
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub gemini: GeminiSettings,

    #[serde(default)]
    pub voice: VoiceSettings,

    #[serde(default)]
    pub chat: ChatSettings,
}

impl Settings {
    /// The configured key, or `env_value` when the file leaves it empty
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        let configured = self.gemini.api_key.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }
        env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    pub fn gemini_config(&self, api_key: String) -> GeminiConfig {
        GeminiConfig {
            api_key,
            base_url: self.gemini.base_url.clone(),
            timeout: Duration::from_secs(self.gemini.timeout_secs),
        }
    }

    pub fn tts_config(&self) -> GeminiTtsConfig {
        GeminiTtsConfig {
            model: self.gemini.tts_model.clone(),
            voice_name: self.voice.voice_name.clone(),
            language_code: self.voice.language.clone(),
            default_sample_rate: self.voice.default_sample_rate,
        }
    }

    pub fn stt_config(&self) -> GeminiSttConfig {
        GeminiSttConfig {
            model: self.gemini.stt_model.clone(),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            system_prompt: self
                .chat
                .system_prompt
                .clone()
                .unwrap_or_else(|| prompt::SYSTEM_PROMPT.to_string()),
            language: self.voice.language.clone(),
            muted: self.voice.muted,
            ..SessionOptions::default()
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.chat.output_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(".sandra")
                .join("audio")
        })
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_tts_model() -> String {
    DEFAULT_TTS_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_voice_name() -> String {
    "Kore".to_string()
}

fn default_language() -> String {
    prompt::DEFAULT_LANGUAGE.to_string()
}

fn default_sample_rate() -> u32 {
    16000
}
