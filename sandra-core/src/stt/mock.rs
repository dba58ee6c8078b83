use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::provider::SpeechToText;
use super::types::Transcript;
use crate::audio::WavClip;

#[derive(Debug, Clone)]
pub enum MockSttBehavior {
    /// Hear this text in every recording
    Transcript { text: String },
    /// Fail every request with the given message
    Fail { message: String },
}

/// Mock speech recognizer for testing
#[derive(Clone)]
pub struct MockStt {
    behavior: Arc<Mutex<MockSttBehavior>>,
    heard: Arc<Mutex<Vec<(WavClip, String)>>>,
}

impl MockStt {
    pub fn new(behavior: MockSttBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            heard: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn hearing(text: impl Into<String>) -> Self {
        Self::new(MockSttBehavior::Transcript { text: text.into() })
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockSttBehavior::Fail {
            message: message.into(),
        })
    }

    /// Recordings passed to `transcribe` with their language, in call order
    pub fn heard(&self) -> Vec<(WavClip, String)> {
        self.heard.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechToText for MockStt {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn transcribe(&self, clip: &WavClip, language: &str) -> Result<Transcript> {
        self.heard
            .lock()
            .unwrap()
            .push((clip.clone(), language.to_string()));

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            MockSttBehavior::Transcript { text } => Ok(Transcript {
                text,
                language_code: language.to_string(),
            }),
            MockSttBehavior::Fail { message } => anyhow::bail!(message),
        }
    }
}
