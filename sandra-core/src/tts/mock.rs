use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::provider::TextToSpeech;
use super::types::{AudioData, Voice};

#[derive(Debug, Clone)]
pub enum MockTtsBehavior {
    /// Return these samples for every request
    Audio { samples: Vec<i16>, sample_rate: u32 },
    /// Fail every request with the given message
    Fail { message: String },
}

/// Mock speech provider for testing
#[derive(Clone)]
pub struct MockTts {
    behavior: Arc<Mutex<MockTtsBehavior>>,
    spoken: Arc<Mutex<Vec<String>>>,
}

impl MockTts {
    pub fn new(behavior: MockTtsBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_samples(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self::new(MockTtsBehavior::Audio {
            samples,
            sample_rate,
        })
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockTtsBehavior::Fail {
            message: message.into(),
        })
    }

    pub fn set_behavior(&self, behavior: MockTtsBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    /// Texts passed to `synthesize`, in call order
    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextToSpeech for MockTts {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn default_voice(&self) -> Voice {
        Voice {
            id: "mock".to_string(),
            name: "Mock".to_string(),
            language_code: "es-ES".to_string(),
        }
    }

    async fn synthesize(&self, text: &str, _voice: Option<&Voice>) -> Result<AudioData> {
        self.spoken.lock().unwrap().push(text.to_string());

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            MockTtsBehavior::Audio {
                samples,
                sample_rate,
            } => Ok(AudioData {
                samples,
                sample_rate,
            }),
            MockTtsBehavior::Fail { message } => anyhow::bail!(message),
        }
    }
}
