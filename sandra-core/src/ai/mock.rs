use crate::ai::{error::AiError, provider::GenerativeModel, types::*};
use std::sync::{Arc, Mutex};

/// Mock behavior for the mock provider
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MockBehavior {
    /// Return a fixed reply
    #[default]
    Success,
    /// Return the given text
    Reply { text: String },
    /// Succeed without any text part
    EmptyCandidate,
    /// Always return a retryable error
    AlwaysRetryableError,
    /// Always return a non-retryable error
    AlwaysNonRetryableError,
    /// Enables multi-turn testing by replaying predetermined behaviors in order
    BehaviorQueue { behaviors: Vec<MockBehavior> },
}

/// Mock generative model for testing
#[derive(Clone)]
pub struct MockProvider {
    behavior: Arc<Mutex<MockBehavior>>,
    call_count: Arc<Mutex<usize>>,
    captured_requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            call_count: Arc::new(Mutex::new(0)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply { text: text.into() })
    }

    fn pop_behavior_from_queue(behavior: &mut MockBehavior) -> MockBehavior {
        if let MockBehavior::BehaviorQueue { behaviors } = behavior {
            if behaviors.is_empty() {
                return MockBehavior::Success;
            }
            return behaviors.remove(0);
        }
        behavior.clone()
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_captured_requests(&self) -> Vec<GenerateRequest> {
        self.captured_requests.lock().unwrap().clone()
    }

    pub fn get_last_captured_request(&self) -> Option<GenerateRequest> {
        self.captured_requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl GenerativeModel for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, AiError> {
        self.captured_requests.lock().unwrap().push(request);
        *self.call_count.lock().unwrap() += 1;

        let effective = {
            let mut behavior = self.behavior.lock().unwrap();
            Self::pop_behavior_from_queue(&mut behavior)
        };

        let text = match effective {
            MockBehavior::Success => Some("Mock response".to_string()),
            MockBehavior::Reply { text } => Some(text),
            MockBehavior::EmptyCandidate => None,
            MockBehavior::AlwaysRetryableError => {
                return Err(AiError::Retryable(anyhow::anyhow!("Mock retryable error")));
            }
            MockBehavior::AlwaysNonRetryableError => {
                return Err(AiError::Terminal(anyhow::anyhow!("Mock terminal error")));
            }
            MockBehavior::BehaviorQueue { .. } => {
                return Err(AiError::Terminal(anyhow::anyhow!(
                    "Nested behavior queues are not supported"
                )));
            }
        };

        Ok(GenerateResponse {
            text,
            usage: TokenUsage::new(10, 10),
        })
    }
}
