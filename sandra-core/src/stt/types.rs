use serde::{Deserialize, Serialize};

/// Text recognized from one recorded utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub language_code: String,
}

impl Transcript {
    /// Nothing intelligible was said
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
