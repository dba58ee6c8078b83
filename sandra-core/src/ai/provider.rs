use crate::ai::{error::AiError, types::*};

#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, AiError>;
}
