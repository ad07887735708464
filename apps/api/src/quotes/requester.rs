//! Quote Requester — asks the text-generation service for one bilingual quote.
//!
//! Returns the raw response text untouched. Any failure comes back as a single
//! `LlmError`; the orchestrator logs it and falls back to the default quote.

use async_trait::async_trait;

use crate::llm_client::prompts::QUOTE_PROMPT;
use crate::llm_client::{LlmClient, LlmError};

/// Source of raw quote text. Implemented by the real LLM client and by test fakes.
///
/// Implementations make a single attempt per call and never retry.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn request_quote(&self) -> Result<String, LlmError>;
}

#[async_trait]
impl QuoteSource for LlmClient {
    async fn request_quote(&self) -> Result<String, LlmError> {
        self.call_text(QUOTE_PROMPT).await
    }
}
