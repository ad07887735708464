// Quote pipeline: request → parse → resolve image, plus the display state
// the HTTP handlers expose. All LLM calls go through llm_client.

pub mod display;
pub mod handlers;
pub mod image;
pub mod orchestrator;
pub mod parser;
pub mod requester;
