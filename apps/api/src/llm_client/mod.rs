/// LLM Client — the single point of entry for all Claude API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
///
/// Model: claude-sonnet-4-20250514 (hardcoded, quotes are tuned against it)
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for every quote request.
pub const MODEL: &str = "claude-sonnet-4-20250514";
/// Two 280-char posts plus a keyword fit comfortably.
const MAX_TOKENS: u32 = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Text of the first content block. `None` if that block is not text.
    pub fn text(&self) -> Option<&str> {
        self.content
            .first()
            .filter(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Thin wrapper over the Anthropic Messages API.
///
/// Makes exactly one attempt per call. Callers decide what a failure means;
/// the quote pipeline swaps in default content rather than retrying.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            api_url,
        })
    }

    /// Sends a single user message and returns the full response object.
    pub async fn call(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let llm_response: LlmResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(llm_response)
    }

    /// Calls the LLM and returns the raw text of the first content block.
    pub async fn call_text(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an Anthropic error body, or returns the body as-is.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<AnthropicError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::llm_client::prompts::QUOTE_PROMPT;
    use crate::testing::serve;

    async fn client_for(router: Router) -> LlmClient {
        let addr = serve(router).await;
        LlmClient::new(
            "test-key".to_string(),
            format!("http://{addr}/v1/messages"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    /// Accepts only a well-formed quote request.
    async fn messages(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authed = headers.get("x-api-key").and_then(|v| v.to_str().ok()) == Some("test-key")
            && headers.contains_key("anthropic-version");
        let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
        if !authed || body["model"] != MODEL || !prompt.contains("KEYWORD:") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"type": "error", "error": {"message": "bad request"}})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({
                "content": [{"type": "text", "text": "ENGLISH: Hi\nFRENCH: Salut\nKEYWORD: ocean"}],
                "usage": {"input_tokens": 12, "output_tokens": 9}
            })),
        )
    }

    #[tokio::test]
    async fn test_call_text_returns_raw_text() {
        let llm = client_for(Router::new().route("/v1/messages", post(messages))).await;
        let text = llm.call_text(QUOTE_PROMPT).await.unwrap();
        assert_eq!(text, "ENGLISH: Hi\nFRENCH: Salut\nKEYWORD: ocean");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async {
                (
                    StatusCode::from_u16(529).unwrap(),
                    r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
                )
            }),
        );
        let err = client_for(router).await.call_text(QUOTE_PROMPT).await.unwrap_err();
        assert!(
            matches!(&err, LlmError::Api { status: 529, message } if message == "Overloaded"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_parse_error() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { Json(json!({"id": "msg_1", "role": "assistant"})) }),
        );
        let err = client_for(router).await.call_text(QUOTE_PROMPT).await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_non_text_first_block_is_empty_content() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async {
                Json(json!({"content": [{"type": "tool_use", "id": "t1"}]}))
            }),
        );
        let err = client_for(router).await.call_text(QUOTE_PROMPT).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let llm = LlmClient::new(
            "test-key".to_string(),
            format!("http://{addr}/v1/messages"),
            Duration::from_secs(5),
        )
        .unwrap();
        let err = llm.call_text(QUOTE_PROMPT).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)), "unexpected error: {err}");
    }

    #[test]
    fn test_text_reads_first_block() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "ENGLISH: Hi"},
                {"type": "text", "text": "ignored"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("ENGLISH: Hi"));
    }

    #[test]
    fn test_text_is_none_when_first_block_is_not_text() {
        let json = r#"{
            "content": [
                {"type": "tool_use"},
                {"type": "text", "text": "ENGLISH: Hi"}
            ]
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_text_is_none_when_content_empty() {
        let response: LlmResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_envelope_without_content_is_a_parse_error() {
        let result = serde_json::from_str::<LlmResponse>(r#"{"id": "msg_1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_api_error_message_extracts_message() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(api_error_message(body), "Overloaded");
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_request_serializes_single_user_message() {
        let body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: "hello",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], MODEL);
        assert_eq!(value["max_tokens"], 500);
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
        assert_eq!(value["messages"][0]["role"], "user");
        assert!(value.get("system").is_none());
    }
}
