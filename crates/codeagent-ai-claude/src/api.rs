use std::{path::Path, time::Duration};

use async_trait::async_trait;
use codeagent_ai_interface::{AiError, AiService, Result};
use codeagent_config::AiConfig;
use http::{header, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::mask_api_key;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude Messages API backend.
#[derive(Debug, Clone)]
pub struct ClaudeApiService {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [RequestMessage<'a>; 1],
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ClaudeApiService {
    /// Build the backend from AI options.
    pub fn new(config: &AiConfig) -> Self {
        let base_url = if config.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            &config.base_url
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_seconds.max(1)),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn client(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| AiError::ImplementationError { source: e.into() })?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| AiError::ImplementationError { source: e.into() })
    }
}

fn map_reqwest_error(seconds: u64) -> impl FnOnce(reqwest::Error) -> AiError {
    move |e| {
        if e.is_timeout() {
            AiError::Timeout { seconds }
        } else {
            AiError::ImplementationError { source: e.into() }
        }
    }
}

fn extract_text(response: MessagesResponse) -> Result<String> {
    let text = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text)
        .collect::<Vec<_>>()
        .join("\n");

    let text = text.trim();
    if text.is_empty() {
        Err(AiError::EmptyOutput)
    } else {
        Ok(text.to_string())
    }
}

#[async_trait]
impl AiService for ClaudeApiService {
    fn name(&self) -> String {
        "claude-api".into()
    }

    fn can_write_files(&self) -> bool {
        false
    }

    #[tracing::instrument(skip_all, fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!(
            model = %self.model,
            api_key = %mask_api_key(&self.api_key),
            base_url = %self.base_url,
            "Calling Claude messages API"
        );

        let seconds = self.timeout.as_secs();
        let response = self
            .client()?
            .post(self.messages_url())
            .json(&MessagesRequest {
                model: &self.model,
                max_tokens: self.max_tokens,
                messages: [RequestMessage {
                    role: "user",
                    content: prompt,
                }],
            })
            .send()
            .await
            .map_err(map_reqwest_error(seconds))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<MessagesResponse>()
            .await
            .map_err(map_reqwest_error(seconds))?;
        extract_text(body)
    }

    async fn generate_in_directory(&self, _prompt: &str, _directory: &Path) -> Result<String> {
        Err(AiError::UnsupportedOperation {
            operation: "generate_in_directory".into(),
        })
    }

    async fn health_check(&self) -> Result<String> {
        self.generate("Reply with the single word: pong").await
    }
}

#[cfg(test)]
mod tests {
    use codeagent_config::Config;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn service(base_url: String) -> ClaudeApiService {
        let mut config = Config::from_env_no_version().unwrap();
        config.ai.base_url = base_url;
        config.ai.api_key = "sk-test-key".into();
        config.ai.model = "test-model".into();
        config.ai.timeout_seconds = 5;
        ClaudeApiService::new(&config.ai)
    }

    #[tokio::test]
    async fn sends_messages_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "sk-test-key")
                .header("anthropic-version", "2023-06-01");
            then.status(200).json_body(json!({
                "content": [
                    {"type": "text", "text": "first"},
                    {"type": "tool_use", "id": "x"},
                    {"type": "text", "text": "second"}
                ]
            }));
        });

        let output = service(server.base_url()).generate("hello").await.unwrap();

        mock.assert();
        assert_eq!(output, "first\nsecond");
    }

    #[tokio::test]
    async fn error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(529).body("overloaded");
        });

        match service(server.base_url()).generate("hello").await {
            Err(AiError::HttpStatus { status, message }) => {
                assert_eq!(status, 529);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_content() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(json!({"content": []}));
        });

        assert!(matches!(
            service(server.base_url()).generate("hello").await,
            Err(AiError::EmptyOutput)
        ));
    }

    #[tokio::test]
    async fn cannot_write_files() {
        let service = service(String::new());

        assert!(!service.can_write_files());
        assert_eq!(service.messages_url(), "https://api.anthropic.com/v1/messages");
        assert!(matches!(
            service
                .generate_in_directory("hello", Path::new("/tmp"))
                .await,
            Err(AiError::UnsupportedOperation { .. })
        ));
    }
}
