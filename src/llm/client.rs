use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::llm::{Generator, SYSTEM_PROMPT};

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Configuration for the Anthropic API client
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key (from ANTHROPIC_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "claude-sonnet-4-20250514")
    pub model: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
    /// Messages endpoint
    pub api_url: String,
}

impl AnthropicConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable not set")?;

        Ok(Self::new(api_key, DEFAULT_MODEL.to_string()))
    }

    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.1,
            max_tokens: 8192,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// Anthropic API client
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Send a message to Claude and get a response
    pub async fn send_message(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            system: Some(system.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Anthropic API error: {} - {}", status, body);
        }

        let response: AnthropicResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic API response")?;

        if let Some(usage) = &response.usage {
            debug!(
                "Anthropic usage: {} input tokens, {} output tokens",
                usage.input_tokens, usage.output_tokens
            );
        }

        response.text().context("No text content in response")
    }
}

impl Generator for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, prompt: &str, context_file: Option<&Path>) -> CompileResult<String> {
        let mut user = prompt.to_string();

        if let Some(path) = context_file {
            let document =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CompileError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;
            user.push_str(&format_context(path, &document));
        }

        self.send_message(SYSTEM_PROMPT, &user)
            .await
            .map_err(|e| CompileError::generator(self.name(), format!("{:#}", e)))
    }
}

/// Render the working document as a trailing section of the user message
fn format_context(path: &Path, document: &str) -> String {
    let mut section = format!("\nPROVIDED YAML ({}):\n", path.display());
    section.push_str(document);
    if !document.ends_with('\n') {
        section.push('\n');
    }
    section
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

impl AnthropicResponse {
    /// Concatenated text of all text blocks, if there are any
    fn text(&self) -> Option<String> {
        let blocks: Vec<&str> = self
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text.as_str())
            .collect();

        if blocks.is_empty() {
            None
        } else {
            Some(blocks.concat())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_with_model() {
        let config = AnthropicConfig::new("key".to_string(), DEFAULT_MODEL.to_string())
            .with_model("claude-opus-4-20250514");
        assert_eq!(config.model, "claude-opus-4-20250514");
        assert_eq!(config.max_tokens, 8192);
    }

    #[test]
    fn test_response_text_joins_text_blocks() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "title: Bread\n"},
                {"type": "tool_use", "id": "x", "name": "noop", "input": {}},
                {"type": "text", "text": "slug: bread\n"}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 5}
        }"#;

        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().unwrap(), "title: Bread\nslug: bread\n");
    }

    #[test]
    fn test_response_without_text() {
        let response: AnthropicResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_format_context_appends_document() {
        let section = format_context(Path::new("recipe.yml"), "title: Bread");
        assert_eq!(section, "\nPROVIDED YAML (recipe.yml):\ntitle: Bread\n");
    }

    #[test]
    fn test_default_api_url() {
        let config = AnthropicConfig::new("key".to_string(), DEFAULT_MODEL.to_string());
        assert_eq!(config.api_url, "https://api.anthropic.com/v1/messages");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_generator_error() {
        // Bind then drop to get a local port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = AnthropicConfig::new("key".to_string(), DEFAULT_MODEL.to_string())
            .with_api_url(format!("http://127.0.0.1:{}/v1/messages", port));
        let client = AnthropicClient::new(config);

        let err = client.generate("p", None).await.unwrap_err();
        assert!(matches!(err, CompileError::Generator { .. }));
        assert!(
            err.to_string().starts_with("Error calling anthropic:"),
            "{}",
            err
        );
    }

    #[tokio::test]
    async fn test_missing_context_file_is_read_error() {
        let client = AnthropicClient::new(AnthropicConfig::new(
            "key".to_string(),
            DEFAULT_MODEL.to_string(),
        ));
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yml");

        let err = client.generate("p", Some(&missing)).await.unwrap_err();
        assert!(matches!(err, CompileError::Read { .. }));
    }
}
