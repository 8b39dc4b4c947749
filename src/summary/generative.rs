use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SummarizerConfig;
use crate::error::{AnalyzerError, Result};
use crate::model::SourceFile;

use super::Summarizer;

const SYSTEM_PROMPT: &str = "You describe source files for project documentation. \
Answer with one or two plain sentences about what the file is for. \
Do not restate the symbol lists.";

/// Names listed per category in the prompt.
const PROMPT_NAME_LIMIT: usize = 20;

/// Minimal chat message for chat-completions payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Summaries from an OpenAI-compatible chat-completions endpoint. The prompt
/// carries only the structural record, never file content.
pub struct GenerativeSummarizer {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
    http: reqwest::blocking::Client,
}

impl GenerativeSummarizer {
    pub fn from_config(config: &SummarizerConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| AnalyzerError::Config("summarizer.endpoint is not set".to_string()))?;
        Self::new(
            endpoint,
            config.model.clone(),
            config.api_key(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AnalyzerError::Summarizer(format!("failed to build summarizer http client: {}", e))
            })?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            timeout,
            http,
        })
    }

    pub fn messages(file: &SourceFile) -> Vec<ChatMessage> {
        vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(build_prompt(file))]
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = self.chat_completions_url();
        let payload = ChatCompletionsRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: Some(0.0),
            stream: Some(false),
        };

        let mut request = self.http.post(&url).json(&payload);
        if let Some(api_key) = self.api_key.as_ref() {
            request = request.bearer_auth(api_key);
        }
        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                AnalyzerError::Summarizer(format!(
                    "request timed out after {:?} (model={})",
                    self.timeout, self.model
                ))
            } else {
                AnalyzerError::Summarizer(format!("request failed (model={}): {}", self.model, e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AnalyzerError::Summarizer(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(AnalyzerError::Summarizer(format!(
                "endpoint returned HTTP {}: {}",
                status,
                truncate_for_error(&body)
            )));
        }

        let parsed: ChatCompletionsResponse = serde_json::from_str(&body).map_err(|e| {
            AnalyzerError::Summarizer(format!(
                "invalid JSON from endpoint: {} (body={})",
                e,
                truncate_for_error(&body)
            ))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AnalyzerError::Summarizer("response had no choices".to_string()))?
            .message
            .content
            .into_text()
            .ok_or_else(|| AnalyzerError::Summarizer("response had empty message content".to_string()))
    }

    fn chat_completions_url(&self) -> String {
        let endpoint = self.endpoint.trim().trim_end_matches('/');
        if endpoint.ends_with("/chat/completions") {
            endpoint.to_string()
        } else if endpoint.ends_with("/v1") {
            format!("{}/chat/completions", endpoint)
        } else {
            format!("{}/v1/chat/completions", endpoint)
        }
    }
}

impl Summarizer for GenerativeSummarizer {
    fn name(&self) -> &'static str {
        "generative"
    }

    fn summarize(&self, file: &SourceFile) -> Result<String> {
        self.complete(&Self::messages(file))
    }
}

fn build_prompt(file: &SourceFile) -> String {
    let list = |names: &[String]| {
        if names.is_empty() {
            "none".to_string()
        } else {
            let mut shown: Vec<&str> = names.iter().take(PROMPT_NAME_LIMIT).map(String::as_str).collect();
            if names.len() > PROMPT_NAME_LIMIT {
                shown.push("...");
            }
            shown.join(", ")
        }
    };
    let purposes: Vec<&str> = file.purposes.iter().map(|p| p.as_str()).collect();

    format!(
        "File: {}\nLanguage: {}\nLines: {}\nClasses: {}\nFunctions: {}\nImports: {}\nDetected purposes: {}",
        file.path,
        file.language.display_name(),
        file.line_count,
        list(&file.classes),
        list(&file.functions),
        list(&file.imports),
        purposes.join(", ")
    )
}

fn truncate_for_error(value: &str) -> String {
    const LIMIT: usize = 400;
    if value.len() <= LIMIT {
        value.to_string()
    } else {
        let mut end = LIMIT;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &value[..end])
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatMessageResponse {
    content: ChatContent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatContentPart>),
}

impl ChatContent {
    fn into_text(self) -> Option<String> {
        let text = match self {
            ChatContent::Text(text) => text.trim().to_string(),
            ChatContent::Parts(parts) => parts
                .into_iter()
                .filter_map(|p| p.text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChatContentPart {
    #[serde(default)]
    text: Option<String>,
}
