#![forbid(unsafe_code)]

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

#[derive(Clone, Debug)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

#[derive(Debug)]
pub enum TextGenError {
    Http { status: u16, body: String },
    Transport(String),
    MalformedReply(&'static str),
}

impl std::fmt::Display for TextGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, body } => write!(f, "http {status}: {body}"),
            Self::Transport(message) => write!(f, "transport: {message}"),
            Self::MalformedReply(message) => write!(f, "malformed reply: {message}"),
        }
    }
}

impl std::error::Error for TextGenError {}

/// External text-generation collaborator. Implementations return one plain
/// completion string; callers must treat it as untrusted free text.
pub trait TextGenerator {
    fn complete(&self, request: &CompletionRequest) -> Result<String, TextGenError>;
}

/// OpenAI-compatible chat-completions client (OpenRouter by default).
pub struct OpenRouterClient {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(60))
            .build();
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            agent,
        }
    }
}

impl TextGenerator for OpenRouterClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, TextGenError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": request.model,
            "temperature": request.temperature,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
        });

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body)
            .map_err(|err| match err {
                ureq::Error::Status(status, response) => TextGenError::Http {
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => {
                    TextGenError::Transport(transport.to_string())
                }
            })?;

        let reply: serde_json::Value = response
            .into_json()
            .map_err(|_| TextGenError::MalformedReply("completion body is not json"))?;
        let content = reply
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or(TextGenError::MalformedReply("completion has no message content"))?;
        Ok(content.to_string())
    }
}
