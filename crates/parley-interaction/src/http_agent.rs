//! HTTP-backed providers over an OpenAI-compatible chat API.
//!
//! The LLM produces attendee reply text and enrichment profiles only;
//! progression assessments always come from the rule-based classifier so
//! funnel decisions stay deterministic and auditable.

use async_trait::async_trait;
use parley_core::enrichment::{EnrichmentInput, EnrichmentOutput, EnrichmentProvider};
use parley_core::error::{ParleyError, Result};
use parley_core::responder::{AttendeeTurn, PersonaResponder};
use parley_core::session::{MessageRole, Session};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::classifier::classify_turn;
use crate::prompts::{render_attendee_system, render_enrichment};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Shared configuration for the chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl ChatApiConfig {
    /// Creates a config with the provided API key and the default
    /// endpoint/model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Overrides the base URL (for self-hosted compatible endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

async fn send_chat(client: &Client, config: &ChatApiConfig, body: &ChatRequest) -> Result<String> {
    let url = format!("{}/chat/completions", config.base_url);

    let response = client
        .post(&url)
        .bearer_auth(&config.api_key)
        .json(body)
        .send()
        .await
        .map_err(|err| ParleyError::dependency(format!("Chat API request failed: {err}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(ParleyError::dependency(format!(
            "Chat API returned {status}: {body_text}"
        )));
    }

    let parsed: ChatResponse = response
        .json()
        .await
        .map_err(|err| ParleyError::dependency(format!("Failed to parse chat response: {err}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ParleyError::dependency("Chat API returned no content"))
}

/// Persona responder backed by an OpenAI-compatible chat endpoint.
pub struct HttpPersonaAgent {
    client: Client,
    config: ChatApiConfig,
}

impl HttpPersonaAgent {
    pub fn new(config: ChatApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn build_messages(&self, session: &Session, trainee_utterance: &str) -> Result<Vec<ChatMessage>> {
        let mut messages = vec![ChatMessage {
            role: "system".to_string(),
            content: render_attendee_system(session)?,
        }];

        for entry in &session.transcript {
            let role = match entry.role {
                MessageRole::Trainee => "user",
                MessageRole::Attendee => "assistant",
                // Feedback and other system notes are not conversation turns.
                MessageRole::System => continue,
            };
            messages.push(ChatMessage {
                role: role.to_string(),
                content: entry.text.clone(),
            });
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: trainee_utterance.to_string(),
        });
        Ok(messages)
    }
}

#[async_trait]
impl PersonaResponder for HttpPersonaAgent {
    async fn respond(&self, session: &Session, trainee_utterance: &str) -> Result<AttendeeTurn> {
        let assessment = classify_turn(session.current_state, trainee_utterance);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: self.build_messages(session, trainee_utterance)?,
        };
        let reply = send_chat(&self.client, &self.config, &request).await?;

        Ok(AttendeeTurn { reply, assessment })
    }
}

/// Enrichment provider backed by the same chat endpoint.
pub struct HttpEnrichmentProvider {
    client: Client,
    config: ChatApiConfig,
}

impl HttpEnrichmentProvider {
    pub fn new(config: ChatApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl EnrichmentProvider for HttpEnrichmentProvider {
    async fn enrich(&self, input: &EnrichmentInput) -> Result<EnrichmentOutput> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: render_enrichment(input)?,
            }],
        };
        let text = send_chat(&self.client, &self.config, &request).await?;

        Ok(EnrichmentOutput {
            text,
            provider: self.config.model.clone(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::session::{Difficulty, SessionKickoff};

    #[test]
    fn test_build_messages_maps_roles_and_skips_system_notes() {
        let agent = HttpPersonaAgent::new(ChatApiConfig::new("test-key"));
        let mut session = Session::start(SessionKickoff {
            persona_id: "persona-1".to_string(),
            conference_id: "conf-1".to_string(),
            difficulty: Difficulty::Medium,
            enrichment: None,
            trainee: None,
        });
        session.append_message(MessageRole::Trainee, "Hello!");
        session.append_message(MessageRole::Attendee, "Hi there.");
        session.append_message(MessageRole::System, "feedback note");

        let messages = agent.build_messages(&session, "What brings you here?").unwrap();

        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(messages.last().unwrap().content, "What brings you here?");
    }

    #[test]
    fn test_config_builders() {
        let config = ChatApiConfig::new("k")
            .with_base_url("http://localhost:8080/v1")
            .with_model("local-model");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model, "local-model");
    }
}
