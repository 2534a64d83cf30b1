//! Chat-completion client that writes a short text about a country
//!
//! One request per call: no retries, no caching. The credential is read from
//! the [`SecretStore`] each time and only ever placed in the request header.

use crate::config::NarrativeConfig;
use crate::error::NarrativeError;
use crate::secrets::SecretStore;
use crate::types::Narrative;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MODEL: &str = "gpt-3.5-turbo";
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.5;

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
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
    content: Option<String>,
}

pub fn user_prompt(country_name: &str) -> String {
    format!("Write something interesting about this country: {}.", country_name)
}

pub fn build_request(country_name: &str) -> ChatRequest {
    ChatRequest {
        model: MODEL.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt(country_name),
            },
        ],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

pub struct NarrativeClient {
    client: reqwest::Client,
    endpoint: String,
    secrets: SecretStore,
}

impl NarrativeClient {
    pub fn new(config: &NarrativeConfig) -> Result<Self, NarrativeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NarrativeError::Transport(e.to_string()))?;

        let secrets = SecretStore::new(&config.secrets_file);
        debug!("Narrative endpoint {}, credential from {:?}", config.endpoint, secrets.path());

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            secrets,
        })
    }

    pub async fn fetch_narrative(&self, country_name: &str) -> Result<Narrative, NarrativeError> {
        let api_key = self.secrets.api_key()?;
        let request = build_request(country_name);

        info!("Requesting narrative for {}", country_name);
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            warn!("Narrative request for {} failed with status {}", country_name, status);
            return Err(NarrativeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body).map(|text| Narrative { text })
    }
}

fn parse_completion(body: &str) -> Result<String, NarrativeError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| NarrativeError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| NarrativeError::MalformedResponse("response has no completion text".to_string()))
}
