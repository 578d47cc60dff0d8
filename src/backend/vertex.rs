#[cfg(test)]
#[path = "vertex_test.rs"]
mod tests;

use std::{fmt::Display, time};

use async_trait::async_trait;
use eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::backend::Backend;
use crate::backend::auth::{CredentialsError, ServiceAccountKey};
use crate::config::user_agent;
use crate::models::{Message, Role};

pub const DEFAULT_LOCATION: &str = "us-central1";

/// Vertex AI chat backend. The handle (HTTP client plus resolved project
/// identity) is built once and reused, sessions are created per call.
#[derive(Debug)]
pub struct VertexAi {
    alias: String,
    endpoint: String,
    project_id: String,
    location: String,
    model: String,
    access_token: Option<String>,
    timeout: Option<time::Duration>,

    client: reqwest::Client,
}

impl VertexAi {
    /// Resolves the project identity from the service account key. Fails when
    /// the key carries no usable project ID; this is fatal and never retried.
    pub fn new(key: &ServiceAccountKey, model: &str) -> Result<Self, CredentialsError> {
        let project_id = key.project_id()?.to_string();
        Ok(VertexAi {
            alias: "VertexAI".to_string(),
            endpoint: regional_endpoint(DEFAULT_LOCATION),
            project_id,
            location: DEFAULT_LOCATION.to_string(),
            model: model.to_string(),
            access_token: None,
            timeout: None,
            client: reqwest::Client::new(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self.endpoint = regional_endpoint(location);
        self
    }

    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = alias.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn start_chat(&self) -> ChatSession<'_> {
        ChatSession {
            backend: self,
            history: Vec::new(),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.endpoint, self.project_id, self.location, self.model
        )
    }
}

#[async_trait]
impl Backend for VertexAi {
    fn name(&self) -> &str {
        &self.alias
    }

    async fn ask(&self, messages: Vec<Message>, cancel: CancellationToken) -> Result<String> {
        // Everything before the last message becomes prior-turn history, the
        // last message is the turn to be answered. Callers guarantee at least
        // one message.
        let history = messages[..messages.len() - 1]
            .iter()
            .map(Content::from)
            .collect::<Vec<_>>();
        let last = &messages[messages.len() - 1];

        let chat = self.start_chat().with_history(history);
        let resp = chat
            .send_message(last.content(), &cancel)
            .await
            .wrap_err("vertex api error")?;

        Ok(extract_answer(&resp))
    }
}

/// One exchange against the model. Created per call and discarded, the remote
/// side keeps no state between sessions.
struct ChatSession<'a> {
    backend: &'a VertexAi,
    history: Vec<Content>,
}

impl ChatSession<'_> {
    fn with_history(mut self, history: Vec<Content>) -> Self {
        self.history = history;
        self
    }

    async fn send_message(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<GenerateContentResponse> {
        let mut contents = self.history.clone();
        contents.push(Content {
            role: provider_role(Role::User).to_string(),
            parts: vec![Part::text(text)],
        });

        let req = GenerateContentRequest { contents };
        let backend = self.backend;

        let mut builder = backend
            .client
            .post(backend.generate_url())
            .header("User-Agent", user_agent());

        if let Some(token) = &backend.access_token {
            builder = builder.bearer_auth(token);
        }

        if let Some(timeout) = backend.timeout {
            builder = builder.timeout(timeout);
        }

        log::trace!("Sending generate content request: {:?}", req);

        let round_trip = async {
            let resp = builder
                .json(&req)
                .send()
                .await
                .wrap_err("sending generate content request")?;

            if !resp.status().is_success() {
                let http_code = resp.status().as_u16();
                let err: ErrorResponse = resp.json().await.wrap_err("parsing error response")?;
                let mut err = err.error;
                err.http_code = http_code;
                return Err(err.into());
            }

            resp.json::<GenerateContentResponse>()
                .await
                .wrap_err("parsing generate content response")
        };

        tokio::select! {
            _ = cancel.cancelled() => bail!("request cancelled"),
            resp = round_trip => resp,
        }
    }
}

/// The remote protocol only knows two speakers. System instructions ride
/// along as user turns, assistant turns map to the model speaker.
fn provider_role(role: Role) -> &'static str {
    match role {
        Role::System | Role::User => "user",
        Role::Assistant => "model",
    }
}

/// Keeps the last populated part seen across every candidate. Earlier parts
/// of multi-part answers are dropped, callers relying on this backend get the
/// final part only. An empty response yields an empty answer, not an error.
fn extract_answer(resp: &GenerateContentResponse) -> String {
    let mut answer = String::new();
    for candidate in &resp.candidates {
        let Some(content) = &candidate.content else {
            continue;
        };
        for part in &content.parts {
            if let Some(text) = &part.text {
                answer = text.clone();
            }
        }
    }
    answer
}

impl From<&Message> for Content {
    fn from(value: &Message) -> Self {
        Content {
            role: provider_role(value.role()).to_string(),
            parts: vec![Part::text(value.content())],
        }
    }
}

fn regional_endpoint(location: &str) -> String {
    format!("https://{}-aiplatform.googleapis.com", location)
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: VertexError,
}

#[derive(Default, Error, Debug, Serialize, Deserialize)]
pub struct VertexError {
    #[serde(skip)]
    pub http_code: u16,
    pub message: String,
    pub code: Option<u16>,
    pub status: Option<String>,
}

impl Display for VertexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vertex AI error ({}): {}", self.http_code, self.message)
    }
}
