pub mod auth;
pub mod vertex;

pub use auth::{CredentialsError, ServiceAccountKey};
pub use vertex::VertexAi;

#[cfg(test)]
use mockall::{automock, predicate::*};

use crate::models::Message;
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait Backend {
    fn name(&self) -> &str;
    /// Sends the last message as the new turn with everything before it as
    /// prior-turn history, and returns the extracted answer text. The token
    /// aborts the in-flight call; a cancelled call never yields a partial
    /// answer.
    async fn ask(&self, messages: Vec<Message>, cancel: CancellationToken) -> Result<String>;
}

pub type ArcBackend = Arc<dyn Backend + Send + Sync>;
