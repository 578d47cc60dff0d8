#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use eyre::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::backend::ArcBackend;
use crate::config::Configuration;
use crate::ddl::approximate_ddl;
use crate::models::{Message, Schema};
use crate::prompt::{PromptContext, PromptKind};

/// Loads the schema, renders the prompt and asks the backend. The rendered
/// prompt becomes the final entry of the message list; a one-shot run has no
/// prior history.
pub async fn ask_schema(
    backend: ArcBackend,
    config: &Configuration,
    schema_path: &str,
    question: &str,
    kind: PromptKind,
    cancel: CancellationToken,
) -> Result<String> {
    let raw = tokio::fs::read_to_string(schema_path)
        .await
        .wrap_err(format!("reading schema {}", schema_path))?;
    let schema: Schema = serde_json::from_str(&raw).wrap_err("parsing schema")?;

    log::debug!("Loaded schema with {} tables", schema.tables.len());

    let ddl = approximate_ddl(&schema);
    let prompt = PromptContext::new(ddl, question)
        .with_database_version(config.prompt.database_version.clone().unwrap_or_default())
        .with_quotes(&config.prompt.quote_start, &config.prompt.quote_end)
        .render(kind);

    let messages = vec![Message::new_user(prompt)];
    backend.ask(messages, cancel).await
}
