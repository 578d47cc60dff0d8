use std::sync::Arc;
use std::time;

use dbask::app::ask_schema;
use dbask::backend::auth::{ACCESS_TOKEN_ENV, CREDENTIALS_ENV};
use dbask::backend::{ArcBackend, ServiceAccountKey, VertexAi};
use dbask::cli::Command;
use dbask::config::constants::DEFAULT_MODEL;
use dbask::config::init_logger;
use eyre::{Context, Result, bail};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    let config = cmd.get_config()?;
    init_logger(&config.log)?;

    let question = cmd.question();
    if question.is_empty() {
        bail!("no question given");
    }

    let schema_path = cmd
        .schema()
        .ok_or_else(|| eyre::eyre!("--schema is required"))?;

    let raw_credentials = std::env::var(CREDENTIALS_ENV).unwrap_or_default();
    let key = ServiceAccountKey::from_json(&raw_credentials)
        .wrap_err(format!("loading credentials from ${}", CREDENTIALS_ENV))?;

    let model = cmd
        .model()
        .or(config.vertex.model.as_deref())
        .unwrap_or(DEFAULT_MODEL);

    let mut vertex = VertexAi::new(&key, model)?.with_location(&config.vertex.location);
    if let Some(endpoint) = &config.vertex.endpoint {
        vertex = vertex.with_endpoint(endpoint);
    }
    if let Some(token) = std::env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.is_empty()) {
        vertex = vertex.with_access_token(&token);
    }
    if let Some(timeout_secs) = config.vertex.timeout_secs {
        vertex = vertex.with_timeout(time::Duration::from_secs(timeout_secs as u64));
    }

    log::debug!("Asking {} with schema {}", model, schema_path);

    let backend: ArcBackend = Arc::new(vertex);

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let answer = ask_schema(
        backend,
        &config,
        schema_path,
        &question,
        cmd.prompt_kind(),
        cancel,
    )
    .await?;

    println!("{}", answer);
    Ok(())
}
