use clap::Parser;
use eyre::{Context, Result};

use crate::config::{self, Configuration, load_configuration, lookup_config_path};
use crate::prompt::PromptKind;

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"Ask questions about your database schema, answered by Vertex AI.

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/dbask/config.toml
    * $HOME/.config/dbask/config.toml
    * $HOME/.dbask.toml

Credentials are read from $GOOGLE_APPLICATION_CREDENTIALS_JSON, the bearer
token from $GOOGLE_ACCESS_TOKEN.
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Schema JSON file produced by a schema introspection tool
    #[arg(short, long, value_name = "PATH")]
    schema: Option<String>,

    /// Model to ask, overrides the configuration file
    #[arg(short, long, value_name = "MODEL")]
    model: Option<String>,

    /// Treat the question as a description of the query to be created
    #[arg(short, long)]
    query: bool,

    /// Show the version
    #[arg(short, long)]
    version: bool,

    /// The question to ask
    #[arg(value_name = "QUESTION")]
    question: Vec<String>,
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        if config_path.is_empty() {
            // No config path is specified just use the default config
            return Ok(Configuration::default());
        }
        Ok(load_configuration(config_path.as_str()).wrap_err("loading configuration")?)
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn question(&self) -> String {
        self.question.join(" ")
    }

    pub fn prompt_kind(&self) -> PromptKind {
        if self.query {
            PromptKind::QueryExplanation
        } else {
            PromptKind::Question
        }
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }
}
