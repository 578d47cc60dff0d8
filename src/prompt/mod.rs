#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;

pub const DEFAULT_QUOTE_START: &str = "```sql";
pub const DEFAULT_QUOTE_END: &str = "```";

/// Which of the two fixed prompt templates to render. This is not a general
/// templating engine, the texts are baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptKind {
    /// Free-form question about the schema.
    #[default]
    Question,
    /// The question describes a query the model should write.
    QueryExplanation,
}

/// Render-time inputs for one prompt. Substitution is textual and exact, the
/// DDL is not escaped: if it happens to contain the quote delimiter the
/// rendered prompt is ambiguous. Callers own that edge.
#[derive(Debug, Clone)]
pub struct PromptContext {
    database_version: String,
    quote_start: String,
    quote_end: String,
    ddl: String,
    question: String,
}

impl Default for PromptContext {
    fn default() -> Self {
        Self {
            database_version: String::new(),
            quote_start: DEFAULT_QUOTE_START.to_string(),
            quote_end: DEFAULT_QUOTE_END.to_string(),
            ddl: String::new(),
            question: String::new(),
        }
    }
}

impl PromptContext {
    pub fn new(ddl: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            ddl: ddl.into(),
            question: question.into(),
            ..Self::default()
        }
    }

    pub fn with_database_version(mut self, version: impl Into<String>) -> Self {
        self.database_version = version.into();
        self
    }

    pub fn with_quotes(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.quote_start = start.into();
        self.quote_end = end.into();
        self
    }

    pub fn render(&self, kind: PromptKind) -> String {
        match kind {
            PromptKind::Question => format!(
                r#"Answer the questions in the Question assuming the following DDL.
{version}

## DDL ( Data Definition Language )

{quote_start}
{ddl}
{quote_end}

## Question
{question}
"#,
                version = self.database_version,
                quote_start = self.quote_start,
                ddl = self.ddl,
                quote_end = self.quote_end,
                question = self.question,
            ),
            PromptKind::QueryExplanation => format!(
                r#"Answer the SQL query in the "Explanation of the query to be created" section, assuming the database was created with the following DDL.
{version}

## DDL ( Data Definition Language )

{quote_start}
{ddl}
{quote_end}

## Explanation of the query to be created
{question}
"#,
                version = self.database_version,
                quote_start = self.quote_start,
                ddl = self.ddl,
                quote_end = self.quote_end,
                question = self.question,
            ),
        }
    }
}
