use serde::{Deserialize, Serialize};

/// Introspected database structure, usually loaded from a `schema.json`
/// produced by an external introspection tool. This crate only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,

    /// Table kind as reported by the database, e.g. "BASE TABLE" or "VIEW".
    #[serde(default, rename = "type")]
    pub table_type: String,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default)]
    pub indexes: Vec<Index>,

    #[serde(default)]
    pub constraints: Vec<Constraint>,

    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default)]
    pub name: Option<String>,

    /// Preformatted index definition, emitted verbatim.
    pub def: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(default)]
    pub name: Option<String>,

    /// Constraint kind as reported by the database. Matched literally
    /// against "PRIMARY KEY" and "UNIQUE KEY".
    #[serde(default, rename = "type")]
    pub constraint_type: String,

    /// Preformatted constraint definition, emitted verbatim.
    pub def: String,
}

impl Table {
    pub fn is_view(&self) -> bool {
        self.table_type == "VIEW"
    }
}

impl Constraint {
    /// Primary and unique keys are already expressed through columns and
    /// indexes, they are never repeated as CONSTRAINT entries.
    pub fn is_key(&self) -> bool {
        matches!(self.constraint_type.as_str(), "PRIMARY KEY" | "UNIQUE KEY")
    }
}
