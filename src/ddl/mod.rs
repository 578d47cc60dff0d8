#[cfg(test)]
#[path = "ddl_test.rs"]
mod tests;

use crate::models::Schema;

/// Renders a rough DDL rendition of the schema, one CREATE TABLE statement
/// per base table in schema order. Views are skipped. The output is meant to
/// give a language model enough structure to reason about, it is not
/// guaranteed to round-trip through a SQL parser.
pub fn approximate_ddl(schema: &Schema) -> String {
    let mut ddl = String::new();
    for table in &schema.tables {
        if table.is_view() {
            continue;
        }

        ddl.push_str(&format!("CREATE TABLE {} (\n", table.name));

        let mut entries: Vec<String> = vec![];
        for column in &table.columns {
            let mut entry = format!("  {} {}", column.name, column.column_type);
            if let Some(default) = column.default.as_deref().filter(|d| !d.is_empty()) {
                entry.push_str(&format!(" DEFAULT {}", default));
            }
            // Nullability is never omitted.
            entry.push_str(if column.nullable { " NULL" } else { " NOT NULL" });
            if let Some(comment) = column.comment.as_deref().filter(|c| !c.is_empty()) {
                entry.push_str(&format!(" COMMENT {:?}", comment));
            }
            entries.push(entry);
        }

        for index in &table.indexes {
            entries.push(format!("  {}", index.def));
        }

        for constraint in &table.constraints {
            if constraint.is_key() {
                continue;
            }
            entries.push(format!("  CONSTRAINT {}", constraint.def));
        }

        ddl.push_str(&format!("{}\n", entries.join(",\n")));
        ddl.push_str(&format!(") COMMENT = {:?};\n\n", table.comment));
    }
    ddl
}
