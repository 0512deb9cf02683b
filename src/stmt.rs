//! Centralized SQL statement building.
//!
//! Every identifier a caller supplies passes through [`check_identifier`]
//! before it is interpolated into a statement, and every generated
//! statement is rendered here so the emitted SQL surface stays in one
//! place.

use crate::error::{Error, Result};

/// Validate a caller-supplied table or column name against the
/// identifier allow-list (`[A-Za-z_][A-Za-z0-9_]*`).
pub(crate) fn check_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(name.to_string()))
    }
}

/// One column of a table being rendered into a CREATE TABLE statement.
/// The declared type has already been validated (or came straight from
/// the engine catalog).
#[derive(Debug, Clone)]
pub(crate) struct ColumnDecl {
    pub name: String,
    pub decl: String,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
}

fn render_column(column: &ColumnDecl) -> String {
    let null = if column.primary_key || column.not_null {
        "NOT NULL"
    } else {
        "NULL"
    };
    let mut out = format!("{} {} {}", column.name, column.decl, null);
    if column.primary_key {
        out.push_str(" PRIMARY KEY");
    }
    if column.unique {
        out.push_str(" UNIQUE");
    }
    out
}

/// Render a CREATE TABLE statement from an already-resolved column list
/// plus an optional composite UNIQUE constraint.
pub(crate) fn create_table(table: &str, columns: &[ColumnDecl], uniques: &[String]) -> String {
    let mut body: Vec<String> = columns
        .iter()
        .map(|c| format!("\n   {}", render_column(c)))
        .collect();
    if !uniques.is_empty() {
        body.push(format!("\n   UNIQUE({})", uniques.join(",")));
    }
    format!("CREATE TABLE {table} ({}\n);", body.join(","))
}

pub(crate) fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {table}")
}

pub(crate) fn rename_table(old: &str, new: &str) -> String {
    format!("ALTER TABLE {old} RENAME TO {new};")
}

pub(crate) fn add_column(
    table: &str,
    column: &str,
    decl: &str,
    nullable: bool,
    unique: bool,
) -> String {
    let mut out = format!("ALTER TABLE {table} ADD COLUMN \"{column}\" {decl}");
    out.push_str(if nullable { " NULL" } else { " NOT NULL" });
    out.push_str(if unique { " UNIQUE;" } else { ";" });
    out
}

/// Parameterized INSERT with one placeholder per value.
pub(crate) fn insert(table: &str, width: usize) -> String {
    let placeholders = vec!["?"; width].join(",");
    format!("INSERT INTO {table} VALUES ({placeholders})")
}

/// Parameterized INSERT targeting an explicit column list, used when an
/// identity column is left out so the engine can autofill it.
pub(crate) fn insert_into(table: &str, columns: &[&str], width: usize) -> String {
    let placeholders = vec!["?"; width].join(",");
    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        columns.join(", ")
    )
}

pub(crate) fn delete(table: &str, where_clause: Option<&str>) -> String {
    match where_clause {
        Some(clause) => format!("DELETE FROM {table} WHERE {}", strip_where(clause)),
        None => format!("DELETE FROM {table}"),
    }
}

/// Copy rows between tables with an explicit projection, used by the
/// rebuild sequences.
pub(crate) fn copy_rows(target: &str, projection: &str, source: &str) -> String {
    format!("INSERT INTO {target} SELECT {projection} FROM {source};")
}

/// Catalog introspection over `pragma_table_info`.
pub(crate) fn table_info(table: &str) -> String {
    format!("SELECT name, type, \"notnull\", pk FROM pragma_table_info('{table}');")
}

/// A caller-supplied WHERE clause may carry the keyword itself; strip it
/// so a canonical `WHERE ` can be re-prepended.
fn strip_where(clause: &str) -> &str {
    let trimmed = clause.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 5
        && bytes[..5].eq_ignore_ascii_case(b"where")
        && bytes.get(5).map_or(true, |b| b.is_ascii_whitespace())
    {
        trimmed[5..].trim_start()
    } else {
        trimmed
    }
}
