//! Error types for the lite convenience layer.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in this crate.
///
/// Callers never see a panic out of library code: precondition violations
/// (missing tables, name collisions), validation failures (unsupported
/// declared types, undefined fields) and engine-level failures all come
/// back as one of these variants.
#[derive(Error, Debug)]
pub enum Error {
    #[error("database already exists: {}", .0.display())]
    DatabaseExists(PathBuf),

    #[error("no such database: {}", .0.display())]
    NoSuchDatabase(PathBuf),

    #[error("table \"{0}\" already exists")]
    TableExists(String),

    #[error("no such table: \"{0}\"")]
    NoSuchTable(String),

    #[error("column \"{column}\" already exists in table \"{table}\"")]
    ColumnExists { table: String, column: String },

    #[error("no such column \"{column}\" in table \"{table}\"")]
    NoSuchColumn { table: String, column: String },

    #[error("unsupported declared type: \"{0}\"")]
    UnsupportedType(String),

    #[error("\"{field}\" is not a defined field ({context})")]
    UndefinedField {
        field: String,
        context: &'static str,
    },

    #[error("invalid identifier: \"{0}\"")]
    InvalidIdentifier(String),

    #[error("invalid fetch mode: \"{0}\" (expected \"*\", \"1\" or a row count)")]
    InvalidFetchMode(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
