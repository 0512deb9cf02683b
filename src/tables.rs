//! Table creation, dropping and renaming.

use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::stmt::{self, ColumnDecl};
use crate::types::{normalize_type, Field};

/// Declarative description of a table to create.
///
/// Field order is preserved in the generated statement; an explicit
/// primary key is always emitted first. With neither `primary_key` nor
/// `without_auto_id`, a leading `id INTEGER NOT NULL PRIMARY KEY` column
/// is synthesized.
///
/// ```no_run
/// # use lite::{Database, TableSpec};
/// # fn demo(db: &Database) -> lite::Result<()> {
/// let spec = TableSpec::new(["name", "email"])
///     .field(("age", "INTEGER"))
///     .nullable(["email"]);
/// db.tables().create("employer", &spec)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    fields: Vec<Field>,
    no_auto_id: bool,
    primary_key: Option<String>,
    nullable: Vec<String>,
    uniques: Vec<String>,
}

impl TableSpec {
    pub fn new<F: Into<Field>>(fields: impl IntoIterator<Item = F>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append one more field.
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Use `column` as the primary key instead of a synthesized `id`.
    ///
    /// The column takes its declared type from the field list if present
    /// there, and defaults to INTEGER otherwise.
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    /// Let the named fields accept NULL values (all others are NOT NULL).
    pub fn nullable<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.nullable = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Emit one composite UNIQUE constraint across the named fields.
    pub fn unique<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.uniques = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Do not synthesize the `id` primary-key column.
    pub fn without_auto_id(mut self) -> Self {
        self.no_auto_id = true;
        self
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

/// Table operations, borrowed from a [`Database`].
pub struct Tables<'db> {
    db: &'db Database,
}

impl<'db> Tables<'db> {
    pub(crate) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Create `table` from `spec`.
    ///
    /// Fails if the table already exists, if a `nullable`/`unique` entry
    /// names an undefined field, if a declared type is not a recognized
    /// general type or affinity synonym, or if any name falls outside
    /// the identifier allow-list.
    pub fn create(&self, table: &str, spec: &TableSpec) -> Result<()> {
        stmt::check_identifier(table)?;
        if self.db.has_table(table)? {
            return Err(Error::TableExists(table.to_string()));
        }
        for name in &spec.uniques {
            if !spec.has_field(name) {
                return Err(Error::UndefinedField {
                    field: name.clone(),
                    context: "UNIQUE constraint on an undefined field",
                });
            }
        }
        for name in &spec.nullable {
            if !spec.has_field(name) {
                return Err(Error::UndefinedField {
                    field: name.clone(),
                    context: "NULL permission for an undefined field",
                });
            }
        }

        let mut columns = Vec::with_capacity(spec.fields.len());
        for field in &spec.fields {
            stmt::check_identifier(&field.name)?;
            if columns.iter().any(|c: &ColumnDecl| c.name == field.name) {
                return Err(Error::ColumnExists {
                    table: table.to_string(),
                    column: field.name.clone(),
                });
            }
            let is_pk = spec.primary_key.as_deref() == Some(field.name.as_str());
            let decl = match &field.decl {
                Some(decl) => normalize_type(decl)?,
                None if is_pk => "INTEGER".to_string(),
                None => "TEXT".to_string(),
            };
            columns.push(ColumnDecl {
                name: field.name.clone(),
                decl,
                not_null: !spec.nullable.contains(&field.name),
                primary_key: false,
                unique: false,
            });
        }

        // The primary key always leads the column list.
        let mut ordered = Vec::with_capacity(columns.len() + 1);
        if let Some(pk) = &spec.primary_key {
            stmt::check_identifier(pk)?;
            let decl = match columns.iter().position(|c| c.name == *pk) {
                Some(i) => columns.remove(i).decl,
                None => "INTEGER".to_string(),
            };
            ordered.push(ColumnDecl {
                name: pk.clone(),
                decl,
                not_null: true,
                primary_key: true,
                unique: false,
            });
        } else if !spec.no_auto_id {
            ordered.push(ColumnDecl {
                name: "id".to_string(),
                decl: "INTEGER".to_string(),
                not_null: true,
                primary_key: true,
                unique: false,
            });
        }
        ordered.extend(columns);

        self.db
            .execute(&stmt::create_table(table, &ordered, &spec.uniques))?;
        Ok(())
    }

    /// Drop `table`. Fails with [`Error::NoSuchTable`] if it is absent.
    pub fn drop(&self, table: &str) -> Result<()> {
        stmt::check_identifier(table)?;
        if !self.db.has_table(table)? {
            return Err(Error::NoSuchTable(table.to_string()));
        }
        self.db.execute(&stmt::drop_table(table))?;
        Ok(())
    }

    /// Rename `old` to `new`. Fails if `old` is absent or `new` is taken.
    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        stmt::check_identifier(old)?;
        stmt::check_identifier(new)?;
        let tables = self.db.table_names()?;
        if !tables.iter().any(|t| t == old) {
            return Err(Error::NoSuchTable(old.to_string()));
        }
        if tables.iter().any(|t| t == new) {
            return Err(Error::TableExists(new.to_string()));
        }
        self.db.execute(&stmt::rename_table(old, new))?;
        Ok(())
    }
}
