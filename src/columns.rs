//! Column operations: add, remove, catalog introspection and the
//! rebuild-based alterations SQLite has no in-place ALTER for.
//!
//! Column removal, primary-key promotion and UNIQUE promotion all go
//! through a rebuild sequence (rename/drop the original, create the new
//! shape, copy the rows back). Each sequence runs inside one explicit
//! transaction on a single scoped connection, so a failing step rolls
//! the table back to its pre-operation state instead of leaving it half
//! migrated.

use rusqlite::params_from_iter;
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::stmt::{self, ColumnDecl};
use crate::types::normalize_type;

/// Options for [`Columns::add`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOpts {
    /// Declared type of the new column.
    pub decl: String,
    /// Whether the column accepts NULL values.
    pub nullable: bool,
    /// Whether the column carries a UNIQUE constraint.
    pub unique: bool,
}

impl Default for ColumnOpts {
    fn default() -> Self {
        Self {
            decl: "TEXT".to_string(),
            nullable: false,
            unique: false,
        }
    }
}

/// One row of `pragma_table_info`.
#[derive(Debug, Clone)]
pub(crate) struct ColumnInfo {
    pub(crate) name: String,
    pub(crate) decl: String,
    pub(crate) not_null: bool,
    pub(crate) primary_key: bool,
}

impl ColumnInfo {
    fn into_decl(self) -> ColumnDecl {
        ColumnDecl {
            name: self.name,
            decl: self.decl,
            not_null: self.not_null,
            primary_key: self.primary_key,
            unique: false,
        }
    }
}

/// Column operations, borrowed from a [`Database`].
pub struct Columns<'db> {
    db: &'db Database,
}

impl<'db> Columns<'db> {
    pub(crate) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Append a new column to `table`.
    ///
    /// Fails if the table is absent or the column already present. The
    /// engine itself rejects some shapes of ADD COLUMN (a NOT NULL
    /// column without a default, a UNIQUE column); those surface as
    /// [`Error::Sqlite`].
    pub fn add(&self, table: &str, column: &str, opts: &ColumnOpts) -> Result<()> {
        stmt::check_identifier(table)?;
        stmt::check_identifier(column)?;
        if !self.db.has_table(table)? {
            return Err(Error::NoSuchTable(table.to_string()));
        }
        if self.fields(table)?.iter().any(|f| f == column) {
            return Err(Error::ColumnExists {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
        let decl = normalize_type(&opts.decl)?;
        self.db
            .execute(&stmt::add_column(table, column, &decl, opts.nullable, opts.unique))?;
        Ok(())
    }

    /// Remove `column` from `table`.
    ///
    /// Removing the only remaining column drops the whole table. For any
    /// other column the table is rebuilt: the rows are read projected
    /// over the surviving columns first, and only then is the table
    /// dropped, recreated (surviving declared types, nullability and
    /// primary-key status preserved) and refilled, all inside one
    /// transaction.
    pub fn remove(&self, table: &str, column: &str) -> Result<()> {
        stmt::check_identifier(table)?;
        stmt::check_identifier(column)?;
        let info = self.table_info(table)?;
        if !info.iter().any(|c| c.name == column) {
            return Err(Error::NoSuchColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
        if info.len() == 1 {
            return self.db.tables().drop(table);
        }

        let survivors: Vec<ColumnInfo> = info.into_iter().filter(|c| c.name != column).collect();
        let names: Vec<&str> = survivors.iter().map(|c| c.name.as_str()).collect();
        let projection = names.join(", ");

        // Destructive steps only run once the projection read succeeded.
        let rows = self.db.query(&format!("SELECT {projection} FROM {table}"))?;

        let decls: Vec<ColumnDecl> = survivors.into_iter().map(ColumnInfo::into_decl).collect();
        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;
        tx.execute(&stmt::drop_table(table), [])?;
        tx.execute(&stmt::create_table(table, &decls, &[]), [])?;
        {
            let mut insert = tx.prepare(&stmt::insert(table, decls.len()))?;
            for row in &rows {
                insert.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Column names of `table` in catalog order.
    ///
    /// Fails with [`Error::NoSuchTable`] if the table is absent.
    pub fn fields(&self, table: &str) -> Result<Vec<String>> {
        Ok(self.table_info(table)?.into_iter().map(|c| c.name).collect())
    }

    /// `(name, declared type)` pairs of `table` in catalog order.
    pub fn fields_with_types(&self, table: &str) -> Result<Vec<(String, String)>> {
        Ok(self
            .table_info(table)?
            .into_iter()
            .map(|c| (c.name, c.decl))
            .collect())
    }

    /// Promote `column` to the primary key of `table`, creating it fresh
    /// if it does not exist yet.
    ///
    /// When the column already exists its values are carried over into
    /// the new primary-key position; otherwise the engine's implicit
    /// ROWID provides the values. The table is rebuilt (rename to
    /// `old_<table>`, create the new shape with the key first, copy the
    /// rows, drop the temporary table) inside one transaction; a failing
    /// copy rolls everything back to the pre-operation state. Foreign-key
    /// enforcement is switched off on the rebuild connection, which is
    /// discarded afterwards.
    pub fn primary_key(&self, table: &str, column: &str, decl: &str) -> Result<()> {
        stmt::check_identifier(table)?;
        stmt::check_identifier(column)?;
        let decl = normalize_type(decl)?;
        let info = self.table_info(table)?;

        let source = if info.iter().any(|c| c.name == column) {
            column
        } else {
            "ROWID"
        };
        let others: Vec<ColumnInfo> = info.into_iter().filter(|c| c.name != column).collect();

        let tmp = format!("old_{table}");
        if self.db.has_table(&tmp)? {
            return Err(Error::TableExists(tmp));
        }

        let mut columns = vec![ColumnDecl {
            name: column.to_string(),
            decl,
            not_null: true,
            primary_key: true,
            unique: false,
        }];
        columns.extend(others.iter().map(|c| ColumnDecl {
            name: c.name.clone(),
            decl: c.decl.clone(),
            not_null: true,
            primary_key: false,
            unique: false,
        }));
        let mut projection = vec![source];
        projection.extend(others.iter().map(|c| c.name.as_str()));
        let projection = projection.join(", ");

        let mut conn = self.db.connect()?;
        conn.execute_batch("PRAGMA foreign_keys=off;")?;
        let tx = conn.transaction()?;
        tx.execute(&stmt::rename_table(table, &tmp), [])?;
        tx.execute(&stmt::create_table(table, &columns, &[]), [])?;
        tx.execute(&stmt::copy_rows(table, &projection, &tmp), [])?;
        tx.execute(&stmt::drop_table(&tmp), [])?;
        tx.commit()?;
        Ok(())
    }

    /// Add a UNIQUE constraint to an existing column via the same
    /// rebuild sequence as [`primary_key`](Columns::primary_key).
    pub fn unique(&self, table: &str, column: &str) -> Result<()> {
        stmt::check_identifier(table)?;
        stmt::check_identifier(column)?;
        let info = self.table_info(table)?;
        if !info.iter().any(|c| c.name == column) {
            return Err(Error::NoSuchColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }

        let tmp = format!("old_{table}");
        if self.db.has_table(&tmp)? {
            return Err(Error::TableExists(tmp));
        }

        let names: Vec<&str> = info.iter().map(|c| c.name.as_str()).collect();
        let projection = names.join(", ");
        let columns: Vec<ColumnDecl> = info
            .into_iter()
            .map(|c| {
                let unique = c.name == column;
                let mut decl = c.into_decl();
                decl.unique = unique;
                decl
            })
            .collect();

        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;
        tx.execute(&stmt::rename_table(table, &tmp), [])?;
        tx.execute(&stmt::create_table(table, &columns, &[]), [])?;
        tx.execute(&stmt::copy_rows(table, &projection, &tmp), [])?;
        tx.execute(&stmt::drop_table(&tmp), [])?;
        tx.commit()?;
        Ok(())
    }

    pub(crate) fn table_info(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        stmt::check_identifier(table)?;
        if !self.db.has_table(table)? {
            return Err(Error::NoSuchTable(table.to_string()));
        }
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&stmt::table_info(table))?;
        let rows = stmt.query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                decl: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                primary_key: row.get::<_, i64>(3)? != 0,
            })
        })?;
        let mut info = Vec::new();
        for column in rows {
            info.push(column?);
        }
        Ok(info)
    }
}
