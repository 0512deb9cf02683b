//! The database handle: file lifecycle, raw execute/query primitives and
//! the derived catalog views.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::columns::Columns;
use crate::error::{Error, Result};
use crate::records::Records;
use crate::stmt;
use crate::tables::Tables;
use crate::types::FetchMode;
use crate::value::Value;

/// Handle to one SQLite database file.
///
/// The handle owns nothing but the path; every operation opens a
/// connection scoped to that one call and releases it on return. The
/// three managers returned by [`tables`](Database::tables),
/// [`columns`](Database::columns) and [`records`](Database::records)
/// borrow the handle, so all components always target the same file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create a new database file at `path` and bind it.
    ///
    /// Fails with [`Error::DatabaseExists`] if a file is already there.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            return Err(Error::DatabaseExists(path));
        }
        let db = Self { path };
        db.touch()?;
        Ok(db)
    }

    /// Bind to the database file at `path`, creating it if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Self {
            path: path.as_ref().to_path_buf(),
        };
        db.touch()?;
        Ok(db)
    }

    /// Delete the database file at `path`.
    ///
    /// Fails with [`Error::NoSuchDatabase`] if there is no such file. The
    /// caller must make sure no open connection still references it.
    pub fn drop_database(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NoSuchDatabase(path.to_path_buf()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Drop and recreate the current database file, discarding every
    /// table in it.
    pub fn clear(&self) -> Result<()> {
        Self::drop_database(&self.path)?;
        self.touch()
    }

    /// The file this handle is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    // Force the engine to materialize the file on disk.
    fn touch(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.query_row("PRAGMA user_version", [], |_| Ok(()))?;
        Ok(())
    }

    /// Run a single mutating statement inside the engine's implicit
    /// per-statement transaction, returning the number of affected rows.
    ///
    /// Not for reads; a statement that returns rows fails here. Use
    /// [`query`](Database::query) for those.
    pub fn execute(&self, sql: &str) -> Result<usize> {
        let conn = self.connect()?;
        Ok(conn.execute(sql, [])?)
    }

    /// Run a single read statement and return the full row sequence.
    pub fn query(&self, sql: &str) -> Result<Vec<Vec<Value>>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let width = stmt.column_count();
        let rows = stmt.query_map([], |row| {
            let mut out = Vec::with_capacity(width);
            for i in 0..width {
                out.push(row.get::<_, Value>(i)?);
            }
            Ok(out)
        })?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Fetch rows from `table` according to `mode`.
    pub fn fetch(&self, table: &str, mode: FetchMode) -> Result<Vec<Vec<Value>>> {
        stmt::check_identifier(table)?;
        if !self.has_table(table)? {
            return Err(Error::NoSuchTable(table.to_string()));
        }
        let rows = self.query(&format!("SELECT * FROM {table}"))?;
        let keep = match mode {
            FetchMode::All => rows.len(),
            FetchMode::First => 1,
            FetchMode::Limit(n) => n,
        };
        Ok(rows.into_iter().take(keep).collect())
    }

    /// The names of all tables in the current database, recomputed from
    /// the engine catalog on every call.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut names = Vec::new();
        for name in rows {
            names.push(name?);
        }
        Ok(names)
    }

    /// Table name → ordered column names, recomputed from the catalog on
    /// every call. Nothing is cached, so the view never goes stale.
    pub fn schema(&self) -> Result<HashMap<String, Vec<String>>> {
        let mut schema = HashMap::new();
        for table in self.table_names()? {
            let fields = self.columns().fields(&table)?;
            schema.insert(table, fields);
        }
        Ok(schema)
    }

    pub(crate) fn has_table(&self, table: &str) -> Result<bool> {
        Ok(self.table_names()?.iter().any(|t| t == table))
    }

    /// Table operations on this database.
    pub fn tables(&self) -> Tables<'_> {
        Tables::new(self)
    }

    /// Column operations on this database.
    pub fn columns(&self) -> Columns<'_> {
        Columns::new(self)
    }

    /// Record operations on this database.
    pub fn records(&self) -> Records<'_> {
        Records::new(self)
    }
}
