//! Row insertion and deletion.

use rusqlite::params_from_iter;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::stmt;
use crate::value::Value;

/// Record operations, borrowed from a [`Database`].
pub struct Records<'db> {
    db: &'db Database,
}

impl<'db> Records<'db> {
    pub(crate) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Insert `record` into `table`, padding missing trailing fields
    /// with NULL.
    pub fn insert(&self, table: &str, record: &[Value]) -> Result<()> {
        self.insert_filled(table, record, &Value::Null)
    }

    /// Insert `record` into `table`, padding missing trailing fields
    /// with `filler` up to the table's column count.
    ///
    /// Values bind positionally, in the table's column order, excluding
    /// an auto-generated identity column: on a table with one the engine
    /// fills the identity itself and the record covers the remaining
    /// columns only. A record longer than that is rejected by the engine
    /// and comes back as [`Error::Sqlite`].
    pub fn insert_filled(&self, table: &str, record: &[Value], filler: &Value) -> Result<()> {
        stmt::check_identifier(table)?;
        let info = self.db.columns().table_info(table)?;

        // An INTEGER column that is the whole primary key aliases the
        // row identifier; the engine autofills it.
        let pks: Vec<&str> = info
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect();
        let identity: Option<&str> = match pks.as_slice() {
            [only] => info
                .iter()
                .find(|c| c.name == **only && c.decl.eq_ignore_ascii_case("INTEGER"))
                .map(|c| c.name.as_str()),
            _ => None,
        };

        let targets: Vec<&str> = info
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| Some(*name) != identity)
            .collect();
        let mut row = record.to_vec();
        while row.len() < targets.len() {
            row.push(filler.clone());
        }

        let sql = match identity {
            Some(_) => stmt::insert_into(table, &targets, row.len()),
            None => stmt::insert(table, row.len()),
        };
        let conn = self.db.connect()?;
        let mut insert = conn.prepare(&sql)?;
        insert.execute(params_from_iter(row.iter()))?;
        Ok(())
    }

    /// Delete rows from `table`, returning how many went away.
    ///
    /// With a `where_clause` only the matching rows are deleted; the
    /// clause may be written with or without the leading `WHERE` keyword.
    /// Without one, every row is deleted.
    pub fn delete(&self, table: &str, where_clause: Option<&str>) -> Result<usize> {
        stmt::check_identifier(table)?;
        if !self.db.has_table(table)? {
            return Err(Error::NoSuchTable(table.to_string()));
        }
        self.db.execute(&stmt::delete(table, where_clause))
    }
}
