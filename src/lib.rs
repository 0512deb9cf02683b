//! A lightweight convenience layer over SQLite.
//!
//! # Intention
//!
//! - Create, alter and query tables via ordinary function calls instead
//!   of hand-written SQL strings.
//! - Validate caller-supplied field/type/constraint descriptors before
//!   any identifier reaches a generated statement.
//! - Sequence the multi-statement rebuilds (column removal, primary-key
//!   promotion) SQLite has no in-place ALTER for, inside explicit
//!   transactions with a rollback path.
//!
//! # Architectural Boundaries
//!
//! - All engine work (storage, planning, locking, transactions) belongs
//!   to SQLite via `rusqlite`; nothing here reimplements it.
//! - One [`Database`] handle per database file; the table, column and
//!   record managers borrow that handle and never target another file.
//! - Catalog metadata is never cached: the `schema` and table-name views
//!   are recomputed from the engine catalog on every access.
//!
//! # Example
//!
//! ```no_run
//! use lite::{Database, TableSpec, Value};
//!
//! fn main() -> lite::Result<()> {
//!     let db = Database::create("company.db")?;
//!     db.tables().create(
//!         "employer",
//!         &TableSpec::new(["name"]).field(("age", "INTEGER")).field("email"),
//!     )?;
//!     // id autofills, the record pads out with NULL
//!     db.records().insert("employer", &["Ann".into(), Value::Integer(30)])?;
//!     db.records().delete("employer", Some("age > 65"))?;
//!     Ok(())
//! }
//! ```

mod columns;
mod db;
mod error;
mod records;
mod stmt;
mod tables;
mod types;
mod value;

pub use columns::{ColumnOpts, Columns};
pub use db::Database;
pub use error::{Error, Result};
pub use records::Records;
pub use tables::{Tables, TableSpec};
pub use types::{Field, FetchMode, GENERAL};
pub use value::Value;
