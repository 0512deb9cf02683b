//! Field descriptors, declared-type validation and fetch modes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The five general SQLite storage classes.
pub const GENERAL: [&str; 5] = ["NULL", "INTEGER", "REAL", "TEXT", "BLOB"];

/// Type-affinity synonyms, grouped by storage class, with any
/// parenthesized length/precision suffix already stripped. The empty
/// string means "no declared type".
pub(crate) const AFFINITY: [(&str, &[&str]); 5] = [
    (
        "INTEGER",
        &[
            "INTEGER",
            "TINYINT",
            "SMALLINT",
            "MEDIUMINT",
            "BIGINT",
            "UNSIGNED BIG INT",
            "INT2",
            "INT8",
        ],
    ),
    (
        "TEXT",
        &[
            "CHARACTER",
            "VARCHAR",
            "VARYING CHARACTER",
            "NCHAR",
            "NATIVE CHARACTER",
            "NVARCHAR",
            "TEXT",
            "CLOB",
        ],
    ),
    ("NONE", &["BLOB", ""]),
    ("REAL", &["REAL", "DOUBLE", "DOUBLE PRECISION", "FLOAT"]),
    ("NUMERIC", &["DECIMAL", "BOOLEAN", "DATE", "DATETIME"]),
];

/// Validate a caller-declared column type and return it uppercased for
/// interpolation into generated SQL.
///
/// Matching is case-insensitive and ignores a parenthesized suffix, so
/// `varchar(42)` is accepted the same way `VARCHAR(255)` is.
pub(crate) fn normalize_type(decl: &str) -> Result<String> {
    let upper = decl.trim().to_uppercase();
    let base = upper.split('(').next().unwrap_or("").trim();
    if GENERAL.contains(&base) {
        return Ok(upper);
    }
    for (_, synonyms) in AFFINITY {
        if synonyms.contains(&base) {
            return Ok(upper);
        }
    }
    Err(Error::UnsupportedType(decl.to_string()))
}

/// One field in a table definition: a name plus an optional declared
/// type. A bare name defaults to TEXT when the table is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub decl: Option<String>,
}

impl Field {
    /// A field with the default declared type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl: None,
        }
    }

    /// A field with an explicit declared type.
    pub fn typed(name: impl Into<String>, decl: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl: Some(decl.into()),
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::new(name)
    }
}

impl From<(&str, &str)> for Field {
    fn from((name, decl): (&str, &str)) -> Self {
        Field::typed(name, decl)
    }
}

impl From<(String, String)> for Field {
    fn from((name, decl): (String, String)) -> Self {
        Field::typed(name, decl)
    }
}

/// How many rows `Database::fetch` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchMode {
    /// All rows (`"*"`).
    All,
    /// The first row only, as a one-element sequence (`"1"`).
    First,
    /// The first `n` rows.
    Limit(usize),
}

impl FromStr for FetchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "*" => Ok(FetchMode::All),
            "1" => Ok(FetchMode::First),
            other => other
                .parse::<usize>()
                .map(FetchMode::Limit)
                .map_err(|_| Error::InvalidFetchMode(s.to_string())),
        }
    }
}

impl From<usize> for FetchMode {
    fn from(n: usize) -> Self {
        FetchMode::Limit(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_types_are_accepted_case_insensitively() {
        for decl in ["text", "TEXT", "tExT", "integer", "Blob", "REAL", "null"] {
            assert!(normalize_type(decl).is_ok(), "rejected {decl}");
        }
    }

    #[test]
    fn affinity_synonyms_are_accepted() {
        for decl in [
            "TINYINT",
            "unsigned big int",
            "VARCHAR(255)",
            "varchar(42)",
            "native character(70)",
            "DOUBLE PRECISION",
            "decimal(10,5)",
            "boolean",
            "DATETIME",
            "",
        ] {
            assert!(normalize_type(decl).is_ok(), "rejected {decl:?}");
        }
    }

    #[test]
    fn unknown_types_are_rejected() {
        for decl in ["JSONB", "uuid", "TEXTish", "INT 8"] {
            assert!(matches!(
                normalize_type(decl),
                Err(Error::UnsupportedType(_))
            ));
        }
    }

    #[test]
    fn normalized_types_are_uppercased() {
        assert_eq!(normalize_type("varchar(42)").unwrap(), "VARCHAR(42)");
        assert_eq!(normalize_type("text").unwrap(), "TEXT");
    }

    #[test]
    fn fetch_mode_parses_the_three_forms() {
        assert_eq!("*".parse::<FetchMode>().unwrap(), FetchMode::All);
        assert_eq!("1".parse::<FetchMode>().unwrap(), FetchMode::First);
        assert_eq!("17".parse::<FetchMode>().unwrap(), FetchMode::Limit(17));
        assert!(matches!(
            "first".parse::<FetchMode>(),
            Err(Error::InvalidFetchMode(_))
        ));
        assert!(matches!(
            "-3".parse::<FetchMode>(),
            Err(Error::InvalidFetchMode(_))
        ));
    }
}
