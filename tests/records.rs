use anyhow::Result;
use lite::{Database, Error, FetchMode, TableSpec, Value};
use tempfile::TempDir;

fn temp_db() -> Result<(Database, TempDir)> {
    let dir = TempDir::new()?;
    let db = Database::create(dir.path().join("test.db"))?;
    Ok((db, dir))
}

// The four-column employer table from the README example: auto id plus
// name, age and a nullable email.
fn employer(db: &Database) -> Result<()> {
    db.tables().create(
        "employer",
        &TableSpec::new(["name"])
            .field(("age", "INTEGER"))
            .field("email")
            .nullable(["email"]),
    )?;
    Ok(())
}

#[test]
fn short_records_pad_out_with_null_after_the_autofilled_id() -> Result<()> {
    let (db, _dir) = temp_db()?;
    employer(&db)?;

    db.records().insert("employer", &["Ann".into(), 30.into()])?;

    let rows = db.fetch("employer", FetchMode::All)?;
    assert_eq!(
        rows,
        vec![vec![
            Value::Integer(1),
            Value::Text("Ann".to_string()),
            Value::Integer(30),
            Value::Null,
        ]]
    );
    Ok(())
}

#[test]
fn the_filler_value_is_caller_specified() -> Result<()> {
    let (db, _dir) = temp_db()?;
    employer(&db)?;

    db.records().insert_filled(
        "employer",
        &["Bob".into(), 41.into()],
        &Value::Text("unknown".to_string()),
    )?;

    let rows = db.fetch("employer", FetchMode::All)?;
    assert_eq!(rows[0][3], Value::Text("unknown".to_string()));
    Ok(())
}

#[test]
fn overlong_records_are_rejected_by_the_engine() -> Result<()> {
    let (db, _dir) = temp_db()?;
    employer(&db)?;

    let result = db.records().insert(
        "employer",
        &["Ann".into(), 30.into(), Value::Null, "extra".into()],
    );
    assert!(matches!(result, Err(Error::Sqlite(_))));
    Ok(())
}

#[test]
fn insert_requires_an_existing_table() -> Result<()> {
    let (db, _dir) = temp_db()?;
    assert!(matches!(
        db.records().insert("nowhere", &["x".into()]),
        Err(Error::NoSuchTable(_))
    ));
    Ok(())
}

#[test]
fn delete_accepts_the_clause_with_or_without_the_keyword() -> Result<()> {
    let (db, _dir) = temp_db()?;
    employer(&db)?;
    let records = db.records();
    for (name, age) in [("Ann", 30), ("Bob", 66), ("Cleo", 71)] {
        records.insert("employer", &[name.into(), age.into()])?;
    }

    // Exactly the retirees go away
    assert_eq!(records.delete("employer", Some("age > 65"))?, 2);
    let rows = db.fetch("employer", FetchMode::All)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], Value::Text("Ann".to_string()));

    // The WHERE keyword, in any case, is equivalent
    records.insert("employer", &["Dara".into(), 80.into()])?;
    assert_eq!(records.delete("employer", Some("WHERE age > 65"))?, 1);
    records.insert("employer", &["Eli".into(), 90.into()])?;
    assert_eq!(records.delete("employer", Some("wHeRe age > 65"))?, 1);
    Ok(())
}

#[test]
fn delete_without_a_clause_empties_the_table() -> Result<()> {
    let (db, _dir) = temp_db()?;
    employer(&db)?;
    db.records().insert("employer", &["Ann".into(), 30.into()])?;
    db.records().insert("employer", &["Bob".into(), 41.into()])?;

    assert_eq!(db.records().delete("employer", None)?, 2);
    assert!(db.fetch("employer", FetchMode::All)?.is_empty());

    assert!(matches!(
        db.records().delete("nowhere", None),
        Err(Error::NoSuchTable(_))
    ));
    Ok(())
}
