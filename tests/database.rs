use anyhow::Result;
use lite::{Database, Error, FetchMode, TableSpec, Value};
use tempfile::TempDir;

// Helper to create a fresh file-backed database in a temp directory
fn temp_db() -> Result<(Database, TempDir)> {
    let dir = TempDir::new()?;
    let db = Database::create(dir.path().join("test.db"))?;
    Ok((db, dir))
}

fn sample_table(db: &Database) -> Result<()> {
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
fn create_fails_on_an_existing_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("test.db");
    let _db = Database::create(&path)?;
    assert!(path.exists());

    let second = Database::create(&path);
    assert!(matches!(second, Err(Error::DatabaseExists(_))));
    Ok(())
}

#[test]
fn open_binds_an_existing_database() -> Result<()> {
    let (db, dir) = temp_db()?;
    sample_table(&db)?;

    let reopened = Database::open(db.path())?;
    assert_eq!(reopened.table_names()?, vec!["employer".to_string()]);
    drop(dir);
    Ok(())
}

#[test]
fn drop_database_removes_the_file() -> Result<()> {
    let (db, _dir) = temp_db()?;
    let path = db.path().to_path_buf();
    assert!(path.exists());

    Database::drop_database(&path)?;
    assert!(!path.exists());

    // A second drop has nothing left to remove
    assert!(matches!(
        Database::drop_database(&path),
        Err(Error::NoSuchDatabase(_))
    ));
    Ok(())
}

#[test]
fn execute_and_query_round_trip() -> Result<()> {
    let (db, _dir) = temp_db()?;
    sample_table(&db)?;

    db.execute("INSERT INTO employer (name, age, email) VALUES ('Ann', 30, NULL)")?;
    let rows = db.query("SELECT name, age FROM employer")?;
    assert_eq!(
        rows,
        vec![vec![Value::Text("Ann".to_string()), Value::Integer(30)]]
    );

    // A malformed statement is a failure return, not a panic
    assert!(db.execute("INSRT INTO employer").is_err());
    assert!(db.query("SELECT * FROM nowhere").is_err());
    Ok(())
}

#[test]
fn fetch_supports_all_first_and_limit() -> Result<()> {
    let (db, _dir) = temp_db()?;
    sample_table(&db)?;
    for (name, age) in [("Ann", 30), ("Bob", 41), ("Cleo", 52)] {
        db.records()
            .insert("employer", &[name.into(), age.into()])?;
    }

    assert_eq!(db.fetch("employer", FetchMode::All)?.len(), 3);
    assert_eq!(db.fetch("employer", FetchMode::Limit(2))?.len(), 2);

    let first = db.fetch("employer", FetchMode::First)?;
    assert_eq!(first.len(), 1);
    assert_eq!(first[0][1], Value::Text("Ann".to_string()));

    // String modes parse into the same enum
    assert_eq!("*".parse::<FetchMode>()?, FetchMode::All);
    assert_eq!("2".parse::<FetchMode>()?, FetchMode::Limit(2));

    assert!(matches!(
        db.fetch("nowhere", FetchMode::All),
        Err(Error::NoSuchTable(_))
    ));
    Ok(())
}

#[test]
fn schema_and_table_names_are_recomputed_views() -> Result<()> {
    let (db, _dir) = temp_db()?;
    assert!(db.table_names()?.is_empty());

    sample_table(&db)?;
    db.tables().create("dept", &TableSpec::new(["label"]))?;

    let mut names = db.table_names()?;
    names.sort();
    assert_eq!(names, vec!["dept".to_string(), "employer".to_string()]);

    let schema = db.schema()?;
    assert_eq!(
        schema["employer"],
        vec!["id", "name", "age", "email"]
    );
    assert_eq!(schema["dept"], vec!["id", "label"]);

    // The view reflects a drop immediately
    db.tables().drop("dept")?;
    assert!(!db.schema()?.contains_key("dept"));
    Ok(())
}

#[test]
fn clear_discards_every_table() -> Result<()> {
    let (db, _dir) = temp_db()?;
    sample_table(&db)?;
    assert_eq!(db.table_names()?.len(), 1);

    db.clear()?;
    assert!(db.path().exists());
    assert!(db.table_names()?.is_empty());
    Ok(())
}
