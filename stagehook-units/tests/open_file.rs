//! Loading source sets from disk.

use std::fs;

use stagehook_units::{Error, SourceSet, UnitsToml};

#[test]
fn test_open_units_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("units.toml");
    fs::write(
        &path,
        r#"
        [[unit]]
        path = "src/a/A.java"
        package = "a"
        types = ["A"]
        "#,
    )
    .unwrap();

    let file = UnitsToml::open(&path).expect("units.toml should load");
    assert_eq!(file.path(), path);
    assert!(file.content().contains("src/a/A.java"));
    assert_eq!(file.source_set().units[0].types, ["A"]);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SourceSet::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_errors_carry_filename() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[unit]]\npath = \"A.java\"\npackage = \"1a\"\n").unwrap();

    let err = UnitsToml::open(&path).err().expect("invalid package should fail");
    assert_eq!(err.to_string(), "invalid package '1a'");
    match *err {
        Error::InvalidPackage { src, span, .. } => {
            assert_eq!(src.name(), path.display().to_string());
            assert!(span.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
