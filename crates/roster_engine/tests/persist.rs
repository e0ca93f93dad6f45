use std::fs;

use roster_engine::OutputDir;
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("nested");
    assert!(!new_dir.exists());
    OutputDir::new(&new_dir).ensure().unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let dir = OutputDir::new(temp.path());

    let first = dir.write_atomic("table.csv", b"a").unwrap();
    assert_eq!(first.file_name().unwrap(), "table.csv");
    assert_eq!(fs::read_to_string(&first).unwrap(), "a");

    let second = dir.write_atomic("table.csv", b"b").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "b");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let dir = OutputDir::new(&file_path);
    assert!(dir.ensure().is_err());
    assert!(dir.write_atomic("table.csv", b"data").is_err());
    assert!(!temp.path().join("table.csv").exists());
}

#[test]
fn removing_a_missing_file_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let dir = OutputDir::new(temp.path());
    let path = dir.write_atomic("old.csv", b"x").unwrap();

    assert!(dir.remove(&path).unwrap());
    assert!(!path.exists());
    assert!(!dir.remove(&path).unwrap());
}
