//! Filesystem-backed data source.

use std::fs;

use tempfile::TempDir;
use uniprops::{BinaryProperty, Config, DataSource, DirectorySource, PropertyDirectory};

use crate::common::{json_payload, payload, LOWERCASE, VERSION};

/// White_Space excerpt as the upstream dump tool writes it.
const WHITE_SPACE_TOML: &str = r#"[unicode_set.data]
long_name = "White_Space"
name = "WSpace"
serialized = []
ranges = [[9, 13], [32, 32]]
"#;

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let version = dir.path().join(VERSION);
    fs::create_dir_all(&version).unwrap();
    fs::write(version.join("Lower.uprop"), payload(&LOWERCASE)).unwrap();
    fs::write(
        version.join("Upper.json"),
        json_payload(&[(65, 91)], "Uppercase", "Upper"),
    )
    .unwrap();
    dir
}

#[test]
fn test_reads_binary_and_json_files() {
    let tmp = data_dir();
    let dir = PropertyDirectory::new(DirectorySource::new(tmp.path()), VERSION);

    let lower = dir.get(BinaryProperty::Lowercase).unwrap();
    assert_eq!(lower.boundaries(), &LOWERCASE);

    let upper = dir.get(BinaryProperty::Uppercase).unwrap();
    assert!(upper.contains('Q' as u32));
    assert!(!upper.contains('q' as u32));
}

#[test]
fn test_binary_file_wins_over_json() {
    let tmp = data_dir();
    fs::write(
        tmp.path().join(VERSION).join("Lower.json"),
        json_payload(&[(0, 1)], "Lowercase", "Lower"),
    )
    .unwrap();

    let source = DirectorySource::new(tmp.path());
    assert_eq!(source.fetch("Lower", VERSION).unwrap(), payload(&LOWERCASE));
}

#[test]
fn test_reads_toml_files() {
    let tmp = data_dir();
    fs::write(tmp.path().join(VERSION).join("WSpace.toml"), WHITE_SPACE_TOML).unwrap();
    let dir = PropertyDirectory::new(DirectorySource::new(tmp.path()), VERSION);

    let ws = dir.get(BinaryProperty::WhiteSpace).unwrap();
    assert!(ws.contains(0x09));
    assert!(ws.contains(0x0D));
    assert!(ws.contains(0x20));
    assert!(!ws.contains(0x0E));
    assert_eq!(ws.size(), 6);

    // Derived from White_Space, so TOML feeds derivation too.
    let blank = dir.get(BinaryProperty::Blank).unwrap();
    assert!(blank.contains(0x20));
    assert!(!blank.contains(0x0A));
}

#[test]
fn test_missing_file_and_version() {
    let tmp = data_dir();
    let dir = PropertyDirectory::new(DirectorySource::new(tmp.path()), VERSION);
    assert!(dir.get(BinaryProperty::Math).unwrap_err().is_not_found());

    let other = PropertyDirectory::new(DirectorySource::new(tmp.path()), "v9");
    assert!(other.get(BinaryProperty::Lowercase).unwrap_err().is_not_found());
}

#[test]
fn test_rejects_path_traversal() {
    let tmp = data_dir();
    let source = DirectorySource::new(tmp.path().join(VERSION));
    let err = source.fetch("Lower", "..").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(source.fetch("../v1/Lower", VERSION).is_err());
}

#[test]
fn test_corrupt_file_is_reported() {
    let tmp = data_dir();
    fs::write(tmp.path().join(VERSION).join("Math.uprop"), b"UPRP garbage").unwrap();
    let dir = PropertyDirectory::new(DirectorySource::new(tmp.path()), VERSION);
    assert!(dir.get(BinaryProperty::Math).unwrap_err().is_corrupt());
}

#[test]
fn test_directory_from_config() {
    let tmp = data_dir();
    let config = Config::default().with_overrides(Some(tmp.path().to_path_buf()), None);
    let dir = PropertyDirectory::from_config(&config);
    assert_eq!(dir.version(), VERSION);
    assert!(dir.get_by_name("lowercase").unwrap().contains('a' as u32));
    assert!(dir.loader().source_description().starts_with("directory "));
}
