use crate::indexes::{base_table, IndexResolver};
use std::fs;
use tempfile::TempDir;

fn sql_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let index_dir = dir.path().join("indexes");
    fs::create_dir_all(&index_dir).unwrap();

    for (name, content) in files {
        fs::write(index_dir.join(name), content).unwrap();
    }

    dir
}

#[test]
pub fn strip_row_count() {
    assert_eq!(base_table("string_encrypted_10000"), Some("string_encrypted"));
    assert_eq!(base_table("string_encrypted"), None);
    assert_eq!(base_table("string_encrypted_"), None);
    assert_eq!(base_table("table_10a"), None);
    assert_eq!(base_table("10000"), None);
}

#[test]
pub fn exact_file_wins() {
    let dir = sql_dir(&[
        ("integer_encrypted_5000_up.sql", "CREATE INDEX exact;\n"),
        ("integer_encrypted_up.sql", "CREATE INDEX base;"),
    ]);
    let mut resolver = IndexResolver::new(dir.path());

    assert_eq!(
        resolver.resolve("integer_encrypted_5000"),
        Some("CREATE INDEX exact;")
    );
}

#[test]
pub fn falls_back_to_base_table() {
    let dir = sql_dir(&[("string_encrypted_up.sql", "  CREATE UNIQUE INDEX ...;  \n")]);
    let mut resolver = IndexResolver::new(dir.path());

    assert_eq!(
        resolver.resolve("string_encrypted_10000"),
        Some("CREATE UNIQUE INDEX ...;")
    );
    assert_eq!(
        resolver.cached("string_encrypted_10000"),
        Some("CREATE UNIQUE INDEX ...;")
    );
    assert_eq!(resolver.cached("string_encrypted"), None);
}

#[test]
pub fn cached_definitions_survive_file_removal() {
    let dir = sql_dir(&[("string_encrypted_up.sql", "CREATE INDEX a;")]);
    let mut resolver = IndexResolver::new(dir.path());

    assert!(resolver.resolve("string_encrypted_100").is_some());
    fs::remove_file(dir.path().join("indexes/string_encrypted_up.sql")).unwrap();

    assert_eq!(resolver.resolve("string_encrypted_100"), Some("CREATE INDEX a;"));
    assert_eq!(resolver.resolve("string_encrypted_200"), None);
}

#[test]
pub fn missing_definitions() {
    let dir = TempDir::new().unwrap();
    let mut resolver = IndexResolver::new(dir.path());

    assert_eq!(resolver.resolve("integer_encrypted_5000"), None);
    assert_eq!(resolver.cached("integer_encrypted_5000"), None);
}

#[test]
pub fn unreadable_definitions_are_missing() {
    // invalid utf-8 can't be read into a string
    let dir = TempDir::new().unwrap();
    let index_dir = dir.path().join("indexes");
    fs::create_dir_all(&index_dir).unwrap();
    fs::write(index_dir.join("broken_up.sql"), [0xff, 0xfe, 0xfd]).unwrap();

    let mut resolver = IndexResolver::new(dir.path());

    assert_eq!(resolver.resolve("broken_1"), None);
}
