//! Tests for loading backend resolution info and applying it to dialects.

use std::io::Write;

use oxide_dialect::{Backend, Dialect, DialectError, ResolutionInfo};
use tempfile::NamedTempFile;

fn write_json(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

// =============================================================================
// Test: Loading from a file
// =============================================================================

#[test]
fn test_load_from_file() {
    let file = write_json(
        r#"{"major_version": 19, "minor_version": 3, "keywords": "QUALIFY, PIVOT", "in_list_ceiling": 500}"#,
    );
    let info = ResolutionInfo::from_json_file(file.path()).unwrap();
    assert_eq!(info.major_version, 19);
    assert_eq!(info.minor_version, 3);
    assert_eq!(info.in_list_ceiling, Some(500));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ResolutionInfo::from_json_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DialectError::Io(_)));
}

#[test]
fn test_negative_ceiling_is_rejected() {
    let file = write_json(r#"{"major_version": 16, "in_list_ceiling": -1}"#);
    let err = ResolutionInfo::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, DialectError::InvalidResolutionInfo(_)));
}

// =============================================================================
// Test: Applying resolution info
// =============================================================================

#[test]
fn test_reported_keywords_become_keywords() {
    let info = ResolutionInfo {
        keywords: String::from("QUALIFY, ,Pivot"),
        ..ResolutionInfo::version(16, 0)
    };
    let dialect = Dialect::for_backend(Backend::PostgreSQL, &info);
    assert!(dialect.is_keyword("qualify"));
    assert!(dialect.is_keyword("PIVOT"));
    assert_eq!(dialect.quote_if_reserved("qualify"), "\"qualify\"");
    assert_eq!(dialect.quote_if_reserved("title"), "title");
}

#[test]
fn test_ceiling_override() {
    let dialect = Dialect::for_backend(Backend::Oracle, &ResolutionInfo::version(19, 0));
    assert_eq!(dialect.in_list_ceiling(), 1000);

    let info = ResolutionInfo {
        in_list_ceiling: Some(64),
        ..ResolutionInfo::version(19, 0)
    };
    let dialect = Dialect::for_backend(Backend::Oracle, &info);
    assert_eq!(dialect.in_list_ceiling(), 64);
    assert_eq!(dialect.batch_size(1, 100), 64);
}

#[test]
fn test_version_is_recorded() {
    let dialect = Dialect::for_backend(Backend::SQLite, &ResolutionInfo::version(3, 45));
    assert_eq!(dialect.version(), (3, 45));
    assert_eq!(dialect.in_list_ceiling(), 32_766);

    let legacy = Dialect::for_backend(Backend::SQLite, &ResolutionInfo::version(3, 31));
    assert_eq!(legacy.in_list_ceiling(), 999);
}
