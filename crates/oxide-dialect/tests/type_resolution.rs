//! Tests for type-name resolution across the dialect tables.

use std::thread;

use oxide_dialect::{
    Backend, Dialect, DialectBuilder, DialectConfig, DialectError, LanguageType, ResolutionInfo,
    Size, SqlTypeCode,
};

// =============================================================================
// Test: Long type fallback chain
// =============================================================================

#[test]
fn test_longvarchar_falls_back_to_varchar() {
    let dialect = Dialect::standard();
    for length in [1, 255, 4000, 100_000] {
        let size = Size::length(length);
        assert_eq!(
            dialect.resolve_type_name(SqlTypeCode::LongVarchar, &size).unwrap(),
            dialect.resolve_type_name(SqlTypeCode::Varchar, &size).unwrap()
        );
    }
}

#[test]
fn test_explicit_long_mapping_wins() {
    let mut builder = DialectBuilder::standard(DialectConfig::STANDARD);
    builder
        .type_names()
        .register(SqlTypeCode::LongVarchar, "long varchar");
    let dialect = builder.build();
    assert_eq!(
        dialect
            .resolve_type_name(SqlTypeCode::LongVarchar, &Size::length(10))
            .unwrap(),
        "long varchar"
    );
}

#[test]
fn test_no_mapping_after_fallback() {
    let mut builder = DialectBuilder::standard(DialectConfig::STANDARD);
    builder.type_names().unregister(SqlTypeCode::Varchar);
    let dialect = builder.build();

    let err = dialect
        .resolve_type_name(SqlTypeCode::LongVarchar, &Size::length(42))
        .unwrap_err();
    assert!(matches!(
        err,
        DialectError::NoMapping {
            code: SqlTypeCode::LongVarchar,
            length: Some(42)
        }
    ));
    assert!(err.to_string().contains("LONGVARCHAR"));
}

// =============================================================================
// Test: Capacity weighting
// =============================================================================

#[test]
fn test_smallest_sufficient_capacity_wins() {
    let mut builder = DialectBuilder::standard(DialectConfig::STANDARD);
    builder
        .type_names()
        .register_with_capacity(SqlTypeCode::Varbinary, 255, "tinyblob")
        .register_with_capacity(SqlTypeCode::Varbinary, 65_535, "blob")
        .register(SqlTypeCode::Varbinary, "longblob");
    let dialect = builder.build();

    let resolve = |length| {
        dialect
            .resolve_type_name(SqlTypeCode::Varbinary, &Size::length(length))
            .unwrap()
    };
    assert_eq!(resolve(10), "tinyblob");
    assert_eq!(resolve(255), "tinyblob");
    assert_eq!(resolve(256), "blob");
    assert_eq!(resolve(70_000), "longblob");
}

#[test]
fn test_resolution_is_idempotent() {
    let dialect = Dialect::for_backend(Backend::SqlServer, &ResolutionInfo::version(16, 0));
    let size = Size::length(5000);
    let first = dialect.resolve_type_name(SqlTypeCode::Nvarchar, &size).unwrap();
    for _ in 0..10 {
        assert_eq!(
            dialect.resolve_type_name(SqlTypeCode::Nvarchar, &size).unwrap(),
            first
        );
    }
    assert_eq!(first, "nvarchar(max)");
}

// =============================================================================
// Test: Size strategy
// =============================================================================

#[test]
fn test_explicit_sizes_override_defaults() {
    let dialect = Dialect::standard();
    let size = dialect.size_for(
        SqlTypeCode::Decimal,
        LanguageType::BigDecimal,
        Some(12),
        Some(4),
        None,
    );
    assert_eq!(
        dialect.ddl_type_name(SqlTypeCode::Decimal, &size).unwrap(),
        "decimal(12,4)"
    );

    let size = dialect.size_for(SqlTypeCode::Decimal, LanguageType::Long, None, None, None);
    assert_eq!(
        dialect.ddl_type_name(SqlTypeCode::Decimal, &size).unwrap(),
        "decimal(38,0)"
    );
}

#[test]
fn test_float_with_decimal_precision() {
    let dialect = Dialect::standard();
    let size = dialect.size_for(
        SqlTypeCode::Float,
        LanguageType::Double,
        Some(10),
        Some(2),
        None,
    );
    assert_eq!(size.scale, None);
    assert_eq!(
        dialect.ddl_type_name(SqlTypeCode::Float, &size).unwrap(),
        "float(24)"
    );
}

// =============================================================================
// Test: Concurrent reads of a published dialect
// =============================================================================

#[test]
fn test_concurrent_reads_agree() {
    let dialect = Dialect::for_backend(Backend::Oracle, &ResolutionInfo::version(19, 0));
    let expected = dialect
        .resolve_type_name(SqlTypeCode::Varchar, &Size::length(100))
        .unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let dialect = &dialect;
                scope.spawn(move || {
                    let mut results = Vec::new();
                    for _ in 0..200 {
                        results.push(
                            dialect
                                .resolve_type_name(SqlTypeCode::Varchar, &Size::length(100))
                                .unwrap(),
                        );
                        assert!(dialect.is_keyword(if i % 2 == 0 { "rownum" } else { "SELECT" }));
                    }
                    results
                })
            })
            .collect();
        for handle in handles {
            for result in handle.join().unwrap() {
                assert_eq!(result, expected);
            }
        }
    });
}
