//! Tests for padded batch sizes and `in` list rendering.

use oxide_dialect::batch::ceiling_power_of_two;
use oxide_dialect::{
    BatchLoadSizingStrategy, Dialect, DialectBuilder, DialectConfig, ResolutionInfo, Settings,
    StandardBatchLoadSizing,
};

fn padded() -> Settings {
    Settings {
        in_clause_parameter_padding: true,
        ..Settings::default()
    }
}

fn with_ceiling(ceiling: i32) -> Dialect {
    let mut builder = DialectBuilder::standard(DialectConfig::STANDARD);
    builder.resolution_info(&ResolutionInfo {
        in_list_ceiling: Some(ceiling),
        ..ResolutionInfo::default()
    });
    builder.build()
}

// =============================================================================
// Test: Power-of-two padding without a ceiling
// =============================================================================

#[test]
fn test_padding_sequence() {
    let dialect = Dialect::standard();
    let sizes: Vec<usize> = (1..=10).map(|n| dialect.batch_size(1, n)).collect();
    assert_eq!(sizes, vec![1, 2, 4, 4, 8, 8, 8, 8, 16, 16]);
}

#[test]
fn test_padding_is_monotonic_and_covers_keys() {
    let strategy = StandardBatchLoadSizing::new();
    let mut previous = 0;
    for keys in 1..=300 {
        let size = strategy.determine_optimal_batch_load_size(1, keys, 0);
        assert!(size >= keys);
        assert!(size >= previous);
        assert_eq!(size, ceiling_power_of_two(keys));
        previous = size;
    }
}

#[test]
fn test_rendered_in_lists() {
    let dialect = Dialect::standard();
    assert_eq!(
        dialect.render_in_list("b.id", 5, &padded()),
        "b.id in(?,?,?,?,?,?,?,?)"
    );
    assert_eq!(
        dialect.render_in_list("b.id", 9, &padded()),
        format!("b.id in({})", vec!["?"; 16].join(","))
    );
    assert_eq!(
        dialect.render_in_list("b.id", 5, &Settings::default()),
        "b.id in(?,?,?,?,?)"
    );
}

// =============================================================================
// Test: Backend parameter ceiling
// =============================================================================

#[test]
fn test_ceiling_caps_padding() {
    let dialect = with_ceiling(8);
    assert_eq!(dialect.batch_size(1, 9), 8);
    assert_eq!(dialect.batch_size(1, 5), 5);
    assert_eq!(dialect.batch_size(1, 3), 4);
}

#[test]
fn test_key_count_equal_to_ceiling() {
    let dialect = with_ceiling(8);
    assert_eq!(dialect.batch_size(1, 8), 8);
    assert_eq!(dialect.in_list_placeholder_count(8, &padded()), 8);
}

#[test]
fn test_padding_never_truncates() {
    let dialect = with_ceiling(8);
    for keys in 1..=40 {
        assert!(dialect.in_list_placeholder_count(keys, &padded()) >= keys);
    }
}

#[test]
fn test_split_beyond_ceiling() {
    let dialect = with_ceiling(8);
    assert_eq!(
        dialect.render_in_list("id", 10, &padded()),
        "(id in(?,?,?,?,?,?,?,?) or id in(?,?))"
    );
}

#[test]
fn test_tuple_keys_ignore_ceiling() {
    let dialect = with_ceiling(8);
    assert_eq!(dialect.batch_size(2, 9), 16);
}

#[test]
fn test_empty_in_list() {
    let dialect = Dialect::standard();
    assert_eq!(dialect.render_in_list("id", 0, &padded()), "1=0");
}
