//! PostgreSQL.

use crate::cast::CastType;
use crate::config::{
    Capabilities, DdlStrings, DialectConfig, ResolutionInfo, SequenceSupport,
};
use crate::dialect::{Dialect, DialectBuilder};
use crate::literal::DateTimeLiteralStyle;
use crate::lock::{LockClauses, RowLockStrategy};
use crate::types::SqlTypeCode;

/// Longest `varchar` PostgreSQL accepts.
const MAX_VARCHAR_LENGTH: u64 = 10_485_760;

const KEYWORDS: &[&str] = &[
    "analyse",
    "analyze",
    "concurrently",
    "freeze",
    "ilike",
    "limit",
    "notnull",
    "offset",
    "placing",
    "returning",
    "variadic",
    "verbose",
];

const CONFIG: DialectConfig = DialectConfig {
    name: "postgresql",
    capabilities: Capabilities {
        if_exists_before_table_name: true,
        if_exists_before_constraint_name: true,
        if_exists_after_alter_table: true,
        comment_on: true,
        create_table_if_not_exists: true,
        tuple_distinct_counts: true,
        lateral: true,
        distinct_from_predicate: true,
        case_insensitive_like: true,
        outer_join_for_update: false,
        insert_returning: true,
        standard_arrays: true,
        ref_cursors: true,
        if_exists_on_drop_sequence: true,
        ..Capabilities::STANDARD
    },
    ddl: DdlStrings {
        cascade_constraints: " cascade",
        ..DdlStrings::STANDARD
    },
    locking: LockClauses {
        for_share: Some(" for share"),
        nowait: Some(" nowait"),
        row_lock_strategy: RowLockStrategy::Table,
        ..LockClauses::STANDARD
    },
    sequences: SequenceSupport {
        next_value: "nextval('$n')",
        select_next_value: "select $v",
        ..SequenceSupport::STANDARD
    },
    true_literal: "true",
    false_literal: "false",
    date_time_literals: DateTimeLiteralStyle::Ansi,
    max_identifier_length: Some(63),
    no_columns_insert: "default values",
    current_timestamp_select: "select now()",
    ref_cursor_type: Some("refcursor"),
    ..DialectConfig::STANDARD
};

pub fn dialect(info: &ResolutionInfo) -> Dialect {
    let mut config = CONFIG;
    if info.is_same_or_after(9, 5) {
        config.locking.skip_locked = Some(" skip locked");
    }

    let mut builder = DialectBuilder::standard(config);
    builder
        .type_names()
        .register(SqlTypeCode::Tinyint, "smallint")
        .register(SqlTypeCode::Binary, "bytea")
        .register(SqlTypeCode::Varbinary, "bytea")
        .register(SqlTypeCode::LongVarbinary, "bytea")
        .register(SqlTypeCode::Blob, "bytea")
        .register(SqlTypeCode::Clob, "text")
        .register(SqlTypeCode::Nclob, "text")
        .register(SqlTypeCode::LongVarchar, "text")
        .register(SqlTypeCode::LongNvarchar, "text")
        .register(SqlTypeCode::Nchar, "char($l)")
        .register_with_capacity(SqlTypeCode::Varchar, MAX_VARCHAR_LENGTH, "varchar($l)")
        .register(SqlTypeCode::Varchar, "text")
        .register_with_capacity(SqlTypeCode::Nvarchar, MAX_VARCHAR_LENGTH, "varchar($l)")
        .register(SqlTypeCode::Nvarchar, "text");
    builder.keywords().register_all(KEYWORDS.iter().copied());
    builder
        .functions()
        .pattern("str", "cast(?1 as text)")
        .native("log10", 1, Some(1))
        .native_as("ceiling", "ceil", 1, Some(1));
    builder
        .casts()
        .set(CastType::String, CastType::Boolean, "cast(?1 as boolean)");
    builder.resolution_info(info);
    builder.build()
}
