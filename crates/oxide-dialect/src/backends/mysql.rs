//! MySQL.

use crate::config::{
    Capabilities, DdlStrings, DialectConfig, IdentitySupport, QuoteStyle, ResolutionInfo,
    SequenceSupport,
};
use crate::dialect::{Dialect, DialectBuilder};
use crate::literal::DateTimeLiteralStyle;
use crate::lock::{LockClauses, RowLockStrategy};
use crate::types::SqlTypeCode;

/// Row size limit, which bounds `varchar` and `varbinary`.
const MAX_VARCHAR_LENGTH: u64 = 65_535;

const KEYWORDS: &[&str] = &[
    "accessible",
    "auto_increment",
    "limit",
    "lock",
    "regexp",
    "rlike",
    "straight_join",
    "unsigned",
    "zerofill",
];

const CONFIG: DialectConfig = DialectConfig {
    name: "mysql",
    capabilities: Capabilities {
        if_exists_before_table_name: true,
        qualify_index_name: false,
        can_create_catalog: true,
        can_create_schema: false,
        create_table_if_not_exists: true,
        column_check: false,
        table_check: false,
        tuple_distinct_counts: true,
        subquery_on_mutating_table: false,
        fetch_clause: false,
        nulls_ordering: false,
        native_boolean: false,
        timestamp_arithmetic: true,
        current_timestamp_selection: true,
        query_hints: true,
        ..Capabilities::STANDARD
    },
    ddl: DdlStrings {
        table_type: " engine=InnoDB",
        drop_foreign_key: " drop foreign key ",
        drop_unique_key: " drop index ",
        create_catalog: "create database",
        drop_catalog: "drop database",
        drop_index_on_table: true,
        inline_comments: true,
        ..DdlStrings::STANDARD
    },
    locking: LockClauses {
        for_share: Some(" lock in share mode"),
        ..LockClauses::STANDARD
    },
    sequences: SequenceSupport::NONE,
    identity: IdentitySupport {
        column_string: " not null auto_increment",
        select_string: Some("select last_insert_id()"),
        ..IdentitySupport::STANDARD
    },
    quote: QuoteStyle::BACKTICK,
    true_literal: "true",
    false_literal: "false",
    date_time_literals: DateTimeLiteralStyle::Ansi,
    max_identifier_length: Some(64),
    no_columns_insert: "() values ( )",
    current_timestamp_select: "select now()",
    ..DialectConfig::STANDARD
};

pub fn dialect(info: &ResolutionInfo) -> Dialect {
    let mut config = CONFIG;
    if info.is_same_or_after(8, 0) {
        config.locking.for_share = Some(" for share");
        config.locking.nowait = Some(" nowait");
        config.locking.skip_locked = Some(" skip locked");
        config.locking.row_lock_strategy = RowLockStrategy::Table;
        config.capabilities.lateral = true;
        config.capabilities.column_check = true;
        config.capabilities.table_check = true;
    }

    let mut builder = DialectBuilder::standard(config);
    builder
        .type_names()
        .register(SqlTypeCode::Boolean, "bit")
        .register(SqlTypeCode::Double, "double precision")
        .register(SqlTypeCode::Timestamp, "datetime($p)")
        .register(SqlTypeCode::TimestampWithTimezone, "timestamp($p)")
        .register(SqlTypeCode::TimeWithTimezone, "time")
        .register(SqlTypeCode::Numeric, "decimal($p,$s)")
        .register_with_capacity(SqlTypeCode::Varchar, MAX_VARCHAR_LENGTH, "varchar($l)")
        .register(SqlTypeCode::Varchar, "longtext")
        .register_with_capacity(SqlTypeCode::Nvarchar, MAX_VARCHAR_LENGTH, "varchar($l)")
        .register(SqlTypeCode::Nvarchar, "longtext")
        .register(SqlTypeCode::Nchar, "char($l)")
        .register_with_capacity(SqlTypeCode::Varbinary, MAX_VARCHAR_LENGTH, "varbinary($l)")
        .register(SqlTypeCode::Varbinary, "longblob")
        .register(SqlTypeCode::LongVarchar, "longtext")
        .register(SqlTypeCode::LongNvarchar, "longtext")
        .register(SqlTypeCode::LongVarbinary, "longblob")
        .register(SqlTypeCode::Clob, "longtext")
        .register(SqlTypeCode::Nclob, "longtext")
        .register(SqlTypeCode::Blob, "longblob");
    builder.keywords().register_all(KEYWORDS.iter().copied());
    builder
        .functions()
        .variadic("concat", "concat(", ",", ")", 1)
        .pattern("length", "char_length(?1)")
        .pattern("str", "cast(?1 as char)")
        .native("log10", 1, Some(1))
        .native("ifnull", 2, Some(2));
    builder.resolution_info(info);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::{Column, QualifiedName, Table};
    use crate::lock::{LockMode, LockOptions};
    use crate::size::Size;
    use crate::types::LanguageType;

    #[test]
    fn test_share_lock_by_version() {
        let old = dialect(&ResolutionInfo::version(5, 7));
        let new = dialect(&ResolutionInfo::version(8, 0));
        assert_eq!(
            old.for_update_fragment(LockMode::PessimisticRead, LockOptions::WAIT_FOREVER),
            " lock in share mode"
        );
        assert_eq!(
            new.for_update_fragment(LockMode::PessimisticRead, LockOptions::WAIT_FOREVER),
            " for share"
        );
        assert_eq!(
            old.for_update_fragment(LockMode::UpgradeNowait, LockOptions::WAIT_FOREVER),
            " for update"
        );
    }

    #[test]
    fn test_long_varchar() {
        let d = dialect(&ResolutionInfo::version(8, 0));
        assert_eq!(
            d.resolve_type_name(SqlTypeCode::Varchar, &Size::length(70_000)).unwrap(),
            "longtext"
        );
        assert_eq!(
            d.resolve_type_name(SqlTypeCode::Varchar, &Size::length(100)).unwrap(),
            "varchar(100)"
        );
    }

    #[test]
    fn test_create_table() {
        let d = dialect(&ResolutionInfo::version(8, 0));
        let table = Table::new("book")
            .column(Column::new("id", SqlTypeCode::Bigint, LanguageType::Long).identity())
            .column(
                Column::new("title", SqlTypeCode::Varchar, LanguageType::String)
                    .length(100)
                    .comment("display title"),
            )
            .primary_key(["id"]);
        assert_eq!(
            d.create_table_strings(&table).unwrap(),
            vec![
                "create table book (id bigint not null auto_increment, title varchar(100) comment 'display title', primary key (id)) engine=InnoDB"
                    .to_string()
            ]
        );
        assert!(d.create_sequence_strings(&crate::ddl::Sequence::new("s")).is_err());
        assert_eq!(
            d.drop_table_string(&QualifiedName::new("`order`")).unwrap(),
            "drop table if exists `order`"
        );
    }
}
