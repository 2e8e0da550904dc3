//! Microsoft SQL Server.
//!
//! Locking goes through table hints instead of a trailing `for update`, and
//! unique constraints on nullable columns become filtered unique indexes.

use crate::config::{
    Capabilities, DdlStrings, DialectConfig, IdentitySupport, QuoteStyle, ResolutionInfo,
    SequenceSupport, TrimStyle,
};
use crate::ddl::UniqueDelegate;
use crate::dialect::{Dialect, DialectBuilder};
use crate::lock::LockClauses;
use crate::types::SqlTypeCode;

const MAX_VARCHAR_LENGTH: u64 = 8000;
const MAX_NVARCHAR_LENGTH: u64 = 4000;

const KEYWORDS: &[&str] = &[
    "dbcc",
    "holdlock",
    "identity",
    "nocheck",
    "openquery",
    "pivot",
    "readtext",
    "rowcount",
    "textsize",
    "top",
    "tran",
    "tsequal",
    "unpivot",
    "updatetext",
    "writetext",
];

const CONFIG: DialectConfig = DialectConfig {
    name: "sqlserver",
    capabilities: Capabilities {
        can_create_catalog: true,
        row_value_constructor_syntax: false,
        row_value_constructor_syntax_in_in_list: false,
        fetch_clause: false,
        nulls_ordering: false,
        native_boolean: false,
        timestamp_arithmetic: true,
        query_hints: true,
        ..Capabilities::STANDARD
    },
    ddl: DdlStrings {
        add_column: "add",
        create_catalog: "create database",
        drop_catalog: "drop database",
        drop_index_on_table: true,
        ..DdlStrings::STANDARD
    },
    locking: LockClauses {
        write_hint: Some("with (updlock, holdlock, rowlock)"),
        read_hint: Some("with (holdlock, rowlock)"),
        ..LockClauses::NONE
    },
    sequences: SequenceSupport::NONE,
    identity: IdentitySupport {
        column_string: " identity not null",
        select_string: Some("select @@identity"),
        ..IdentitySupport::STANDARD
    },
    quote: QuoteStyle::BRACKETS,
    in_list_ceiling: 2100,
    max_identifier_length: Some(128),
    no_columns_insert: "default values",
    trim: TrimStyle::Functions,
    extract_pattern: "datepart(?1,?2)",
    current_timestamp_select: "select current_timestamp",
    ..DialectConfig::STANDARD
};

pub fn dialect(info: &ResolutionInfo) -> Dialect {
    let mut config = CONFIG;
    // 2012
    if info.is_same_or_after(11, 0) {
        config.sequences = SequenceSupport {
            select_next_value: "select $v",
            ..SequenceSupport::STANDARD
        };
        config.capabilities.fetch_clause = true;
    }
    // 2016
    if info.is_same_or_after(13, 0) {
        config.capabilities.if_exists_before_table_name = true;
        config.capabilities.if_exists_before_constraint_name = true;
    }

    let mut builder = DialectBuilder::standard(config);
    builder
        .type_names()
        .register(SqlTypeCode::Boolean, "bit")
        .register(SqlTypeCode::Double, "float")
        .register(SqlTypeCode::Timestamp, "datetime2($p)")
        .register(SqlTypeCode::TimestampWithTimezone, "datetimeoffset($p)")
        .register(SqlTypeCode::TimeWithTimezone, "datetimeoffset($p)")
        .register_with_capacity(SqlTypeCode::Varchar, MAX_VARCHAR_LENGTH, "varchar($l)")
        .register(SqlTypeCode::Varchar, "varchar(max)")
        .register(SqlTypeCode::LongVarchar, "varchar(max)")
        .register(SqlTypeCode::Clob, "varchar(max)")
        .register_with_capacity(SqlTypeCode::Nvarchar, MAX_NVARCHAR_LENGTH, "nvarchar($l)")
        .register(SqlTypeCode::Nvarchar, "nvarchar(max)")
        .register(SqlTypeCode::LongNvarchar, "nvarchar(max)")
        .register(SqlTypeCode::Nclob, "nvarchar(max)")
        .register_with_capacity(SqlTypeCode::Varbinary, MAX_VARCHAR_LENGTH, "varbinary($l)")
        .register(SqlTypeCode::Varbinary, "varbinary(max)")
        .register(SqlTypeCode::LongVarbinary, "varbinary(max)")
        .register(SqlTypeCode::Blob, "varbinary(max)");
    builder.keywords().register_all(KEYWORDS.iter().copied());
    builder
        .functions()
        .variadic("concat", "(", "+", ")", 1)
        .pattern("length", "len(?1)")
        .pattern("position", "charindex(?1,?2)")
        .pattern("locate", "charindex(?1,?2)")
        .pattern("ifnull", "isnull(?1,?2)")
        .native("log10", 1, Some(1))
        .native("str", 1, Some(3))
        .pattern("timestampadd", "dateadd(?1,?2,?3)")
        .pattern("timestampdiff", "datediff(?1,?2,?3)")
        .no_args("current_date", "convert(date,getdate())")
        .no_args("current_time", "convert(time,getdate())")
        .no_args("local_date", "convert(date,getdate())")
        .no_args("local_time", "convert(time,getdate())")
        .no_args("local_datetime", "getdate()")
        .no_args("offset_datetime", "sysdatetimeoffset()")
        .no_args("instant", "sysutcdatetime()");
    builder.unique_delegate(UniqueDelegate::SkipNullable);
    builder.resolution_info(info);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::{Index, QualifiedName, UniqueKey};
    use crate::lock::{LockMode, LockOptions};
    use crate::size::Size;

    #[test]
    fn test_max_types() {
        let d = dialect(&ResolutionInfo::version(16, 0));
        assert_eq!(
            d.resolve_type_name(SqlTypeCode::Varchar, &Size::length(9000)).unwrap(),
            "varchar(max)"
        );
        assert_eq!(
            d.resolve_type_name(SqlTypeCode::Nvarchar, &Size::length(4000)).unwrap(),
            "nvarchar(4000)"
        );
        assert_eq!(
            d.type_name_default(SqlTypeCode::Timestamp).unwrap(),
            "datetime2(6)"
        );
    }

    #[test]
    fn test_lock_hints() {
        let d = dialect(&ResolutionInfo::version(16, 0));
        assert_eq!(
            d.for_update_fragment(LockMode::PessimisticWrite, LockOptions::WAIT_FOREVER),
            ""
        );
        assert_eq!(
            d.append_lock_hint(LockMode::PessimisticWrite, "book b"),
            "book b with (updlock, holdlock, rowlock)"
        );
        assert_eq!(
            d.append_lock_hint(LockMode::PessimisticRead, "book b"),
            "book b with (holdlock, rowlock)"
        );
        assert_eq!(d.append_lock_hint(LockMode::None, "book b"), "book b");
    }

    #[test]
    fn test_filtered_unique_index() {
        let d = dialect(&ResolutionInfo::version(16, 0));
        let key = UniqueKey::new("uk_isbn", "book", ["isbn"]);
        assert_eq!(
            d.add_unique_key_strings(&key).unwrap(),
            vec!["create unique index uk_isbn on book (isbn) where isbn is not null".to_string()]
        );
        assert_eq!(
            d.drop_unique_key_strings(&key).unwrap(),
            vec!["drop index uk_isbn on book".to_string()]
        );
    }

    #[test]
    fn test_version_gates() {
        let old = dialect(&ResolutionInfo::version(10, 50));
        assert!(old.sequence_next_value_string("s").is_err());
        assert_eq!(
            old.drop_table_string(&QualifiedName::new("book")).unwrap(),
            "drop table book"
        );

        let new = dialect(&ResolutionInfo::version(16, 0));
        assert_eq!(new.sequence_next_value_string("s").unwrap(), "next value for s");
        assert_eq!(
            new.drop_table_string(&QualifiedName::new("book")).unwrap(),
            "drop table if exists book"
        );
        assert_eq!(
            new.drop_index_strings(&Index::new("idx_title", "book", ["title"]))
                .unwrap(),
            vec!["drop index if exists idx_title on book".to_string()]
        );
    }

    #[test]
    fn test_functions() {
        let d = dialect(&ResolutionInfo::version(16, 0));
        assert_eq!(
            d.render_function("dateadd", &["day", "1", "b.published"]).unwrap(),
            "dateadd(day,1,b.published)"
        );
        assert_eq!(d.render_function("concat", &["a", "b"]).unwrap(), "(a+b)");
        assert_eq!(d.render_extract("year", "b.published"), "datepart(year,b.published)");
    }
}
