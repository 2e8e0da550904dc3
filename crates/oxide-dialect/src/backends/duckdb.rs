//! DuckDB.

use crate::config::{
    Capabilities, DialectConfig, IdentitySupport, ResolutionInfo, SequenceSupport,
};
use crate::ddl::UniqueDelegate;
use crate::dialect::{Dialect, DialectBuilder};
use crate::literal::DateTimeLiteralStyle;
use crate::lock::LockClauses;
use crate::types::SqlTypeCode;

const CONFIG: DialectConfig = DialectConfig {
    name: "duckdb",
    capabilities: Capabilities {
        if_exists_before_table_name: true,
        drop_constraints: false,
        alter_table_foreign_keys: false,
        comment_on: true,
        create_table_if_not_exists: true,
        tuple_distinct_counts: true,
        lateral: true,
        distinct_from_predicate: true,
        case_insensitive_like: true,
        outer_join_for_update: false,
        insert_returning: true,
        standard_arrays: true,
        if_exists_on_drop_sequence: true,
        ..Capabilities::STANDARD
    },
    locking: LockClauses::NONE,
    sequences: SequenceSupport {
        next_value: "nextval('$n')",
        select_next_value: "select $v",
        ..SequenceSupport::STANDARD
    },
    identity: IdentitySupport {
        supported: false,
        ..IdentitySupport::STANDARD
    },
    true_literal: "true",
    false_literal: "false",
    date_time_literals: DateTimeLiteralStyle::Ansi,
    no_columns_insert: "default values",
    current_timestamp_select: "select current_timestamp",
    ..DialectConfig::STANDARD
};

pub fn dialect(info: &ResolutionInfo) -> Dialect {
    let mut builder = DialectBuilder::standard(CONFIG);
    builder
        .type_names()
        .register(SqlTypeCode::Float, "float")
        .register(SqlTypeCode::Double, "double")
        .register(SqlTypeCode::Timestamp, "timestamp")
        .register(SqlTypeCode::TimestampWithTimezone, "timestamptz")
        .register(SqlTypeCode::TimeWithTimezone, "timetz")
        .register(SqlTypeCode::Binary, "blob")
        .register(SqlTypeCode::Varbinary, "blob")
        .register(SqlTypeCode::LongVarbinary, "blob")
        .register(SqlTypeCode::Varchar, "varchar")
        .register(SqlTypeCode::Char, "varchar")
        .register(SqlTypeCode::Nchar, "varchar")
        .register(SqlTypeCode::Nvarchar, "varchar")
        .register(SqlTypeCode::Clob, "varchar")
        .register(SqlTypeCode::Nclob, "varchar");
    builder
        .functions()
        .native("log10", 1, Some(1))
        .native_as("ceiling", "ceil", 1, Some(1))
        .pattern("str", "cast(?1 as varchar)");
    builder.keywords().register_all(["pivot", "qualify", "unpivot"]);
    builder.unique_delegate(UniqueDelegate::CreateTable);
    builder.resolution_info(info);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::{Column, Sequence, Table, UniqueKey};
    use crate::error::DialectError;
    use crate::types::LanguageType;

    #[test]
    fn test_unsized_types() {
        let d = dialect(&ResolutionInfo::version(1, 1));
        assert_eq!(d.type_name_default(SqlTypeCode::Varchar).unwrap(), "varchar");
        assert_eq!(
            d.type_name_default(SqlTypeCode::TimestampWithTimezone).unwrap(),
            "timestamptz"
        );
    }

    #[test]
    fn test_identity_through_sequences() {
        let d = dialect(&ResolutionInfo::version(1, 1));
        let table = Table::new("book")
            .column(Column::new("id", SqlTypeCode::Bigint, LanguageType::Long).identity())
            .primary_key(["id"]);
        assert!(matches!(
            d.create_table_strings(&table),
            Err(DialectError::UnsupportedCapability { .. })
        ));
        assert_eq!(
            d.create_sequence_strings(&Sequence::new("book_seq")).unwrap(),
            vec!["create sequence book_seq start with 1 increment by 1".to_string()]
        );
        assert_eq!(
            d.drop_sequence_strings(&Sequence::new("book_seq")).unwrap(),
            vec!["drop sequence if exists book_seq".to_string()]
        );
    }

    #[test]
    fn test_unique_keys_inline() {
        let d = dialect(&ResolutionInfo::version(1, 1));
        let table = Table::new("book")
            .column(Column::new("id", SqlTypeCode::Bigint, LanguageType::Long).not_null())
            .column(Column::new("isbn", SqlTypeCode::Varchar, LanguageType::String))
            .primary_key(["id"])
            .unique_key(UniqueKey::new("uk_isbn", "book", ["isbn"]));
        assert_eq!(
            d.create_table_strings(&table).unwrap(),
            vec![
                "create table book (id bigint not null, isbn varchar, primary key (id), constraint uk_isbn unique (isbn))"
                    .to_string()
            ]
        );
    }
}
