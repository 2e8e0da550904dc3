//! SQLite.
//!
//! SQLite has no row locks, no schemas and cannot add constraints to an
//! existing table, so unique keys go inline into `create table`.

use crate::cast::CastType;
use crate::config::{
    Capabilities, DialectConfig, IdentitySupport, ResolutionInfo, SequenceSupport, TrimStyle,
};
use crate::ddl::UniqueDelegate;
use crate::dialect::{Dialect, DialectBuilder};
use crate::lock::LockClauses;
use crate::types::SqlTypeCode;

/// Default `SQLITE_MAX_VARIABLE_NUMBER` before 3.32.
const LEGACY_MAX_VARIABLES: i32 = 999;
/// Default `SQLITE_MAX_VARIABLE_NUMBER` from 3.32.
const MAX_VARIABLES: i32 = 32_766;

const KEYWORDS: &[&str] = &[
    "abort",
    "attach",
    "autoincrement",
    "conflict",
    "detach",
    "glob",
    "indexed",
    "isnull",
    "notnull",
    "pragma",
    "raise",
    "regexp",
    "replace",
    "vacuum",
];

const CONFIG: DialectConfig = DialectConfig {
    name: "sqlite",
    capabilities: Capabilities {
        if_exists_before_table_name: true,
        drop_constraints: false,
        qualify_index_name: false,
        alter_table_foreign_keys: false,
        can_create_schema: false,
        create_table_if_not_exists: true,
        lateral: false,
        window_functions: false,
        fetch_clause: false,
        nulls_ordering: false,
        outer_join_for_update: false,
        native_boolean: false,
        ..Capabilities::STANDARD
    },
    locking: LockClauses::NONE,
    sequences: SequenceSupport::NONE,
    identity: IdentitySupport {
        column_string: "",
        select_string: Some("select last_insert_rowid()"),
        ..IdentitySupport::STANDARD
    },
    boolean_representation: CastType::IntegerBoolean,
    in_list_ceiling: LEGACY_MAX_VARIABLES,
    no_columns_insert: "default values",
    trim: TrimStyle::Functions,
    current_timestamp_select: "select current_timestamp",
    ..DialectConfig::STANDARD
};

pub fn dialect(info: &ResolutionInfo) -> Dialect {
    let mut config = CONFIG;
    if info.is_same_or_after(3, 25) {
        config.capabilities.window_functions = true;
    }
    if info.is_same_or_after(3, 30) {
        config.capabilities.nulls_ordering = true;
    }
    if info.is_same_or_after(3, 32) {
        config.in_list_ceiling = MAX_VARIABLES;
    }
    if info.is_same_or_after(3, 35) {
        config.capabilities.insert_returning = true;
    }

    // SQLite column affinities
    let mut builder = DialectBuilder::standard(config);
    let names = builder.type_names();
    for code in [
        SqlTypeCode::Boolean,
        SqlTypeCode::Bit,
        SqlTypeCode::Tinyint,
        SqlTypeCode::Smallint,
        SqlTypeCode::Integer,
        SqlTypeCode::Bigint,
    ] {
        names.register(code, "integer");
    }
    for code in [SqlTypeCode::Real, SqlTypeCode::Float, SqlTypeCode::Double] {
        names.register(code, "real");
    }
    for code in [SqlTypeCode::Numeric, SqlTypeCode::Decimal] {
        names.register(code, "numeric");
    }
    for code in [
        SqlTypeCode::Char,
        SqlTypeCode::Varchar,
        SqlTypeCode::LongVarchar,
        SqlTypeCode::Clob,
        SqlTypeCode::Nchar,
        SqlTypeCode::Nvarchar,
        SqlTypeCode::LongNvarchar,
        SqlTypeCode::Nclob,
        SqlTypeCode::Date,
        SqlTypeCode::Time,
        SqlTypeCode::TimeWithTimezone,
        SqlTypeCode::Timestamp,
        SqlTypeCode::TimestampWithTimezone,
    ] {
        names.register(code, "text");
    }
    for code in [
        SqlTypeCode::Binary,
        SqlTypeCode::Varbinary,
        SqlTypeCode::LongVarbinary,
        SqlTypeCode::Blob,
    ] {
        names.register(code, "blob");
    }

    builder.keywords().register_all(KEYWORDS.iter().copied());
    builder
        .functions()
        .pattern("length", "length(?1)")
        .pattern("position", "instr(?2,?1)")
        .pattern("locate", "instr(?2,?1)")
        .native("ifnull", 2, Some(2))
        .pattern("str", "cast(?1 as text)")
        .native_as("least", "min", 2, None)
        .native_as("greatest", "max", 2, None)
        .no_args("local_time", "current_time")
        .no_args("local_datetime", "current_timestamp");
    builder.unique_delegate(UniqueDelegate::CreateTable);
    builder.resolution_info(info);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::{Column, ForeignKey, Table};
    use crate::dialect::TrimSpec;
    use crate::error::DialectError;
    use crate::lock::{LockMode, LockOptions};
    use crate::types::LanguageType;

    #[test]
    fn test_affinities() {
        let d = dialect(&ResolutionInfo::version(3, 45));
        assert_eq!(d.type_name_default(SqlTypeCode::Varchar).unwrap(), "text");
        assert_eq!(d.type_name_default(SqlTypeCode::Decimal).unwrap(), "numeric");
        assert_eq!(d.type_name_default(SqlTypeCode::Boolean).unwrap(), "integer");
    }

    #[test]
    fn test_no_locking() {
        let d = dialect(&ResolutionInfo::version(3, 45));
        assert_eq!(
            d.for_update_fragment(LockMode::PessimisticWrite, LockOptions::NO_WAIT),
            ""
        );
    }

    #[test]
    fn test_variable_limit_by_version() {
        assert_eq!(dialect(&ResolutionInfo::version(3, 31)).in_list_ceiling(), 999);
        assert_eq!(
            dialect(&ResolutionInfo::version(3, 32)).in_list_ceiling(),
            32_766
        );
    }

    #[test]
    fn test_inline_unique_and_checks() {
        let d = dialect(&ResolutionInfo::version(3, 45));
        let table = Table::new("account")
            .column(Column::new("id", SqlTypeCode::Integer, LanguageType::Int).not_null())
            .column(Column::new("email", SqlTypeCode::Varchar, LanguageType::String).unique())
            .column(
                Column::new("active", SqlTypeCode::Boolean, LanguageType::Boolean)
                    .not_null()
                    .check("active in (0,1)"),
            )
            .primary_key(["id"]);
        assert_eq!(
            d.create_table_strings(&table).unwrap(),
            vec![
                "create table account (id integer not null, email text unique, active integer not null check (active in (0,1)), primary key (id))"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_unsupported_ddl() {
        let d = dialect(&ResolutionInfo::version(3, 45));
        let fk = ForeignKey::new("fk_owner", "account", ["owner_id"], "person");
        assert!(matches!(
            d.add_foreign_key_strings(&fk),
            Err(DialectError::UnsupportedCapability { .. })
        ));
        assert!(d.drop_foreign_key_strings(&fk).unwrap().is_empty());
        assert!(d.create_schema_strings("main").is_err());
    }

    #[test]
    fn test_trim_functions() {
        let d = dialect(&ResolutionInfo::version(3, 45));
        assert_eq!(d.trim_pattern(TrimSpec::Both, ' '), "trim(?1)");
        assert_eq!(d.render_function("greatest", &["a", "b"]).unwrap(), "max(a,b)");
    }
}
