//! Oracle Database.

use crate::cast::CastType;
use crate::config::{
    Capabilities, DdlStrings, DialectConfig, IdentitySupport, ResolutionInfo, SequenceSupport,
};
use crate::dialect::{Dialect, DialectBuilder};
use crate::literal::DateTimeLiteralStyle;
use crate::lock::{LockClauses, RowLockStrategy};
use crate::types::SqlTypeCode;

const MAX_VARCHAR_LENGTH: u64 = 4000;
const MAX_NVARCHAR_LENGTH: u64 = 2000;
const MAX_RAW_LENGTH: u64 = 2000;

const KEYWORDS: &[&str] = &[
    "access",
    "audit",
    "cluster",
    "comment",
    "compress",
    "exclusive",
    "file",
    "identified",
    "level",
    "lock",
    "long",
    "minus",
    "mode",
    "noaudit",
    "nocompress",
    "nowait",
    "number",
    "offline",
    "online",
    "pctfree",
    "prior",
    "raw",
    "rename",
    "resource",
    "rowid",
    "rownum",
    "share",
    "size",
    "synonym",
    "sysdate",
    "uid",
    "validate",
    "varchar2",
    "view",
];

const CONFIG: DialectConfig = DialectConfig {
    name: "oracle",
    capabilities: Capabilities {
        comment_on: true,
        can_create_schema: false,
        exists_in_select: false,
        fetch_clause: false,
        native_boolean: false,
        value_lists_for_insert: false,
        ref_cursors: true,
        query_hints: true,
        ..Capabilities::STANDARD
    },
    ddl: DdlStrings {
        cascade_constraints: " cascade constraints",
        add_column: "add",
        ..DdlStrings::STANDARD
    },
    locking: LockClauses {
        nowait: Some(" nowait"),
        skip_locked: Some(" skip locked"),
        wait: Some(" wait "),
        row_lock_strategy: RowLockStrategy::Column,
        supports_with_order_by: false,
        ..LockClauses::STANDARD
    },
    sequences: SequenceSupport {
        next_value: "$n.nextval",
        select_next_value: "select $v from dual",
        ..SequenceSupport::STANDARD
    },
    identity: IdentitySupport {
        supported: false,
        ..IdentitySupport::STANDARD
    },
    boolean_representation: CastType::IntegerBoolean,
    date_time_literals: DateTimeLiteralStyle::Ansi,
    in_list_ceiling: 1000,
    max_identifier_length: Some(30),
    no_columns_insert: "values (default)",
    current_timestamp_select: "select current_timestamp from dual",
    ref_cursor_type: Some("sys_refcursor"),
    ..DialectConfig::STANDARD
};

pub fn dialect(info: &ResolutionInfo) -> Dialect {
    let mut config = CONFIG;
    if info.is_same_or_after(12, 0) {
        config.capabilities.fetch_clause = true;
        config.identity.supported = true;
        config.max_identifier_length = Some(128);
    }
    if info.is_same_or_after(23, 0) {
        config.capabilities.if_exists_before_table_name = true;
        config.capabilities.create_table_if_not_exists = true;
        config.capabilities.native_boolean = true;
        config.boolean_representation = CastType::Boolean;
        config.true_literal = "true";
        config.false_literal = "false";
    }

    let mut builder = DialectBuilder::standard(config);
    builder
        .type_names()
        .register(SqlTypeCode::Bit, "number(1,0)")
        .register(SqlTypeCode::Tinyint, "number(3,0)")
        .register(SqlTypeCode::Smallint, "number(5,0)")
        .register(SqlTypeCode::Integer, "number(10,0)")
        .register(SqlTypeCode::Bigint, "number(19,0)")
        .register(SqlTypeCode::Real, "float(24)")
        .register(SqlTypeCode::Double, "float(53)")
        .register(SqlTypeCode::Numeric, "number($p,$s)")
        .register(SqlTypeCode::Decimal, "number($p,$s)")
        .register(SqlTypeCode::Time, "date")
        .register(SqlTypeCode::TimeWithTimezone, "timestamp($p) with time zone")
        .register_with_capacity(SqlTypeCode::Binary, MAX_RAW_LENGTH, "raw($l)")
        .register(SqlTypeCode::Binary, "blob")
        .register_with_capacity(SqlTypeCode::Varbinary, MAX_RAW_LENGTH, "raw($l)")
        .register(SqlTypeCode::Varbinary, "blob")
        .register(SqlTypeCode::LongVarbinary, "blob")
        .register(SqlTypeCode::Char, "char($l char)")
        .register_with_capacity(SqlTypeCode::Varchar, MAX_VARCHAR_LENGTH, "varchar2($l char)")
        .register(SqlTypeCode::Varchar, "clob")
        .register(SqlTypeCode::LongVarchar, "clob")
        .register_with_capacity(SqlTypeCode::Nvarchar, MAX_NVARCHAR_LENGTH, "nvarchar2($l)")
        .register(SqlTypeCode::Nvarchar, "nclob")
        .register(SqlTypeCode::LongNvarchar, "nclob");
    if !info.is_same_or_after(23, 0) {
        builder
            .type_names()
            .register(SqlTypeCode::Boolean, "number(1,0)");
    }
    builder.keywords().register_all(KEYWORDS.iter().copied());
    builder
        .functions()
        .pattern("length", "length(?1)")
        .pattern("position", "instr(?2,?1)")
        .pattern("locate", "instr(?2,?1)")
        .pattern("ifnull", "nvl(?1,?2)")
        .pattern("str", "to_char(?1)")
        .native_as("ceiling", "ceil", 1, Some(1))
        .no_args("current_time", "current_timestamp")
        .no_args("local_time", "localtimestamp");
    builder.resolution_info(info);
    builder.build()
}
