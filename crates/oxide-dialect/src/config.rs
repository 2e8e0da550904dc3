//! Dialect configuration: the tabular knobs each backend sets.
//!
//! Everything that differs between backends only by a flag or a snippet of
//! text lives here. Backends start from [`DialectConfig::STANDARD`] and
//! override fields with struct-update syntax.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cast::CastType;
use crate::error::{DialectError, Result};
use crate::literal::DateTimeLiteralStyle;
use crate::lock::LockClauses;
use crate::size::SizeDefaults;

/// Boolean capability predicates. Locking predicates derive from the
/// clause strings in [`LockClauses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    // DDL
    /// `drop table if exists t`.
    pub if_exists_before_table_name: bool,
    /// `drop table t if exists`.
    pub if_exists_after_table_name: bool,
    /// `alter table t drop constraint if exists c`.
    pub if_exists_before_constraint_name: bool,
    /// `alter table t drop constraint c if exists`.
    pub if_exists_after_constraint_name: bool,
    /// `alter table if exists t`.
    pub if_exists_after_alter_table: bool,
    /// Whether `alter table` exists at all.
    pub has_alter_table: bool,
    /// Whether constraints are dropped before their tables.
    pub drop_constraints: bool,
    /// Whether index names take the schema of their table.
    pub qualify_index_name: bool,
    /// `on delete cascade` on foreign keys.
    pub cascade_delete: bool,
    /// `comment on table` / `comment on column`.
    pub comment_on: bool,
    /// Column-level check constraints.
    pub column_check: bool,
    /// Table-level check constraints.
    pub table_check: bool,
    /// Whether foreign keys can be added after `create table`.
    pub alter_table_foreign_keys: bool,
    /// `create catalog` / `create database`.
    pub can_create_catalog: bool,
    /// `create schema`.
    pub can_create_schema: bool,
    /// Whether `if not exists` may follow `create table`.
    pub create_table_if_not_exists: bool,
    /// Whether temporary tables exist.
    pub temporary_tables: bool,

    // Query
    /// `union all`.
    pub union_all: bool,
    /// Row value constructors, `(a, b) = (?, ?)`.
    pub row_value_constructor_syntax: bool,
    /// Row value constructors inside `in` lists.
    pub row_value_constructor_syntax_in_in_list: bool,
    /// `count(distinct a, b)`.
    pub tuple_distinct_counts: bool,
    /// `count((a, b))`.
    pub tuple_counts: bool,
    /// `exists` as a select item.
    pub exists_in_select: bool,
    /// `in ()` with no elements.
    pub empty_in_list: bool,
    /// Subqueries reading the table being modified.
    pub subquery_on_mutating_table: bool,
    /// `lateral` joins.
    pub lateral: bool,
    /// Window functions.
    pub window_functions: bool,
    /// `offset ... fetch first ...`.
    pub fetch_clause: bool,
    /// `limit` / `offset` in subqueries.
    pub offset_in_subquery: bool,
    /// `nulls first` / `nulls last`.
    pub nulls_ordering: bool,
    /// `is distinct from`.
    pub distinct_from_predicate: bool,
    /// Case-insensitive `like` operator (`ilike`).
    pub case_insensitive_like: bool,
    /// `for update` together with outer joins.
    pub outer_join_for_update: bool,
    /// `insert ... returning` / `output inserted`.
    pub insert_returning: bool,
    /// `values` lists with several rows.
    pub value_lists_for_insert: bool,

    // Types and functions
    /// A native boolean type.
    pub native_boolean: bool,
    /// Timestamp arithmetic functions (`timestampadd`, `timestampdiff`).
    pub timestamp_arithmetic: bool,
    /// Selecting the current timestamp.
    pub current_timestamp_selection: bool,
    /// Standard arrays.
    pub standard_arrays: bool,
    /// Ref-cursor results from stored procedures.
    pub ref_cursors: bool,
    /// Optimizer hints.
    pub query_hints: bool,
    /// `if exists` on `drop sequence`.
    pub if_exists_on_drop_sequence: bool,
}

impl Capabilities {
    /// Documented defaults.
    pub const STANDARD: Self = Self {
        if_exists_before_table_name: false,
        if_exists_after_table_name: false,
        if_exists_before_constraint_name: false,
        if_exists_after_constraint_name: false,
        if_exists_after_alter_table: false,
        has_alter_table: true,
        drop_constraints: true,
        qualify_index_name: true,
        cascade_delete: true,
        comment_on: false,
        column_check: true,
        table_check: true,
        alter_table_foreign_keys: true,
        can_create_catalog: false,
        can_create_schema: true,
        create_table_if_not_exists: false,
        temporary_tables: true,
        union_all: true,
        row_value_constructor_syntax: true,
        row_value_constructor_syntax_in_in_list: true,
        tuple_distinct_counts: false,
        tuple_counts: false,
        exists_in_select: true,
        empty_in_list: false,
        subquery_on_mutating_table: true,
        lateral: false,
        window_functions: true,
        fetch_clause: true,
        offset_in_subquery: true,
        nulls_ordering: true,
        distinct_from_predicate: false,
        case_insensitive_like: false,
        outer_join_for_update: true,
        insert_returning: false,
        value_lists_for_insert: true,
        native_boolean: true,
        timestamp_arithmetic: false,
        current_timestamp_selection: true,
        standard_arrays: false,
        ref_cursors: false,
        query_hints: false,
        if_exists_on_drop_sequence: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// DDL text fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DdlStrings {
    /// `create table`.
    pub create_table: &'static str,
    /// Appended after the column list, e.g. ` engine=InnoDB`.
    pub table_type: &'static str,
    /// Appended to `drop table t`, e.g. ` cascade`.
    pub cascade_constraints: &'static str,
    /// `add column`.
    pub add_column: &'static str,
    /// Appended after an added column definition.
    pub add_column_suffix: &'static str,
    /// Between `alter table t` and the foreign key name when dropping it.
    pub drop_foreign_key: &'static str,
    /// Between `alter table t` and the unique key name when dropping it.
    pub drop_unique_key: &'static str,
    /// Written after nullable columns.
    pub null_column: &'static str,
    /// `create schema`.
    pub create_schema: &'static str,
    /// `drop schema`.
    pub drop_schema: &'static str,
    /// `create catalog`.
    pub create_catalog: &'static str,
    /// `drop catalog`.
    pub drop_catalog: &'static str,
    /// Whether `drop index` names the table (`drop index i on t`).
    pub drop_index_on_table: bool,
    /// Whether comments are written inline (`comment '...'`) rather than
    /// with `comment on`.
    pub inline_comments: bool,
}

impl DdlStrings {
    /// Documented defaults.
    pub const STANDARD: Self = Self {
        create_table: "create table",
        table_type: "",
        cascade_constraints: "",
        add_column: "add column",
        add_column_suffix: "",
        drop_foreign_key: " drop constraint ",
        drop_unique_key: " drop constraint ",
        null_column: "",
        create_schema: "create schema",
        drop_schema: "drop schema",
        create_catalog: "create catalog",
        drop_catalog: "drop catalog",
        drop_index_on_table: false,
        inline_comments: false,
    };
}

impl Default for DdlStrings {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Sequence support. Templates use `$n` for the sequence name and `$v` for
/// the next-value expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceSupport {
    /// Whether sequences exist.
    pub supported: bool,
    /// Whether `increment by` values other than 1 are usable.
    pub pooled: bool,
    /// Next-value expression, e.g. `next value for $n`.
    pub next_value: &'static str,
    /// Statement selecting the next value, e.g. `select $v`.
    pub select_next_value: &'static str,
}

impl SequenceSupport {
    /// ANSI sequences.
    pub const STANDARD: Self = Self {
        supported: true,
        pooled: true,
        next_value: "next value for $n",
        select_next_value: "values ($v)",
    };

    /// No sequences.
    pub const NONE: Self = Self {
        supported: false,
        pooled: false,
        next_value: "",
        select_next_value: "",
    };
}

impl Default for SequenceSupport {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Identity column support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdentitySupport {
    /// Whether identity columns exist.
    pub supported: bool,
    /// Appended to an identity column definition.
    pub column_string: &'static str,
    /// Whether the column type is written before `column_string`.
    pub has_data_type: bool,
    /// Statement returning the last generated identity.
    pub select_string: Option<&'static str>,
}

impl IdentitySupport {
    /// `generated by default as identity`.
    pub const STANDARD: Self = Self {
        supported: true,
        column_string: " generated by default as identity",
        has_data_type: true,
        select_string: None,
    };
}

impl Default for IdentitySupport {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Identifier quote characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteStyle {
    /// Opening quote.
    pub open: char,
    /// Closing quote.
    pub close: char,
}

impl QuoteStyle {
    /// `"name"`.
    pub const DOUBLE_QUOTE: Self = Self {
        open: '"',
        close: '"',
    };
    /// `` `name` ``.
    pub const BACKTICK: Self = Self {
        open: '`',
        close: '`',
    };
    /// `[name]`.
    pub const BRACKETS: Self = Self {
        open: '[',
        close: ']',
    };

    /// Quotes `name`, doubling embedded closing quotes.
    #[must_use]
    pub fn quote(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        out.push(self.open);
        for c in name.chars() {
            if c == self.close {
                out.push(c);
            }
            out.push(c);
        }
        out.push(self.close);
        out
    }

    /// Returns whether `name` is already quoted with this style or the
    /// portable backtick style.
    #[must_use]
    pub fn is_quoted(&self, name: &str) -> bool {
        let quoted = |open: char, close: char| {
            name.len() >= 2 && name.starts_with(open) && name.ends_with(close)
        };
        quoted(self.open, self.close) || quoted('`', '`')
    }
}

impl Default for QuoteStyle {
    fn default() -> Self {
        Self::DOUBLE_QUOTE
    }
}

/// How `trim` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimStyle {
    /// `trim(leading 'x' from ?1)`.
    #[default]
    Ansi,
    /// `ltrim(?1,'x')`, `rtrim(?1,'x')`, `trim(?1,'x')`.
    Functions,
}

/// The full tabular description of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DialectConfig {
    /// Short backend name.
    pub name: &'static str,
    /// Boolean predicates.
    pub capabilities: Capabilities,
    /// DDL text.
    pub ddl: DdlStrings,
    /// Lock clause text.
    pub locking: LockClauses,
    /// Size defaults.
    pub sizes: SizeDefaults,
    /// Sequence support.
    pub sequences: SequenceSupport,
    /// Identity column support.
    pub identity: IdentitySupport,
    /// Identifier quoting.
    pub quote: QuoteStyle,
    /// How boolean values are stored.
    pub boolean_representation: CastType,
    /// Literal for `true`.
    pub true_literal: &'static str,
    /// Literal for `false`.
    pub false_literal: &'static str,
    /// Date/time literal style.
    pub date_time_literals: DateTimeLiteralStyle,
    /// Maximum number of parameters in an `in` list, `0` for no limit.
    pub in_list_ceiling: i32,
    /// Maximum generated alias length.
    pub max_alias_length: usize,
    /// Maximum identifier length, if limited.
    pub max_identifier_length: Option<usize>,
    /// Insert statement tail for a row with no columns.
    pub no_columns_insert: &'static str,
    /// `trim` rendering.
    pub trim: TrimStyle,
    /// `extract` pattern, `?1` is the unit and `?2` the operand.
    pub extract_pattern: &'static str,
    /// Statement selecting the current timestamp.
    pub current_timestamp_select: &'static str,
    /// Type name of a ref-cursor out parameter.
    pub ref_cursor_type: Option<&'static str>,
}

impl DialectConfig {
    /// Defaults for a generic ANSI backend.
    pub const STANDARD: Self = Self {
        name: "standard",
        capabilities: Capabilities::STANDARD,
        ddl: DdlStrings::STANDARD,
        locking: LockClauses::STANDARD,
        sizes: SizeDefaults::STANDARD,
        sequences: SequenceSupport::STANDARD,
        identity: IdentitySupport::STANDARD,
        quote: QuoteStyle::DOUBLE_QUOTE,
        boolean_representation: CastType::Boolean,
        true_literal: "1",
        false_literal: "0",
        date_time_literals: DateTimeLiteralStyle::JdbcEscape,
        in_list_ceiling: 0,
        max_alias_length: 10,
        max_identifier_length: None,
        no_columns_insert: "values ( )",
        trim: TrimStyle::Ansi,
        extract_pattern: "extract(?1 from ?2)",
        current_timestamp_select: "values current_timestamp",
        ref_cursor_type: None,
    };

    /// Serializes the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// What the backend reports about itself once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionInfo {
    /// Major version of the backend.
    #[serde(default)]
    pub major_version: u32,
    /// Minor version of the backend.
    #[serde(default)]
    pub minor_version: u32,
    /// Comma-separated reserved words beyond SQL:2003.
    #[serde(default)]
    pub keywords: String,
    /// Maximum number of parameters in an `in` list, overriding the
    /// backend default.
    #[serde(default)]
    pub in_list_ceiling: Option<i32>,
}

impl ResolutionInfo {
    /// Creates resolution info for a version.
    #[must_use]
    pub fn version(major_version: u32, minor_version: u32) -> Self {
        Self {
            major_version,
            minor_version,
            ..Self::default()
        }
    }

    /// Returns whether the reported version is at least `major.minor`.
    #[must_use]
    pub const fn is_same_or_after(&self, major: u32, minor: u32) -> bool {
        self.major_version > major || (self.major_version == major && self.minor_version >= minor)
    }

    /// Parses and validates resolution info from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or a negative `in_list_ceiling`.
    pub fn from_json(json: &str) -> Result<Self> {
        let info: Self = serde_json::from_str(json)?;
        info.validate()?;
        Ok(info)
    }

    /// Loads resolution info from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<()> {
        match self.in_list_ceiling {
            Some(ceiling) if ceiling < 0 => Err(DialectError::InvalidResolutionInfo(format!(
                "in_list_ceiling must not be negative, got {ceiling}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Query-engine switches this layer honours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Pad `in` lists to the batch size.
    #[serde(default)]
    pub in_clause_parameter_padding: bool,
    /// Prefix statements with comments.
    #[serde(default)]
    pub use_sql_comments: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_defaults() {
        let config = DialectConfig::STANDARD;
        assert!(config.capabilities.has_alter_table);
        assert!(config.capabilities.qualify_index_name);
        assert!(!config.capabilities.comment_on);
        assert_eq!(config.ddl.drop_foreign_key, " drop constraint ");
        assert_eq!(config.locking.for_update, " for update");
        assert_eq!(config.in_list_ceiling, 0);
        assert_eq!(config.max_alias_length, 10);
        assert_eq!(config.no_columns_insert, "values ( )");
    }

    #[test]
    fn test_quote_style() {
        assert_eq!(QuoteStyle::DOUBLE_QUOTE.quote("order"), "\"order\"");
        assert_eq!(QuoteStyle::BRACKETS.quote("a]b"), "[a]]b]");
        assert!(QuoteStyle::BACKTICK.is_quoted("`x`"));
        assert!(QuoteStyle::BRACKETS.is_quoted("`x`"));
        assert!(!QuoteStyle::DOUBLE_QUOTE.is_quoted("\""));
    }

    #[test]
    fn test_config_serializes() {
        let json = DialectConfig::STANDARD.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "standard");
        assert_eq!(value["locking"]["for_update"], " for update");
        assert_eq!(value["boolean_representation"], "BOOLEAN");
    }

    #[test]
    fn test_ddl_and_lock_predicates_are_exposed() {
        let json = DialectConfig::STANDARD.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let capabilities = &value["capabilities"];
        for flag in [
            "if_exists_before_table_name",
            "if_exists_after_table_name",
            "if_exists_before_constraint_name",
            "if_exists_after_constraint_name",
            "if_exists_after_alter_table",
            "has_alter_table",
            "drop_constraints",
            "qualify_index_name",
            "cascade_delete",
            "comment_on",
            "column_check",
            "table_check",
            "can_create_catalog",
            "can_create_schema",
            "if_exists_on_drop_sequence",
            "outer_join_for_update",
        ] {
            assert!(capabilities[flag].is_boolean(), "{flag}");
        }
        assert_eq!(capabilities["has_alter_table"], true);
        assert_eq!(capabilities["can_create_catalog"], false);

        let locking = DialectConfig::STANDARD.locking;
        assert!(locking.supports_for_update());
        assert!(!locking.supports_lock_timeouts());
        assert!(!locking.supports_nowait());
        assert!(!locking.supports_skip_locked());
    }

    #[test]
    fn test_resolution_info_parsing() {
        let info = ResolutionInfo::from_json(
            r#"{"major_version": 16, "minor_version": 2, "keywords": "ILIKE,LIMIT"}"#,
        )
        .unwrap();
        assert!(info.is_same_or_after(16, 0));
        assert!(info.is_same_or_after(15, 9));
        assert!(!info.is_same_or_after(16, 3));
        assert_eq!(info.in_list_ceiling, None);

        let info = ResolutionInfo::from_json("{}").unwrap();
        assert_eq!(info, ResolutionInfo::default());
    }

    #[test]
    fn test_resolution_info_rejects_negative_ceiling() {
        let err = ResolutionInfo::from_json(r#"{"in_list_ceiling": -5}"#).unwrap_err();
        assert!(matches!(err, DialectError::InvalidResolutionInfo(_)));
        let err = ResolutionInfo::from_json("not json").unwrap_err();
        assert!(matches!(err, DialectError::Serialization(_)));
    }
}
