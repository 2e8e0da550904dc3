//! The dialect façade.
//!
//! A [`Dialect`] aggregates every table and strategy a query compiler needs
//! to emit SQL for one backend. It is assembled by a [`DialectBuilder`]
//! during a single-threaded setup phase and is immutable afterwards, so a
//! published dialect can be shared across threads without synchronization.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, trace};

use crate::batch::{BatchLoadSizingStrategy, StandardBatchLoadSizing};
use crate::cast::{CastMatrix, CastMatrixBuilder, CastType};
use crate::config::{Capabilities, DialectConfig, ResolutionInfo, Settings, TrimStyle};
use crate::ddl::{
    self, Column, Exporter, ForeignKey, Index, QualifiedName, Sequence, StandardForeignKeyExporter,
    StandardIndexExporter, StandardSequenceExporter, StandardTableExporter, Table, UniqueDelegate,
    UniqueKey,
};
use crate::error::{DialectError, Result};
use crate::functions::{FunctionRegistry, FunctionRegistryBuilder};
use crate::keywords::{KeywordSet, KeywordSetBuilder};
use crate::literal;
use crate::lock::{LockMode, LockOptions, Lockable, LockingStrategy};
use crate::pattern;
use crate::size::{Size, SizeStrategy, StandardSizeStrategy};
use crate::type_names::{self, TypeNames, TypeNamesBuilder};
use crate::types::{LanguageType, SqlTypeCode};

/// Which side(s) of a string `trim` strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimSpec {
    /// Leading characters.
    Leading,
    /// Trailing characters.
    Trailing,
    /// Both ends.
    Both,
}

impl TrimSpec {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Leading => "leading",
            Self::Trailing => "trailing",
            Self::Both => "both",
        }
    }

    const fn function(self) -> &'static str {
        match self {
            Self::Leading => "ltrim",
            Self::Trailing => "rtrim",
            Self::Both => "trim",
        }
    }
}

/// Registers the column type names shared by most backends.
pub fn register_standard_type_names(names: &mut TypeNamesBuilder) {
    use SqlTypeCode::*;

    names
        .register(Boolean, "boolean")
        .register(Bit, "bit")
        .register(Tinyint, "tinyint")
        .register(Smallint, "smallint")
        .register(Integer, "integer")
        .register(Bigint, "bigint")
        .register(Real, "real")
        .register(Float, "float($p)")
        .register(Double, "double precision")
        .register(Numeric, "numeric($p,$s)")
        .register(Decimal, "decimal($p,$s)")
        .register(Date, "date")
        .register(Time, "time")
        .register(TimeWithTimezone, "time with time zone")
        .register(Timestamp, "timestamp($p)")
        .register(TimestampWithTimezone, "timestamp($p) with time zone")
        .register(Binary, "binary($l)")
        .register(Varbinary, "varbinary($l)")
        .register(Blob, "blob")
        .register(Char, "char($l)")
        .register(Varchar, "varchar($l)")
        .register(Clob, "clob")
        .register(Nchar, "nchar($l)")
        .register(Nvarchar, "nvarchar($l)")
        .register(Nclob, "nclob");
}

/// Registers the language type names used to auto-detect scalar results.
pub fn register_standard_result_type_names(names: &mut TypeNamesBuilder) {
    use SqlTypeCode::*;

    names
        .register(Bit, "boolean")
        .register_with_capacity(Bit, 1, "boolean")
        .register_with_capacity(Bit, 8, "byte")
        .register_with_capacity(Bit, 16, "short")
        .register_with_capacity(Bit, 32, "integer")
        .register_with_capacity(Bit, 64, "long")
        .register(Boolean, "boolean")
        .register(Tinyint, "byte")
        .register(Smallint, "short")
        .register(Integer, "integer")
        .register(Bigint, "long")
        .register(Real, "float")
        .register(Float, "double")
        .register(Double, "double")
        .register(Numeric, "big_decimal")
        .register(Decimal, "big_decimal")
        .register(Date, "date")
        .register(Time, "time")
        .register(TimeWithTimezone, "offset_time")
        .register(Timestamp, "timestamp")
        .register(TimestampWithTimezone, "offset_datetime")
        .register(Binary, "binary")
        .register(Varbinary, "binary")
        .register(LongVarbinary, "binary")
        .register(Blob, "blob")
        .register_with_capacity(Char, 1, "character")
        .register(Char, "string")
        .register_with_capacity(Varchar, 1, "character")
        .register(Varchar, "string")
        .register(LongVarchar, "text")
        .register(Clob, "clob")
        .register_with_capacity(Nchar, 1, "character")
        .register(Nchar, "string")
        .register_with_capacity(Nvarchar, 1, "character")
        .register(Nvarchar, "string")
        .register(LongNvarchar, "ntext")
        .register(Nclob, "nclob");
}

/// Accumulates registrations for a [`Dialect`].
#[derive(Debug)]
pub struct DialectBuilder {
    config: DialectConfig,
    version: (u32, u32),
    type_names: TypeNamesBuilder,
    result_type_names: TypeNamesBuilder,
    keywords: KeywordSetBuilder,
    casts: CastMatrixBuilder,
    functions: FunctionRegistryBuilder,
    unique_delegate: UniqueDelegate,
    size_strategy: Option<Box<dyn SizeStrategy>>,
    batch_sizing: Option<Box<dyn BatchLoadSizingStrategy>>,
    in_list_ceiling: Option<i32>,
}

impl DialectBuilder {
    /// Creates a builder with empty tables.
    #[must_use]
    pub fn new(config: DialectConfig) -> Self {
        Self {
            config,
            version: (0, 0),
            type_names: TypeNamesBuilder::new(),
            result_type_names: TypeNamesBuilder::new(),
            keywords: KeywordSetBuilder::new(),
            casts: CastMatrixBuilder::new(),
            functions: FunctionRegistryBuilder::new(),
            unique_delegate: UniqueDelegate::default(),
            size_strategy: None,
            batch_sizing: None,
            in_list_ceiling: None,
        }
    }

    /// Creates a builder holding the standard registrations: type names
    /// first, then keywords, casts and functions.
    #[must_use]
    pub fn standard(config: DialectConfig) -> Self {
        let mut builder = Self::new(config);
        register_standard_type_names(&mut builder.type_names);
        register_standard_result_type_names(&mut builder.result_type_names);
        builder.keywords = KeywordSetBuilder::sql2003();
        builder.casts = CastMatrixBuilder::standard();
        builder.functions = FunctionRegistryBuilder::standard();
        builder
    }

    /// Applies what the backend reported about itself.
    pub fn resolution_info(&mut self, info: &ResolutionInfo) -> &mut Self {
        self.version = (info.major_version, info.minor_version);
        self.keywords.register_reported(&info.keywords);
        if let Some(ceiling) = info.in_list_ceiling {
            self.in_list_ceiling = Some(ceiling);
        }
        self
    }

    /// The configuration.
    pub fn config_mut(&mut self) -> &mut DialectConfig {
        &mut self.config
    }

    /// The column type-name table.
    pub fn type_names(&mut self) -> &mut TypeNamesBuilder {
        &mut self.type_names
    }

    /// The result type-name table.
    pub fn result_type_names(&mut self) -> &mut TypeNamesBuilder {
        &mut self.result_type_names
    }

    /// The keyword set.
    pub fn keywords(&mut self) -> &mut KeywordSetBuilder {
        &mut self.keywords
    }

    /// The cast matrix.
    pub fn casts(&mut self) -> &mut CastMatrixBuilder {
        &mut self.casts
    }

    /// The function registry.
    pub fn functions(&mut self) -> &mut FunctionRegistryBuilder {
        &mut self.functions
    }

    /// Sets the unique delegate.
    pub fn unique_delegate(&mut self, delegate: UniqueDelegate) -> &mut Self {
        self.unique_delegate = delegate;
        self
    }

    /// Replaces the size strategy.
    pub fn size_strategy(&mut self, strategy: Box<dyn SizeStrategy>) -> &mut Self {
        self.size_strategy = Some(strategy);
        self
    }

    /// Replaces the batch sizing strategy.
    pub fn batch_sizing(&mut self, strategy: Box<dyn BatchLoadSizingStrategy>) -> &mut Self {
        self.batch_sizing = Some(strategy);
        self
    }

    /// Freezes everything into a [`Dialect`].
    #[must_use]
    pub fn build(mut self) -> Dialect {
        if !self.config.capabilities.timestamp_arithmetic {
            self.functions
                .unregister("timestampadd")
                .unregister("timestampdiff")
                .unregister("dateadd")
                .unregister("datediff");
        }

        let dialect = Dialect {
            in_list_ceiling: self.in_list_ceiling.unwrap_or(self.config.in_list_ceiling),
            config: self.config,
            version: self.version,
            type_names: self.type_names.build(),
            result_type_names: self.result_type_names.build(),
            keywords: self.keywords.build(),
            casts: self.casts.build(),
            functions: self.functions.build(),
            unique_delegate: self.unique_delegate,
            size_strategy: self
                .size_strategy
                .unwrap_or_else(|| Box::new(StandardSizeStrategy)),
            batch_sizing: self
                .batch_sizing
                .unwrap_or_else(|| Box::new(StandardBatchLoadSizing::new())),
        };

        debug!(
            dialect = dialect.config.name,
            version = %format!("{}.{}", dialect.version.0, dialect.version.1),
            type_names = dialect.type_names.len(),
            keywords = dialect.keywords.len(),
            functions = dialect.functions.len(),
            in_list_ceiling = dialect.in_list_ceiling,
            "Dialect built"
        );
        dialect
    }
}

/// An immutable, thread-shareable backend dialect.
#[derive(Debug)]
pub struct Dialect {
    config: DialectConfig,
    version: (u32, u32),
    type_names: TypeNames,
    result_type_names: TypeNames,
    keywords: KeywordSet,
    casts: CastMatrix,
    functions: FunctionRegistry,
    unique_delegate: UniqueDelegate,
    size_strategy: Box<dyn SizeStrategy>,
    batch_sizing: Box<dyn BatchLoadSizingStrategy>,
    in_list_ceiling: i32,
}

impl Dialect {
    /// The generic ANSI dialect.
    #[must_use]
    pub fn standard() -> Self {
        DialectBuilder::standard(DialectConfig::STANDARD).build()
    }

    /// Short backend name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.config.name
    }

    /// Backend version as reported at startup.
    #[must_use]
    pub const fn version(&self) -> (u32, u32) {
        self.version
    }

    /// The full configuration.
    #[must_use]
    pub const fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// The capability predicates.
    #[must_use]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.config.capabilities
    }

    /// The keyword set.
    #[must_use]
    pub const fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// The column type-name table.
    #[must_use]
    pub const fn type_names(&self) -> &TypeNames {
        &self.type_names
    }

    /// The cast matrix.
    #[must_use]
    pub const fn casts(&self) -> &CastMatrix {
        &self.casts
    }

    /// The function registry.
    #[must_use]
    pub const fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// How unique constraints are declared.
    #[must_use]
    pub const fn unique_delegate(&self) -> UniqueDelegate {
        self.unique_delegate
    }

    /// Maximum number of parameters in one `in` list, `0` for no limit.
    #[must_use]
    pub const fn in_list_ceiling(&self) -> i32 {
        self.in_list_ceiling
    }

    // ------------------------------------------------------------------
    // Type names
    // ------------------------------------------------------------------

    /// Resolves the column type name for `code` at `size`.
    ///
    /// Long types without a mapping of their own fall back to their short
    /// counterpart (LONGVARCHAR to VARCHAR and so on).
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NoMapping`] when nothing is registered after
    /// the fallback chain.
    pub fn resolve_type_name(&self, code: SqlTypeCode, size: &Size) -> Result<String> {
        let mut current = code;
        loop {
            if let Some(name) = self.type_names.get(current, size) {
                return Ok(name);
            }
            match current.long_type_fallback() {
                Some(next) => {
                    trace!(from = %current, to = %next, "Falling back to short type mapping");
                    current = next;
                }
                None => {
                    return Err(DialectError::NoMapping {
                        code,
                        length: size.length,
                    })
                }
            }
        }
    }

    /// Like [`resolve_type_name`](Self::resolve_type_name), but fails if
    /// any size placeholder survives, as DDL must never contain one.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NoMapping`] or
    /// [`DialectError::UnresolvedPlaceholder`].
    pub fn ddl_type_name(&self, code: SqlTypeCode, size: &Size) -> Result<String> {
        let name = self.resolve_type_name(code, size)?;
        if type_names::has_placeholder(&name) {
            return Err(DialectError::UnresolvedPlaceholder {
                code,
                pattern: name,
            });
        }
        Ok(name)
    }

    /// Resolves `code` at the dialect's default size for it.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NoMapping`] when `code` is not registered.
    pub fn type_name_default(&self, code: SqlTypeCode) -> Result<String> {
        let size = self.size_for(code, code.default_language_type(), None, None, None);
        self.resolve_type_name(code, &size)
    }

    /// The registered default pattern for `code` without its size part,
    /// e.g. `varchar` for `varchar($l)`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NoMapping`] when `code` is not registered.
    pub fn raw_type_name(&self, code: SqlTypeCode) -> Result<&str> {
        let mut current = code;
        loop {
            if let Some(pattern) = self.type_names.get_default(current) {
                return Ok(type_names::raw_name(pattern));
            }
            current = current
                .long_type_fallback()
                .ok_or(DialectError::NoMapping { code, length: None })?;
        }
    }

    /// Returns whether `name` is a registered column type name.
    #[must_use]
    pub fn is_type_name_registered(&self, name: &str) -> bool {
        self.type_names.contains_type_name(name)
    }

    /// Computes the column size through the size strategy.
    #[must_use]
    pub fn size_for(
        &self,
        code: SqlTypeCode,
        language: LanguageType,
        precision: Option<u32>,
        scale: Option<u32>,
        length: Option<u64>,
    ) -> Size {
        self.size_strategy
            .resolve_size(code, language, precision, scale, length, &self.config.sizes)
    }

    /// The type name to use as the target of a `cast`.
    ///
    /// Without a length or precision the size strategy picks the size.
    /// Otherwise the given values are used, and a decimal cast given only a
    /// precision takes the language type's default scale.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NoMapping`] when `code` is not registered.
    pub fn cast_type_name(
        &self,
        code: SqlTypeCode,
        language: LanguageType,
        length: Option<u64>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Result<String> {
        let size = if length.is_none() && precision.is_none() {
            self.size_for(code, language, None, scale, None)
        } else {
            let scale = match (code, precision, scale) {
                (SqlTypeCode::Numeric | SqlTypeCode::Decimal, Some(_), None) => {
                    Some(self.config.sizes.default_scale(language))
                }
                _ => scale,
            };
            Size {
                length,
                precision,
                scale,
            }
        };
        self.resolve_type_name(code, &size)
    }

    /// The language type name of a scalar result column of `code`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NoMapping`] when no result type is registered.
    pub fn result_type_name(&self, code: SqlTypeCode, size: &Size) -> Result<String> {
        self.result_type_names
            .get(code, size)
            .ok_or(DialectError::NoMapping {
                code,
                length: size.length,
            })
    }

    /// The check constraint that keeps a boolean column to its two values,
    /// or `None` when the storage type already guarantees it.
    #[must_use]
    pub fn boolean_check_condition(&self, column: &str) -> Option<String> {
        match self.config.boolean_representation {
            CastType::IntegerBoolean => Some(format!("{column} in (0,1)")),
            CastType::YnBoolean => Some(format!("{column} in ('N','Y')")),
            CastType::TfBoolean => Some(format!("{column} in ('F','T')")),
            CastType::Boolean if !self.config.capabilities.native_boolean => {
                Some(format!("{column} in (0,1)"))
            }
            _ => None,
        }
    }

    /// Check constraint for an enum stored by name.
    #[must_use]
    pub fn enum_check_condition(&self, column: &str, values: &[&str]) -> String {
        let values = values
            .iter()
            .map(|v| literal::inline_literal(v))
            .collect::<Vec<_>>()
            .join(",");
        format!("{column} in ({values})")
    }

    /// Check constraint for an enum stored by ordinal.
    #[must_use]
    pub fn ordinal_check_condition(&self, column: &str, count: usize) -> String {
        format!("{column} between 0 and {}", count.saturating_sub(1))
    }

    // ------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------

    /// Returns whether `word` is reserved.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Quotes `name` with the dialect's quote characters.
    #[must_use]
    pub fn quote(&self, name: &str) -> String {
        self.config.quote.quote(name)
    }

    /// Quotes `name` only when it is a reserved word.
    #[must_use]
    pub fn quote_if_reserved(&self, name: &str) -> String {
        if self.is_keyword(name) {
            self.quote(name)
        } else {
            name.to_string()
        }
    }

    /// Renders an identifier: a backtick-quoted name is re-quoted with the
    /// dialect's quote characters, anything else is written as-is.
    #[must_use]
    pub fn render_identifier(&self, name: &str) -> String {
        match name.strip_prefix('`').and_then(|n| n.strip_suffix('`')) {
            Some(inner) => self.quote(inner),
            None => name.to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Casts and patterns
    // ------------------------------------------------------------------

    /// The pattern casting `from` to `to`.
    #[must_use]
    pub fn cast_pattern(&self, from: CastType, to: CastType) -> &str {
        self.casts.pattern(from, to)
    }

    /// Renders a cast of `operand` from `from` to `to`, using
    /// `target_type` for the generic `cast(... as ...)` form.
    #[must_use]
    pub fn cast_expression(
        &self,
        operand: &str,
        from: CastType,
        to: CastType,
        target_type: &str,
    ) -> String {
        pattern::render(self.cast_pattern(from, to), &[operand, target_type])
    }

    /// The `trim` pattern for `spec` and `character`, with `?1` for the operand.
    #[must_use]
    pub fn trim_pattern(&self, spec: TrimSpec, character: char) -> String {
        let quoted = if character == '\'' {
            "''''".to_string()
        } else {
            format!("'{character}'")
        };
        match self.config.trim {
            TrimStyle::Ansi if character == ' ' => format!("trim({} from ?1)", spec.keyword()),
            TrimStyle::Ansi => format!("trim({} {quoted} from ?1)", spec.keyword()),
            TrimStyle::Functions if character == ' ' => format!("{}(?1)", spec.function()),
            TrimStyle::Functions => format!("{}(?1,{quoted})", spec.function()),
        }
    }

    /// The `extract` pattern, `?1` is the unit and `?2` the operand.
    #[must_use]
    pub const fn extract_pattern(&self) -> &'static str {
        self.config.extract_pattern
    }

    /// Renders `extract(unit from operand)` in the dialect's form.
    #[must_use]
    pub fn render_extract(&self, unit: &str, operand: &str) -> String {
        pattern::render(self.config.extract_pattern, &[unit, operand])
    }

    /// Renders a call to a portable function.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownFunction`] or
    /// [`DialectError::FunctionArity`].
    pub fn render_function(&self, name: &str, args: &[&str]) -> Result<String> {
        self.functions.render(name, args)
    }

    // ------------------------------------------------------------------
    // Locking
    // ------------------------------------------------------------------

    /// The strategy used to lock a single row in `mode`.
    #[must_use]
    pub const fn locking_strategy(&self, mode: LockMode) -> LockingStrategy {
        LockingStrategy::for_mode(mode)
    }

    /// The statement locking `lockable` in `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error when the strategy cannot lock this row.
    pub fn lock_sql(
        &self,
        mode: LockMode,
        lockable: &Lockable,
        timeout: i32,
    ) -> Result<Option<String>> {
        self.locking_strategy(mode)
            .lock_sql(lockable, &self.config.locking, timeout)
    }

    /// The fragment appended to a query locked in `mode`.
    #[must_use]
    pub fn for_update_fragment(&self, mode: LockMode, timeout: i32) -> String {
        self.config.locking.for_update_fragment(mode, timeout)
    }

    /// The fragment for `options`, after taking the strongest alias mode.
    #[must_use]
    pub fn for_update_fragment_for(&self, options: &LockOptions) -> String {
        self.config.locking.for_update_fragment_for(options)
    }

    /// The fragment for `options`, naming `targets` in an `of` clause when
    /// supported.
    #[must_use]
    pub fn for_update_of(&self, options: &LockOptions, targets: &[&str]) -> String {
        self.config.locking.for_update_of(options, targets)
    }

    /// Decorates `table` with the backend's lock hint for `mode`.
    #[must_use]
    pub fn append_lock_hint(&self, mode: LockMode, table: &str) -> String {
        self.config.locking.append_lock_hint(mode, table)
    }

    // ------------------------------------------------------------------
    // Batching
    // ------------------------------------------------------------------

    /// The padded batch size for `key_count` keys over `key_columns` columns.
    #[must_use]
    pub fn batch_size(&self, key_columns: usize, key_count: usize) -> usize {
        self.batch_sizing
            .determine_optimal_batch_load_size(key_columns, key_count, self.in_list_ceiling)
    }

    /// Number of placeholders to bind for `key_count` values in an `in`
    /// list. Padding never drops a value: when the ceiling stops padding
    /// the exact count is used.
    #[must_use]
    pub fn in_list_placeholder_count(&self, key_count: usize, settings: &Settings) -> usize {
        if !settings.in_clause_parameter_padding || key_count == 0 {
            return key_count;
        }
        self.batch_size(1, key_count).max(key_count)
    }

    /// Renders `column in(?,...)` for `key_count` values. Lists longer than
    /// the ceiling are split into or-ed groups.
    #[must_use]
    pub fn render_in_list(&self, column: &str, key_count: usize, settings: &Settings) -> String {
        if key_count == 0 {
            return if self.config.capabilities.empty_in_list {
                format!("{column} in()")
            } else {
                "1=0".to_string()
            };
        }
        let count = self.in_list_placeholder_count(key_count, settings);
        let group = |n: usize| format!("{column} in({})", vec!["?"; n].join(","));

        match usize::try_from(self.in_list_ceiling) {
            Ok(ceiling) if ceiling > 0 && count > ceiling => {
                let groups = (0..count)
                    .step_by(ceiling)
                    .map(|start| group(ceiling.min(count - start)))
                    .collect::<Vec<_>>();
                format!("({})", groups.join(" or "))
            }
            _ => group(count),
        }
    }

    // ------------------------------------------------------------------
    // Literals and comments
    // ------------------------------------------------------------------

    /// The literal for a boolean value.
    #[must_use]
    pub const fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            self.config.true_literal
        } else {
            self.config.false_literal
        }
    }

    /// A quoted string literal.
    #[must_use]
    pub fn string_literal(&self, value: &str) -> String {
        literal::inline_literal(value)
    }

    /// A binary literal.
    #[must_use]
    pub fn binary_literal(&self, bytes: &[u8]) -> String {
        literal::binary_literal(bytes)
    }

    /// A date literal.
    #[must_use]
    pub fn date_literal(&self, date: NaiveDate) -> String {
        literal::date_literal(date, self.config.date_time_literals)
    }

    /// A time literal.
    #[must_use]
    pub fn time_literal(&self, time: NaiveTime) -> String {
        literal::time_literal(time, self.config.date_time_literals)
    }

    /// A timestamp literal.
    #[must_use]
    pub fn timestamp_literal(&self, timestamp: NaiveDateTime) -> String {
        literal::timestamp_literal(timestamp, self.config.date_time_literals)
    }

    /// A timestamp literal with offset.
    #[must_use]
    pub fn timestamp_with_offset_literal(&self, timestamp: DateTime<FixedOffset>) -> String {
        literal::timestamp_with_offset_literal(timestamp)
    }

    /// An interval literal.
    #[must_use]
    pub fn interval_literal(&self, duration: Duration) -> String {
        literal::interval_literal(duration)
    }

    /// Prefixes `sql` with `comment` when SQL comments are enabled.
    #[must_use]
    pub fn prepend_comment(&self, sql: &str, comment: &str, settings: &Settings) -> String {
        if settings.use_sql_comments {
            literal::prepend_comment(sql, comment)
        } else {
            sql.to_string()
        }
    }

    /// Applies optimizer hints to `sql`; backends without hint support
    /// return it unchanged.
    #[must_use]
    pub fn query_hint_string(&self, sql: &str, hints: &[&str]) -> String {
        if self.config.capabilities.query_hints {
            literal::optimizer_hint_comment(sql, hints)
        } else {
            sql.to_string()
        }
    }

    // ------------------------------------------------------------------
    // Miscellaneous values
    // ------------------------------------------------------------------

    /// Insert tail for a row without columns.
    #[must_use]
    pub const fn no_columns_insert_string(&self) -> &'static str {
        self.config.no_columns_insert
    }

    /// Maximum generated alias length.
    #[must_use]
    pub const fn max_alias_length(&self) -> usize {
        self.config.max_alias_length
    }

    /// Statement selecting the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] when the backend
    /// cannot select it.
    pub fn current_timestamp_select_string(&self) -> Result<&'static str> {
        if self.config.capabilities.current_timestamp_selection {
            Ok(self.config.current_timestamp_select)
        } else {
            Err(self.unsupported("current timestamp selection"))
        }
    }

    /// Type name for a ref-cursor out parameter.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] on backends without
    /// ref cursors.
    pub fn ref_cursor_type_name(&self) -> Result<&'static str> {
        match self.config.ref_cursor_type {
            Some(name) if self.config.capabilities.ref_cursors => Ok(name),
            _ => Err(self.unsupported("ref cursor results")),
        }
    }

    const fn unsupported(&self, capability: &'static str) -> DialectError {
        DialectError::UnsupportedCapability {
            dialect: self.config.name,
            capability,
        }
    }

    // ------------------------------------------------------------------
    // DDL
    // ------------------------------------------------------------------

    /// Statements creating `table`.
    ///
    /// # Errors
    ///
    /// Returns an error when a column type or feature cannot be expressed.
    pub fn create_table_strings(&self, table: &Table) -> Result<Vec<String>> {
        StandardTableExporter.sql_create_strings(table, self)
    }

    /// `drop table` for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::ConfigurationConflict`] when both `if exists`
    /// placements are enabled.
    pub fn drop_table_string(&self, name: &QualifiedName) -> Result<String> {
        StandardTableExporter::drop_table_string(name, self)
    }

    /// `alter table [if exists] <name>`.
    #[must_use]
    pub fn alter_table_string(&self, name: &QualifiedName) -> String {
        StandardTableExporter::alter_table_string(name, self)
    }

    /// Statement adding `column` to `table`.
    ///
    /// # Errors
    ///
    /// Returns an error without `alter table` support or when the column
    /// cannot be rendered.
    pub fn add_column_string(&self, table: &QualifiedName, column: &Column) -> Result<String> {
        StandardTableExporter::add_column_string(table, column, self)
    }

    /// Statements creating `sequence`.
    ///
    /// # Errors
    ///
    /// Returns an error on backends without (pooled) sequences.
    pub fn create_sequence_strings(&self, sequence: &Sequence) -> Result<Vec<String>> {
        StandardSequenceExporter.sql_create_strings(sequence, self)
    }

    /// Statements dropping `sequence`.
    ///
    /// # Errors
    ///
    /// Returns an error on backends without sequences.
    pub fn drop_sequence_strings(&self, sequence: &Sequence) -> Result<Vec<String>> {
        StandardSequenceExporter.sql_drop_strings(sequence, self)
    }

    /// The next-value expression for `sequence`.
    ///
    /// # Errors
    ///
    /// Returns an error on backends without sequences.
    pub fn sequence_next_value_string(&self, sequence: &str) -> Result<String> {
        StandardSequenceExporter::next_value_string(sequence, self)
    }

    /// A statement selecting the next value of `sequence`.
    ///
    /// # Errors
    ///
    /// Returns an error on backends without sequences.
    pub fn select_sequence_next_value_string(&self, sequence: &str) -> Result<String> {
        StandardSequenceExporter::select_next_value_string(sequence, self)
    }

    /// Statements creating `index`.
    ///
    /// # Errors
    ///
    /// Never fails for the standard exporter.
    pub fn create_index_strings(&self, index: &Index) -> Result<Vec<String>> {
        StandardIndexExporter.sql_create_strings(index, self)
    }

    /// Statements dropping `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::ConfigurationConflict`] when both `if exists`
    /// placements are enabled.
    pub fn drop_index_strings(&self, index: &Index) -> Result<Vec<String>> {
        StandardIndexExporter.sql_drop_strings(index, self)
    }

    /// Statements adding `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when foreign keys cannot be added after creation.
    pub fn add_foreign_key_strings(&self, key: &ForeignKey) -> Result<Vec<String>> {
        StandardForeignKeyExporter.sql_create_strings(key, self)
    }

    /// Statements dropping `key`; empty when constraints are not dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::ConfigurationConflict`] when both `if exists`
    /// placements are enabled for constraints.
    pub fn drop_foreign_key_strings(&self, key: &ForeignKey) -> Result<Vec<String>> {
        StandardForeignKeyExporter.sql_drop_strings(key, self)
    }

    /// Statements adding `key` to an existing table.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot alter tables.
    pub fn add_unique_key_strings(&self, key: &UniqueKey) -> Result<Vec<String>> {
        self.unique_delegate.sql_create_strings(key, self)
    }

    /// Statements dropping `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot alter tables.
    pub fn drop_unique_key_strings(&self, key: &UniqueKey) -> Result<Vec<String>> {
        self.unique_delegate.sql_drop_strings(key, self)
    }

    /// Statements creating schema `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] without schema support.
    pub fn create_schema_strings(&self, name: &str) -> Result<Vec<String>> {
        ddl::create_schema(name, self)
    }

    /// Statements dropping schema `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] without schema support.
    pub fn drop_schema_strings(&self, name: &str) -> Result<Vec<String>> {
        ddl::drop_schema(name, self)
    }

    /// Statements creating catalog `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] without catalog support.
    pub fn create_catalog_strings(&self, name: &str) -> Result<Vec<String>> {
        ddl::create_catalog(name, self)
    }

    /// Statements dropping catalog `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] without catalog support.
    pub fn drop_catalog_strings(&self, name: &str) -> Result<Vec<String>> {
        ddl::drop_catalog(name, self)
    }
}
