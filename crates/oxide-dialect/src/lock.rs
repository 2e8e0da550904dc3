//! Lock modes, lock clause generation and row-locking strategies.
//!
//! Two independent mappings hang off [`LockMode`]: one picks the
//! [`LockingStrategy`] used to acquire a lock on a single row, the other
//! picks the `for update` style fragment appended to a query.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;

use crate::error::{DialectError, Result};

/// Requested lock strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockMode {
    /// No lock; the row may come from a cache.
    None,
    /// Read without locking, but verify the version against the database.
    Read,
    /// Verify the version at the end of the transaction.
    Optimistic,
    /// Increment the version at the end of the transaction.
    OptimisticForceIncrement,
    /// `select ... for update`.
    Upgrade,
    /// `select ... for update nowait`.
    UpgradeNowait,
    /// `select ... for update skip locked`.
    UpgradeSkipLocked,
    /// Held internally after an insert or update.
    Write,
    /// Shared pessimistic lock.
    PessimisticRead,
    /// Exclusive pessimistic lock.
    PessimisticWrite,
    /// Like `UpgradeNowait`, and the version is incremented.
    Force,
    /// Exclusive lock with an immediate version increment.
    PessimisticForceIncrement,
}

impl LockMode {
    /// Every lock mode, weakest first.
    pub const ALL: [Self; 12] = [
        Self::None,
        Self::Read,
        Self::Optimistic,
        Self::OptimisticForceIncrement,
        Self::Upgrade,
        Self::UpgradeNowait,
        Self::UpgradeSkipLocked,
        Self::Write,
        Self::PessimisticRead,
        Self::PessimisticWrite,
        Self::Force,
        Self::PessimisticForceIncrement,
    ];

    /// Numeric strength used to order lock modes.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Read => 5,
            Self::Optimistic => 6,
            Self::OptimisticForceIncrement => 7,
            Self::Upgrade | Self::UpgradeNowait | Self::UpgradeSkipLocked | Self::Write => 10,
            Self::PessimisticRead => 12,
            Self::PessimisticWrite => 13,
            Self::Force => 15,
            Self::PessimisticForceIncrement => 17,
        }
    }

    /// Returns whether this mode is strictly stronger than `other`.
    #[must_use]
    pub const fn greater_than(self, other: Self) -> bool {
        self.level() > other.level()
    }

    /// Returns whether this mode is strictly weaker than `other`.
    #[must_use]
    pub const fn less_than(self, other: Self) -> bool {
        self.level() < other.level()
    }

    /// The stronger of two modes. On a tie `self` is kept.
    #[must_use]
    pub const fn stronger(self, other: Self) -> Self {
        if other.greater_than(self) {
            other
        } else {
            self
        }
    }

    /// External name, e.g. `pessimistic_write`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Optimistic => "optimistic",
            Self::OptimisticForceIncrement => "optimistic_force_increment",
            Self::Upgrade => "upgrade",
            Self::UpgradeNowait => "upgrade_nowait",
            Self::UpgradeSkipLocked => "upgrade_skiplocked",
            Self::Write => "write",
            Self::PessimisticRead => "pessimistic_read",
            Self::PessimisticWrite => "pessimistic_write",
            Self::Force => "force",
            Self::PessimisticForceIncrement => "pessimistic_force_increment",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LockMode {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        let wanted = match wanted.as_str() {
            "upgrade_skip_locked" => "upgrade_skiplocked".to_string(),
            _ => wanted,
        };
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| DialectError::UnknownName {
                kind: "lock mode",
                name: s.to_string(),
            })
    }
}

/// A lock request: a mode, a timeout and optional per-alias modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOptions {
    /// The statement-wide lock mode.
    pub lock_mode: LockMode,
    /// Timeout in milliseconds, or one of the sentinels below.
    pub timeout: i32,
    /// Lock modes requested for individual aliases.
    pub aliases: BTreeMap<String, LockMode>,
}

impl LockOptions {
    /// Wait as long as the backend allows.
    pub const WAIT_FOREVER: i32 = -1;
    /// Fail immediately if the row is locked.
    pub const NO_WAIT: i32 = 0;
    /// Skip rows that are already locked.
    pub const SKIP_LOCKED: i32 = -2;

    /// Creates options for `lock_mode` that wait forever.
    #[must_use]
    pub const fn new(lock_mode: LockMode) -> Self {
        Self {
            lock_mode,
            timeout: Self::WAIT_FOREVER,
            aliases: BTreeMap::new(),
        }
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: i32) -> Self {
        self.timeout = timeout;
        self
    }

    /// Requests `mode` for `alias`.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, mode: LockMode) -> Self {
        self.aliases.insert(alias.into(), mode);
        self
    }

    /// The strongest mode across the statement-wide and per-alias requests.
    #[must_use]
    pub fn effective_lock_mode(&self) -> LockMode {
        self.aliases
            .iter()
            .fold(self.lock_mode, |current, (alias, &mode)| {
                let next = current.stronger(mode);
                if next != current {
                    trace!(alias = alias.as_str(), from = %current, to = %next, "Lock mode escalated");
                }
                next
            })
    }
}

impl Default for LockOptions {
    fn default() -> Self {
        Self::new(LockMode::None)
    }
}

/// How `for update of ...` names the rows to lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLockStrategy {
    /// `of` clauses are not supported.
    #[default]
    None,
    /// `for update of t.col`.
    Column,
    /// `for update of t`.
    Table,
}

/// Backend lock clause text.
///
/// An absent suffix means the backend lacks the feature, in which case the
/// plain `for update` clause is used instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockClauses {
    /// The `for update` clause, with a leading space. Empty when the
    /// backend has no such clause.
    pub for_update: &'static str,
    /// The shared-lock clause, if distinct from `for_update`.
    pub for_share: Option<&'static str>,
    /// Appended for no-wait locking.
    pub nowait: Option<&'static str>,
    /// Appended for skip-locked locking.
    pub skip_locked: Option<&'static str>,
    /// Appended before a timeout expressed in seconds.
    pub wait: Option<&'static str>,
    /// How `for update of` names rows.
    pub row_lock_strategy: RowLockStrategy,
    /// Table hint for exclusive locks.
    pub write_hint: Option<&'static str>,
    /// Table hint for shared locks.
    pub read_hint: Option<&'static str>,
    /// Whether `for update` may appear together with `order by`.
    pub supports_with_order_by: bool,
}

impl LockClauses {
    /// Plain `for update` and nothing else.
    pub const STANDARD: Self = Self {
        for_update: " for update",
        for_share: None,
        nowait: None,
        skip_locked: None,
        wait: None,
        row_lock_strategy: RowLockStrategy::None,
        write_hint: None,
        read_hint: None,
        supports_with_order_by: true,
    };

    /// No row locking at all.
    pub const NONE: Self = Self {
        for_update: "",
        for_share: None,
        nowait: None,
        skip_locked: None,
        wait: None,
        row_lock_strategy: RowLockStrategy::None,
        write_hint: None,
        read_hint: None,
        supports_with_order_by: false,
    };

    /// Returns whether the backend has a `for update` clause.
    #[must_use]
    pub const fn supports_for_update(&self) -> bool {
        !self.for_update.is_empty()
    }

    /// Returns whether the backend accepts a lock timeout.
    #[must_use]
    pub const fn supports_lock_timeouts(&self) -> bool {
        self.wait.is_some()
    }

    /// Returns whether the backend can fail fast on locked rows.
    #[must_use]
    pub const fn supports_nowait(&self) -> bool {
        self.nowait.is_some()
    }

    /// Returns whether the backend can skip locked rows.
    #[must_use]
    pub const fn supports_skip_locked(&self) -> bool {
        self.skip_locked.is_some()
    }

    /// The exclusive lock clause for `timeout`.
    #[must_use]
    pub fn write_lock(&self, timeout: i32) -> String {
        self.with_timeout(self.for_update, timeout)
    }

    /// The shared lock clause for `timeout`.
    #[must_use]
    pub fn read_lock(&self, timeout: i32) -> String {
        self.with_timeout(self.for_share.unwrap_or(self.for_update), timeout)
    }

    /// `for update` with the no-wait suffix, when supported.
    #[must_use]
    pub fn for_update_nowait(&self) -> String {
        suffixed(self.for_update, self.nowait)
    }

    /// `for update` with the skip-locked suffix, when supported.
    #[must_use]
    pub fn for_update_skip_locked(&self) -> String {
        suffixed(self.for_update, self.skip_locked)
    }

    /// The fragment to append to a query for `mode`.
    #[must_use]
    pub fn for_update_fragment(&self, mode: LockMode, timeout: i32) -> String {
        match mode {
            LockMode::Upgrade => self.for_update.to_string(),
            LockMode::PessimisticRead => self.read_lock(timeout),
            LockMode::PessimisticWrite => self.write_lock(timeout),
            LockMode::UpgradeNowait | LockMode::Force | LockMode::PessimisticForceIncrement => {
                self.for_update_nowait()
            }
            LockMode::UpgradeSkipLocked => self.for_update_skip_locked(),
            LockMode::None
            | LockMode::Read
            | LockMode::Optimistic
            | LockMode::OptimisticForceIncrement
            | LockMode::Write => String::new(),
        }
    }

    /// The fragment for `options`, using the strongest requested mode.
    #[must_use]
    pub fn for_update_fragment_for(&self, options: &LockOptions) -> String {
        self.for_update_fragment(options.effective_lock_mode(), options.timeout)
    }

    /// Like [`for_update_fragment_for`](Self::for_update_fragment_for), but
    /// names what to lock with `of <targets>` when the backend supports it.
    /// `targets` are column references or table aliases depending on the
    /// row lock strategy.
    #[must_use]
    pub fn for_update_of(&self, options: &LockOptions, targets: &[&str]) -> String {
        let fragment = self.for_update_fragment_for(options);
        if fragment.is_empty()
            || targets.is_empty()
            || self.row_lock_strategy == RowLockStrategy::None
        {
            return fragment;
        }
        for keyword in [self.for_share.unwrap_or(""), self.for_update] {
            if keyword.is_empty() {
                continue;
            }
            if let Some(rest) = fragment.strip_prefix(keyword) {
                return format!("{keyword} of {}{rest}", targets.join(", "));
            }
        }
        fragment
    }

    /// Decorates `table` with a lock hint, for backends that lock through
    /// table hints rather than a trailing clause.
    #[must_use]
    pub fn append_lock_hint(&self, mode: LockMode, table: &str) -> String {
        let hint = match mode {
            LockMode::PessimisticRead => self.read_hint,
            m if m.greater_than(LockMode::Read) => self.write_hint,
            _ => None,
        };
        match hint {
            Some(hint) => format!("{table} {hint}"),
            None => table.to_string(),
        }
    }

    fn with_timeout(&self, base: &str, timeout: i32) -> String {
        if base.is_empty() {
            return String::new();
        }
        match timeout {
            LockOptions::NO_WAIT => suffixed(base, self.nowait),
            LockOptions::SKIP_LOCKED => suffixed(base, self.skip_locked),
            t if t > 0 => match self.wait {
                Some(wait) => format!("{base}{wait}{}", millis_to_seconds(t)),
                None => base.to_string(),
            },
            _ => base.to_string(),
        }
    }
}

impl Default for LockClauses {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn suffixed(base: &str, suffix: Option<&str>) -> String {
    if base.is_empty() {
        return String::new();
    }
    format!("{base}{}", suffix.unwrap_or(""))
}

const fn millis_to_seconds(millis: i32) -> i32 {
    millis.saturating_add(500) / 1000
}

/// A row that can be locked: its table, id columns and optional version column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockable {
    /// Table name.
    pub table: String,
    /// Identifier columns.
    pub id_columns: Vec<String>,
    /// Version column, for versioned rows.
    pub version_column: Option<String>,
}

impl Lockable {
    /// Creates a lockable with a single id column.
    #[must_use]
    pub fn new(table: impl Into<String>, id_column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            id_columns: vec![id_column.into()],
            version_column: None,
        }
    }

    /// Sets the version column.
    #[must_use]
    pub fn versioned(mut self, column: impl Into<String>) -> Self {
        self.version_column = Some(column.into());
        self
    }

    fn restriction(&self) -> String {
        self.id_columns
            .iter()
            .chain(self.version_column.iter())
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

/// How a lock on a single row is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockingStrategy {
    /// `select` with the fragment for the given mode (none for weak modes).
    Select(LockMode),
    /// `select` with a shared lock.
    PessimisticReadSelect,
    /// `select` with an exclusive lock.
    PessimisticWriteSelect,
    /// Immediate version increment through an `update`.
    PessimisticForceIncrement,
    /// Version check deferred to the end of the transaction.
    Optimistic,
    /// Version increment deferred to the end of the transaction.
    OptimisticForceIncrement,
}

impl LockingStrategy {
    /// Picks the strategy for `mode`.
    #[must_use]
    pub const fn for_mode(mode: LockMode) -> Self {
        match mode {
            LockMode::PessimisticForceIncrement => Self::PessimisticForceIncrement,
            LockMode::PessimisticWrite => Self::PessimisticWriteSelect,
            LockMode::PessimisticRead => Self::PessimisticReadSelect,
            LockMode::Optimistic => Self::Optimistic,
            LockMode::OptimisticForceIncrement => Self::OptimisticForceIncrement,
            other => Self::Select(other),
        }
    }

    /// Renders the statement that acquires the lock, or `None` when the
    /// strategy issues no SQL at lock time.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::ConfigurationConflict`] when a force-increment
    /// is requested for a row without a version column.
    pub fn lock_sql(
        &self,
        lockable: &Lockable,
        clauses: &LockClauses,
        timeout: i32,
    ) -> Result<Option<String>> {
        let mode = match *self {
            Self::Optimistic | Self::OptimisticForceIncrement => return Ok(None),
            Self::PessimisticForceIncrement => {
                let version = lockable.version_column.as_deref().ok_or_else(|| {
                    DialectError::ConfigurationConflict(format!(
                        "{} requires a version column on {}",
                        LockMode::PessimisticForceIncrement,
                        lockable.table
                    ))
                })?;
                let ids = lockable
                    .id_columns
                    .iter()
                    .map(|c| format!("{c} = ?"))
                    .collect::<Vec<_>>()
                    .join(" and ");
                return Ok(Some(format!(
                    "update {} set {version} = ? where {ids} and {version} = ?",
                    lockable.table
                )));
            }
            Self::PessimisticReadSelect => LockMode::PessimisticRead,
            Self::PessimisticWriteSelect => LockMode::PessimisticWrite,
            Self::Select(mode) => mode,
        };

        let mut sql = format!(
            "select {} from {} where {}",
            lockable.id_columns.join(", "),
            clauses.append_lock_hint(mode, &lockable.table),
            lockable.restriction()
        );
        sql.push_str(&clauses.for_update_fragment(mode, timeout));
        Ok(Some(sql))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PG_LIKE: LockClauses = LockClauses {
        for_share: Some(" for share"),
        nowait: Some(" nowait"),
        skip_locked: Some(" skip locked"),
        row_lock_strategy: RowLockStrategy::Table,
        ..LockClauses::STANDARD
    };

    const ORACLE_LIKE: LockClauses = LockClauses {
        nowait: Some(" nowait"),
        skip_locked: Some(" skip locked"),
        wait: Some(" wait "),
        row_lock_strategy: RowLockStrategy::Column,
        ..LockClauses::STANDARD
    };

    #[test]
    fn test_lock_levels_order() {
        assert!(LockMode::PessimisticWrite.greater_than(LockMode::PessimisticRead));
        assert!(LockMode::Read.less_than(LockMode::Write));
        assert!(!LockMode::Upgrade.greater_than(LockMode::Write));
        assert_eq!(
            LockMode::PessimisticRead.stronger(LockMode::Force),
            LockMode::Force
        );
        assert_eq!(
            LockMode::Upgrade.stronger(LockMode::Write),
            LockMode::Upgrade
        );
    }

    #[test]
    fn test_parse_lock_mode() {
        assert_eq!(
            "PESSIMISTIC_WRITE".parse::<LockMode>().unwrap(),
            LockMode::PessimisticWrite
        );
        assert_eq!(
            "upgrade-skip-locked".parse::<LockMode>().unwrap(),
            LockMode::UpgradeSkipLocked
        );
        assert!("exclusive".parse::<LockMode>().is_err());
    }

    #[test]
    fn test_standard_fragments() {
        let c = LockClauses::STANDARD;
        assert_eq!(c.for_update_fragment(LockMode::Upgrade, -1), " for update");
        assert_eq!(c.for_update_fragment(LockMode::PessimisticRead, 0), " for update");
        assert_eq!(c.for_update_fragment(LockMode::UpgradeNowait, -1), " for update");
        assert_eq!(c.for_update_fragment(LockMode::Read, -1), "");
        assert_eq!(c.for_update_fragment(LockMode::Optimistic, -1), "");
    }

    #[test]
    fn test_timeout_variants() {
        assert_eq!(PG_LIKE.read_lock(LockOptions::WAIT_FOREVER), " for share");
        assert_eq!(PG_LIKE.read_lock(LockOptions::NO_WAIT), " for share nowait");
        assert_eq!(
            PG_LIKE.write_lock(LockOptions::SKIP_LOCKED),
            " for update skip locked"
        );
        // no wait suffix: timeout ignored
        assert_eq!(PG_LIKE.write_lock(3000), " for update");
        assert_eq!(ORACLE_LIKE.write_lock(2400), " for update wait 2");
        assert_eq!(ORACLE_LIKE.write_lock(2500), " for update wait 3");
    }

    #[test]
    fn test_largest_timeout_rounds_without_overflow() {
        assert_eq!(
            ORACLE_LIKE.write_lock(i32::MAX),
            " for update wait 2147483"
        );
        assert_eq!(ORACLE_LIKE.write_lock(i32::MAX - 400), " for update wait 2147483");
    }

    #[test]
    fn test_nowait_and_skip_locked_modes() {
        assert_eq!(
            PG_LIKE.for_update_fragment(LockMode::Force, -1),
            " for update nowait"
        );
        assert_eq!(
            PG_LIKE.for_update_fragment(LockMode::PessimisticForceIncrement, -1),
            " for update nowait"
        );
        assert_eq!(
            PG_LIKE.for_update_fragment(LockMode::UpgradeSkipLocked, -1),
            " for update skip locked"
        );
    }

    #[test]
    fn test_alias_maximum() {
        let options = LockOptions::new(LockMode::None)
            .with_alias("a", LockMode::PessimisticRead)
            .with_alias("b", LockMode::PessimisticWrite);
        assert_eq!(options.effective_lock_mode(), LockMode::PessimisticWrite);
        assert_eq!(
            PG_LIKE.for_update_fragment_for(&options),
            PG_LIKE.for_update_fragment(LockMode::PessimisticWrite, options.timeout)
        );
    }

    #[test]
    fn test_for_update_of() {
        let options = LockOptions::new(LockMode::PessimisticRead).with_timeout(LockOptions::NO_WAIT);
        assert_eq!(
            PG_LIKE.for_update_of(&options, &["p", "c"]),
            " for share of p, c nowait"
        );
        let options = LockOptions::new(LockMode::PessimisticWrite).with_timeout(5000);
        assert_eq!(
            ORACLE_LIKE.for_update_of(&options, &["p.id"]),
            " for update of p.id wait 5"
        );
        assert_eq!(
            LockClauses::STANDARD.for_update_of(&options, &["p"]),
            " for update"
        );
    }

    #[test]
    fn test_no_for_update_support() {
        let c = LockClauses::NONE;
        assert_eq!(c.for_update_fragment(LockMode::UpgradeNowait, -1), "");
        assert_eq!(c.write_lock(LockOptions::NO_WAIT), "");
        assert!(!c.supports_for_update());
    }

    #[test]
    fn test_lock_hint() {
        let c = LockClauses {
            for_update: "",
            write_hint: Some("with (updlock, holdlock, rowlock)"),
            read_hint: Some("with (holdlock, rowlock)"),
            ..LockClauses::STANDARD
        };
        assert_eq!(
            c.append_lock_hint(LockMode::PessimisticWrite, "book"),
            "book with (updlock, holdlock, rowlock)"
        );
        assert_eq!(
            c.append_lock_hint(LockMode::PessimisticRead, "book"),
            "book with (holdlock, rowlock)"
        );
        assert_eq!(c.append_lock_hint(LockMode::Read, "book"), "book");
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(
            LockingStrategy::for_mode(LockMode::PessimisticForceIncrement),
            LockingStrategy::PessimisticForceIncrement
        );
        assert_eq!(
            LockingStrategy::for_mode(LockMode::Optimistic),
            LockingStrategy::Optimistic
        );
        assert_eq!(
            LockingStrategy::for_mode(LockMode::UpgradeNowait),
            LockingStrategy::Select(LockMode::UpgradeNowait)
        );
    }

    #[test]
    fn test_strategy_sql() {
        let row = Lockable::new("book", "id").versioned("version");
        let sql = LockingStrategy::for_mode(LockMode::PessimisticWrite)
            .lock_sql(&row, &PG_LIKE, LockOptions::NO_WAIT)
            .unwrap();
        assert_eq!(
            sql.as_deref(),
            Some("select id from book where id = ? and version = ? for update nowait")
        );

        let sql = LockingStrategy::for_mode(LockMode::Read)
            .lock_sql(&row, &PG_LIKE, -1)
            .unwrap();
        assert_eq!(
            sql.as_deref(),
            Some("select id from book where id = ? and version = ?")
        );

        let sql = LockingStrategy::for_mode(LockMode::PessimisticForceIncrement)
            .lock_sql(&row, &PG_LIKE, -1)
            .unwrap();
        assert_eq!(
            sql.as_deref(),
            Some("update book set version = ? where id = ? and version = ?")
        );

        let sql = LockingStrategy::for_mode(LockMode::OptimisticForceIncrement)
            .lock_sql(&row, &PG_LIKE, -1)
            .unwrap();
        assert!(sql.is_none());
    }

    #[test]
    fn test_force_increment_requires_version() {
        let row = Lockable::new("book", "id");
        let err = LockingStrategy::PessimisticForceIncrement
            .lock_sql(&row, &LockClauses::STANDARD, -1)
            .unwrap_err();
        assert!(matches!(err, DialectError::ConfigurationConflict(_)));
    }
}
