//! Emulation patterns for casts a backend cannot perform natively.
//!
//! Booleans are stored in several representations (native, `0`/`1`,
//! `'Y'`/`'N'`, `'T'`/`'F'`). Converting between them, or to and from
//! strings and integers, needs a `case` expression rather than `cast()`.
//! The [`CastMatrix`] is an explicit (from, to) lookup table built once per
//! dialect; a pair with no entry takes the generic `cast(?1 as ?2)`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DialectError;
use crate::types::SqlTypeCode;

/// The generic cast, used for every pair not in the table.
pub const GENERIC_CAST: &str = "cast(?1 as ?2)";

/// How a value is represented, for the purposes of casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CastType {
    /// Character string.
    String,
    /// Character large object.
    Clob,
    /// Native boolean.
    Boolean,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Long,
    /// Boolean stored as `0`/`1`.
    IntegerBoolean,
    /// Boolean stored as `'Y'`/`'N'`.
    YnBoolean,
    /// Boolean stored as `'T'`/`'F'`.
    TfBoolean,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Exact numeric.
    Fixed,
    /// Date.
    Date,
    /// Time.
    Time,
    /// Timestamp.
    Timestamp,
    /// Timestamp with offset.
    OffsetTimestamp,
    /// Anything else.
    Other,
}

impl CastType {
    /// The representation families the emulation table covers.
    pub const BOOLEAN_FAMILIES: [Self; 7] = [
        Self::String,
        Self::Boolean,
        Self::Integer,
        Self::Long,
        Self::IntegerBoolean,
        Self::YnBoolean,
        Self::TfBoolean,
    ];

    /// Picks the cast type for a column of `code`.
    #[must_use]
    pub const fn from_code(code: SqlTypeCode) -> Self {
        match code {
            SqlTypeCode::Boolean | SqlTypeCode::Bit => Self::Boolean,
            SqlTypeCode::Tinyint | SqlTypeCode::Smallint | SqlTypeCode::Integer => Self::Integer,
            SqlTypeCode::Bigint => Self::Long,
            SqlTypeCode::Real | SqlTypeCode::Float => Self::Float,
            SqlTypeCode::Double => Self::Double,
            SqlTypeCode::Numeric | SqlTypeCode::Decimal => Self::Fixed,
            SqlTypeCode::Date => Self::Date,
            SqlTypeCode::Time | SqlTypeCode::TimeWithTimezone => Self::Time,
            SqlTypeCode::Timestamp => Self::Timestamp,
            SqlTypeCode::TimestampWithTimezone => Self::OffsetTimestamp,
            SqlTypeCode::Char
            | SqlTypeCode::Varchar
            | SqlTypeCode::LongVarchar
            | SqlTypeCode::Nchar
            | SqlTypeCode::Nvarchar
            | SqlTypeCode::LongNvarchar => Self::String,
            SqlTypeCode::Clob | SqlTypeCode::Nclob => Self::Clob,
            SqlTypeCode::Binary
            | SqlTypeCode::Varbinary
            | SqlTypeCode::LongVarbinary
            | SqlTypeCode::Blob => Self::Other,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Clob => "CLOB",
            Self::Boolean => "BOOLEAN",
            Self::Integer => "INTEGER",
            Self::Long => "LONG",
            Self::IntegerBoolean => "INTEGER_BOOLEAN",
            Self::YnBoolean => "YN_BOOLEAN",
            Self::TfBoolean => "TF_BOOLEAN",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Fixed => "FIXED",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::OffsetTimestamp => "OFFSET_TIMESTAMP",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CastType {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [CastType; 16] = [
            CastType::String,
            CastType::Clob,
            CastType::Boolean,
            CastType::Integer,
            CastType::Long,
            CastType::IntegerBoolean,
            CastType::YnBoolean,
            CastType::TfBoolean,
            CastType::Float,
            CastType::Double,
            CastType::Fixed,
            CastType::Date,
            CastType::Time,
            CastType::Timestamp,
            CastType::OffsetTimestamp,
            CastType::Other,
        ];
        let wanted = s.trim().replace('-', "_").to_ascii_uppercase();
        ALL.into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| DialectError::UnknownName {
                kind: "cast type",
                name: s.to_string(),
            })
    }
}

// Shared cells: several (from, to) pairs map to the same text.
const YN_TO_INT: &str = "case ?1 when 'Y' then 1 when 'N' then 0 else null end";
const TF_TO_INT: &str = "case ?1 when 'T' then 1 when 'F' then 0 else null end";
const BOOL_TO_INT: &str = "case ?1 when true then 1 when false then 0 else null end";
const INT_TO_YN: &str = "case abs(sign(?1)) when 1 then 'Y' when 0 then 'N' else null end";
const INT_TO_TF: &str = "case abs(sign(?1)) when 1 then 'T' when 0 then 'F' else null end";

/// Builder for a [`CastMatrix`].
#[derive(Debug, Clone, Default)]
pub struct CastMatrixBuilder {
    cells: HashMap<(CastType, CastType), String>,
}

impl CastMatrixBuilder {
    /// Creates an empty builder (every pair is generic).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding the standard boolean emulation table.
    #[must_use]
    pub fn standard() -> Self {
        use CastType::{Boolean, Integer, IntegerBoolean, Long, String, TfBoolean, YnBoolean};

        let mut b = Self::new();

        // to STRING
        b.set(
            IntegerBoolean,
            String,
            "case ?1 when 1 then 'true' when 0 then 'false' else null end",
        );
        b.set(
            YnBoolean,
            String,
            "case ?1 when 'Y' then 'true' when 'N' then 'false' else null end",
        );
        b.set(
            TfBoolean,
            String,
            "case ?1 when 'T' then 'true' when 'F' then 'false' else null end",
        );

        // to INTEGER / LONG
        for to in [Integer, Long] {
            b.set(YnBoolean, to, YN_TO_INT);
            b.set(TfBoolean, to, TF_TO_INT);
            b.set(Boolean, to, BOOL_TO_INT);
        }

        // to INTEGER_BOOLEAN
        b.set(
            String,
            IntegerBoolean,
            "case ?1 when 'T' then 1 when 'Y' then 1 when 'F' then 0 when 'N' then 0 else null end",
        );
        b.set(Integer, IntegerBoolean, "abs(sign(?1))");
        b.set(Long, IntegerBoolean, "abs(sign(?1))");
        b.set(YnBoolean, IntegerBoolean, YN_TO_INT);
        b.set(TfBoolean, IntegerBoolean, TF_TO_INT);
        b.set(Boolean, IntegerBoolean, BOOL_TO_INT);

        // to YN_BOOLEAN
        b.set(
            String,
            YnBoolean,
            "case ?1 when 'T' then 'Y' when 'Y' then 'Y' when 'F' then 'N' when 'N' then 'N' else null end",
        );
        b.set(
            IntegerBoolean,
            YnBoolean,
            "case ?1 when 1 then 'Y' when 0 then 'N' else null end",
        );
        b.set(Integer, YnBoolean, INT_TO_YN);
        b.set(Long, YnBoolean, INT_TO_YN);
        b.set(
            TfBoolean,
            YnBoolean,
            "case ?1 when 'T' then 'Y' when 'F' then 'N' else null end",
        );
        b.set(
            Boolean,
            YnBoolean,
            "case ?1 when true then 'Y' when false then 'N' else null end",
        );

        // to TF_BOOLEAN
        b.set(
            String,
            TfBoolean,
            "case ?1 when 'T' then 'T' when 'Y' then 'T' when 'F' then 'F' when 'N' then 'F' else null end",
        );
        b.set(
            IntegerBoolean,
            TfBoolean,
            "case ?1 when 1 then 'T' when 0 then 'F' else null end",
        );
        b.set(Integer, TfBoolean, INT_TO_TF);
        b.set(Long, TfBoolean, INT_TO_TF);
        b.set(
            YnBoolean,
            TfBoolean,
            "case ?1 when 'Y' then 'T' when 'N' then 'F' else null end",
        );
        b.set(
            Boolean,
            TfBoolean,
            "case ?1 when true then 'T' when false then 'F' else null end",
        );

        // to BOOLEAN
        b.set(
            String,
            Boolean,
            "case ?1 when 'T' then true when 'Y' then true when 'F' then false when 'N' then false else null end",
        );
        b.set(IntegerBoolean, Boolean, "(?1<>0)");
        b.set(Integer, Boolean, "(?1<>0)");
        b.set(Long, Boolean, "(?1<>0)");
        b.set(YnBoolean, Boolean, "(?1<>'N')");
        b.set(TfBoolean, Boolean, "(?1<>'F')");

        b
    }

    /// Sets the pattern for one cell.
    pub fn set(&mut self, from: CastType, to: CastType, pattern: impl Into<String>) -> &mut Self {
        self.cells.insert((from, to), pattern.into());
        self
    }

    /// Makes a cell take the generic cast.
    pub fn clear(&mut self, from: CastType, to: CastType) -> &mut Self {
        self.cells.remove(&(from, to));
        self
    }

    /// Freezes the table.
    #[must_use]
    pub fn build(self) -> CastMatrix {
        CastMatrix { cells: self.cells }
    }
}

/// An immutable (from, to) → pattern table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastMatrix {
    cells: HashMap<(CastType, CastType), String>,
}

impl CastMatrix {
    /// The standard table.
    #[must_use]
    pub fn standard() -> Self {
        CastMatrixBuilder::standard().build()
    }

    /// Returns the pattern for casting `from` to `to`. The pattern holds
    /// `?1` for the operand and, for the generic cast, `?2` for the target
    /// type name.
    #[must_use]
    pub fn pattern(&self, from: CastType, to: CastType) -> &str {
        self.cells
            .get(&(from, to))
            .map_or(GENERIC_CAST, String::as_str)
    }

    /// Returns whether the pair has an emulation entry.
    #[must_use]
    pub fn is_emulated(&self, from: CastType, to: CastType) -> bool {
        self.cells.contains_key(&(from, to))
    }

    /// Number of emulated pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether every pair is generic.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CastType::*;

    #[test]
    fn test_yn_string_pairs_are_independent() {
        let m = CastMatrix::standard();
        assert_eq!(
            m.pattern(YnBoolean, String),
            "case ?1 when 'Y' then 'true' when 'N' then 'false' else null end"
        );
        assert_eq!(
            m.pattern(String, YnBoolean),
            "case ?1 when 'T' then 'Y' when 'Y' then 'Y' when 'F' then 'N' when 'N' then 'N' else null end"
        );
    }

    #[test]
    fn test_unlisted_pairs_are_generic() {
        let m = CastMatrix::standard();
        assert_eq!(m.pattern(String, Integer), GENERIC_CAST);
        assert_eq!(m.pattern(Boolean, String), GENERIC_CAST);
        assert_eq!(m.pattern(Integer, Long), GENERIC_CAST);
        assert_eq!(m.pattern(Date, String), GENERIC_CAST);
        assert!(!m.is_emulated(Integer, String));
    }

    #[test]
    fn test_integer_and_long_share_rows() {
        let m = CastMatrix::standard();
        assert_eq!(m.pattern(Integer, IntegerBoolean), "abs(sign(?1))");
        assert_eq!(m.pattern(Long, IntegerBoolean), "abs(sign(?1))");
        assert_eq!(m.pattern(YnBoolean, Long), m.pattern(YnBoolean, Integer));
        assert_eq!(m.pattern(Long, Boolean), "(?1<>0)");
    }

    #[test]
    fn test_overrides() {
        let mut builder = CastMatrixBuilder::standard();
        builder
            .set(Boolean, String, "case when ?1 then 'true' else 'false' end")
            .clear(IntegerBoolean, Boolean);
        let m = builder.build();
        assert_eq!(
            m.pattern(Boolean, String),
            "case when ?1 then 'true' else 'false' end"
        );
        assert_eq!(m.pattern(IntegerBoolean, Boolean), GENERIC_CAST);
    }

    #[test]
    fn test_from_code_and_parse() {
        assert_eq!(CastType::from_code(SqlTypeCode::Nvarchar), String);
        assert_eq!(CastType::from_code(SqlTypeCode::Bigint), Long);
        assert_eq!(
            CastType::from_code(SqlTypeCode::TimestampWithTimezone),
            OffsetTimestamp
        );
        assert_eq!("yn-boolean".parse::<CastType>().unwrap(), YnBoolean);
        assert!("maybe".parse::<CastType>().is_err());
    }
}
