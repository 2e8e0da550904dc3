//! Portable SQL type codes and the language-side value types mapped onto them.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::DialectError;

/// Portable SQL type codes, independent of any backend's native name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlTypeCode {
    // Boolean
    /// Boolean.
    Boolean,
    /// Bit string (commonly a single bit).
    Bit,

    // Integer types
    /// Tiny integer (1 byte).
    Tinyint,
    /// Small integer (2 bytes).
    Smallint,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    Bigint,

    // Floating point
    /// Real (4-byte float).
    Real,
    /// Float with a binary precision.
    Float,
    /// Double precision (8-byte float).
    Double,

    // Exact numerics
    /// Numeric with precision and scale.
    Numeric,
    /// Decimal with precision and scale.
    Decimal,

    // Date/time types
    /// Date.
    Date,
    /// Time.
    Time,
    /// Time with time zone.
    TimeWithTimezone,
    /// Timestamp.
    Timestamp,
    /// Timestamp with time zone.
    TimestampWithTimezone,

    // Binary types
    /// Fixed-length binary.
    Binary,
    /// Variable-length binary.
    Varbinary,
    /// Long variable-length binary.
    LongVarbinary,
    /// Binary large object.
    Blob,

    // Character types
    /// Fixed-length character string.
    Char,
    /// Variable-length character string.
    Varchar,
    /// Long variable-length character string.
    LongVarchar,
    /// Character large object.
    Clob,

    // National character types
    /// Fixed-length national character string.
    Nchar,
    /// Variable-length national character string.
    Nvarchar,
    /// Long variable-length national character string.
    LongNvarchar,
    /// National character large object.
    Nclob,
}

impl SqlTypeCode {
    /// Every type code, in declaration order.
    pub const ALL: [Self; 28] = [
        Self::Boolean,
        Self::Bit,
        Self::Tinyint,
        Self::Smallint,
        Self::Integer,
        Self::Bigint,
        Self::Real,
        Self::Float,
        Self::Double,
        Self::Numeric,
        Self::Decimal,
        Self::Date,
        Self::Time,
        Self::TimeWithTimezone,
        Self::Timestamp,
        Self::TimestampWithTimezone,
        Self::Binary,
        Self::Varbinary,
        Self::LongVarbinary,
        Self::Blob,
        Self::Char,
        Self::Varchar,
        Self::LongVarchar,
        Self::Clob,
        Self::Nchar,
        Self::Nvarchar,
        Self::LongNvarchar,
        Self::Nclob,
    ];

    /// Returns the canonical upper-case name of the code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Bit => "BIT",
            Self::Tinyint => "TINYINT",
            Self::Smallint => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::Bigint => "BIGINT",
            Self::Real => "REAL",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Numeric => "NUMERIC",
            Self::Decimal => "DECIMAL",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::TimeWithTimezone => "TIME_WITH_TIMEZONE",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
            Self::Binary => "BINARY",
            Self::Varbinary => "VARBINARY",
            Self::LongVarbinary => "LONGVARBINARY",
            Self::Blob => "BLOB",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::LongVarchar => "LONGVARCHAR",
            Self::Clob => "CLOB",
            Self::Nchar => "NCHAR",
            Self::Nvarchar => "NVARCHAR",
            Self::LongNvarchar => "LONGNVARCHAR",
            Self::Nclob => "NCLOB",
        }
    }

    /// Does this code represent some sort of numeric type?
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Bit
                | Self::Tinyint
                | Self::Smallint
                | Self::Integer
                | Self::Bigint
                | Self::Real
                | Self::Float
                | Self::Double
                | Self::Numeric
                | Self::Decimal
        )
    }

    /// Does this code represent some sort of character string type?
    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::Varchar
                | Self::LongVarchar
                | Self::Nchar
                | Self::Nvarchar
                | Self::LongNvarchar
        )
    }

    /// Returns the code a long type falls back to when it has no mapping
    /// of its own.
    #[must_use]
    pub const fn long_type_fallback(self) -> Option<Self> {
        match self {
            Self::LongVarchar => Some(Self::Varchar),
            Self::LongNvarchar => Some(Self::Nvarchar),
            Self::LongVarbinary => Some(Self::Varbinary),
            _ => None,
        }
    }

    /// Do the two codes represent essentially the same type?
    ///
    /// NUMERIC and DECIMAL are treated as the same type, as are FLOAT, REAL
    /// and DOUBLE.
    #[must_use]
    pub const fn equivalent(self, other: Self) -> bool {
        self as u8 == other as u8
            || (self.is_numeric_or_decimal() && other.is_numeric_or_decimal())
            || (self.is_floating() && other.is_floating())
    }

    /// The language type a column of this code holds when nothing more
    /// specific is known.
    #[must_use]
    pub const fn default_language_type(self) -> LanguageType {
        match self {
            Self::Boolean | Self::Bit => LanguageType::Boolean,
            Self::Tinyint => LanguageType::Byte,
            Self::Smallint => LanguageType::Short,
            Self::Integer => LanguageType::Int,
            Self::Bigint => LanguageType::Long,
            Self::Real => LanguageType::Float,
            Self::Float | Self::Double => LanguageType::Double,
            Self::Numeric | Self::Decimal => LanguageType::BigDecimal,
            Self::Date => LanguageType::Date,
            Self::Time | Self::TimeWithTimezone => LanguageType::Time,
            Self::Timestamp => LanguageType::Timestamp,
            Self::TimestampWithTimezone => LanguageType::OffsetTimestamp,
            Self::Binary | Self::Varbinary | Self::LongVarbinary | Self::Blob => LanguageType::Bytes,
            Self::Char
            | Self::Varchar
            | Self::LongVarchar
            | Self::Clob
            | Self::Nchar
            | Self::Nvarchar
            | Self::LongNvarchar
            | Self::Nclob => LanguageType::String,
        }
    }

    const fn is_numeric_or_decimal(self) -> bool {
        matches!(self, Self::Numeric | Self::Decimal)
    }

    const fn is_floating(self) -> bool {
        matches!(self, Self::Float | Self::Real | Self::Double)
    }
}

impl fmt::Display for SqlTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlTypeCode {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.name() == wanted)
            .ok_or_else(|| DialectError::UnknownName {
                kind: "type code",
                name: s.to_string(),
            })
    }
}

/// The language-side value type a column is mapped from.
///
/// The size strategy uses this to pick natural default lengths, for example
/// a single character for `Character` or 36 characters for a textual `Uuid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageType {
    /// `bool`.
    Boolean,
    /// `i8`.
    Byte,
    /// `i16`.
    Short,
    /// `i32`.
    Int,
    /// `i64`.
    Long,
    /// `f32`.
    Float,
    /// `f64`.
    Double,
    /// Arbitrary precision integer.
    BigInteger,
    /// Arbitrary precision decimal.
    BigDecimal,
    /// `char`.
    Character,
    /// `String`.
    String,
    /// 128-bit UUID.
    Uuid,
    /// `Vec<u8>`.
    Bytes,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time without offset.
    Timestamp,
    /// Date and time with offset.
    OffsetTimestamp,
}

impl LanguageType {
    /// Returns whether the type is an integral number.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::BigInteger
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_names_round_trip() {
        for code in SqlTypeCode::ALL {
            assert_eq!(code.name().parse::<SqlTypeCode>().unwrap(), code);
        }
        assert_eq!(
            "timestamp with timezone".parse::<SqlTypeCode>().unwrap(),
            SqlTypeCode::TimestampWithTimezone
        );
        assert!("varchar2".parse::<SqlTypeCode>().is_err());
    }

    #[test]
    fn test_type_code_classification() {
        assert!(SqlTypeCode::Bit.is_numeric());
        assert!(SqlTypeCode::Decimal.is_numeric());
        assert!(!SqlTypeCode::Varchar.is_numeric());
        assert!(SqlTypeCode::LongNvarchar.is_character());
        assert!(!SqlTypeCode::Clob.is_character());
    }

    #[test]
    fn test_equivalent_types() {
        assert!(SqlTypeCode::Numeric.equivalent(SqlTypeCode::Decimal));
        assert!(SqlTypeCode::Float.equivalent(SqlTypeCode::Double));
        assert!(SqlTypeCode::Real.equivalent(SqlTypeCode::Float));
        assert!(SqlTypeCode::Date.equivalent(SqlTypeCode::Date));
        assert!(!SqlTypeCode::Integer.equivalent(SqlTypeCode::Bigint));
        assert!(!SqlTypeCode::Numeric.equivalent(SqlTypeCode::Double));
    }

    #[test]
    fn test_long_type_fallbacks() {
        assert_eq!(
            SqlTypeCode::LongVarchar.long_type_fallback(),
            Some(SqlTypeCode::Varchar)
        );
        assert_eq!(
            SqlTypeCode::LongNvarchar.long_type_fallback(),
            Some(SqlTypeCode::Nvarchar)
        );
        assert_eq!(
            SqlTypeCode::LongVarbinary.long_type_fallback(),
            Some(SqlTypeCode::Varbinary)
        );
        assert_eq!(SqlTypeCode::Clob.long_type_fallback(), None);
    }
}
