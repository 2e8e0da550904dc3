//! Column sizes and the strategy that picks default sizes per type code.

use serde::Serialize;

use crate::types::{LanguageType, SqlTypeCode};

/// Default column length, also the length ORM annotations fall back to.
pub const DEFAULT_LENGTH: u64 = 255;

/// Default length for the long variants (LONGVARCHAR and friends).
pub const LONG_LENGTH: u64 = 32_600;

/// Default length for CLOB and BLOB columns.
pub const DEFAULT_LOB_LENGTH: u64 = 1_048_576;

/// Default decimal scale.
pub const DEFAULT_SCALE: u32 = 2;

/// An immutable (length, precision, scale) triple; any subset may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    /// Length in bytes or characters.
    pub length: Option<u64>,
    /// Precision in digits.
    pub precision: Option<u32>,
    /// Scale in digits.
    pub scale: Option<u32>,
}

impl Size {
    /// A size with nothing set.
    #[must_use]
    pub const fn nil() -> Self {
        Self {
            length: None,
            precision: None,
            scale: None,
        }
    }

    /// A size with only a length.
    #[must_use]
    pub const fn length(length: u64) -> Self {
        Self {
            length: Some(length),
            precision: None,
            scale: None,
        }
    }

    /// A size with only a precision.
    #[must_use]
    pub const fn precision(precision: u32) -> Self {
        Self {
            length: None,
            precision: Some(precision),
            scale: None,
        }
    }

    /// A size with precision and scale.
    #[must_use]
    pub const fn precision_scale(precision: u32, scale: u32) -> Self {
        Self {
            length: None,
            precision: Some(precision),
            scale: Some(scale),
        }
    }

    /// Returns a copy with the length replaced.
    #[must_use]
    pub const fn with_length(mut self, length: Option<u64>) -> Self {
        self.length = length;
        self
    }

    /// Returns a copy with the precision replaced.
    #[must_use]
    pub const fn with_precision(mut self, precision: Option<u32>) -> Self {
        self.precision = precision;
        self
    }

    /// Returns a copy with the scale replaced.
    #[must_use]
    pub const fn with_scale(mut self, scale: Option<u32>) -> Self {
        self.scale = scale;
        self
    }

    /// The value used to pick a capacity-weighted type name: the length if
    /// present, otherwise the precision.
    #[must_use]
    pub fn capacity(&self) -> Option<u64> {
        self.length.or(self.precision.map(u64::from))
    }
}

/// Numeric defaults a dialect feeds into size resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeDefaults {
    /// Default length of CLOB/BLOB columns.
    pub lob_length: u64,
    /// Default precision of NUMERIC/DECIMAL columns.
    pub decimal_precision: u32,
    /// Default scale of non-integral NUMERIC/DECIMAL columns.
    pub decimal_scale: u32,
    /// Default fractional-second precision of timestamps.
    pub timestamp_precision: u32,
    /// Binary precision of a single-precision float.
    pub float_precision: u32,
    /// Binary precision of a double-precision float.
    pub double_precision: u32,
}

impl SizeDefaults {
    /// Defaults shared by most backends.
    pub const STANDARD: Self = Self {
        lob_length: DEFAULT_LOB_LENGTH,
        // maximum for Oracle, SQL Server, Sybase and Teradata
        decimal_precision: 38,
        decimal_scale: DEFAULT_SCALE,
        // microseconds
        timestamp_precision: 6,
        float_precision: 24,
        double_precision: 53,
    };

    /// Natural default length for a column of `code` holding `language` values.
    #[must_use]
    pub const fn default_length(&self, code: SqlTypeCode, language: LanguageType) -> u64 {
        match code {
            SqlTypeCode::Clob | SqlTypeCode::Nclob | SqlTypeCode::Blob => self.lob_length,
            _ => match language {
                LanguageType::Boolean | LanguageType::Character => 1,
                LanguageType::Uuid => match code {
                    SqlTypeCode::Binary | SqlTypeCode::Varbinary => 16,
                    _ => 36,
                },
                _ => DEFAULT_LENGTH,
            },
        }
    }

    /// Natural default precision for a column of `code` holding `language` values.
    #[must_use]
    pub const fn default_precision(&self, code: SqlTypeCode, language: LanguageType) -> u32 {
        match code {
            SqlTypeCode::Timestamp
            | SqlTypeCode::TimestampWithTimezone
            | SqlTypeCode::TimeWithTimezone => self.timestamp_precision,
            SqlTypeCode::Float | SqlTypeCode::Real | SqlTypeCode::Double => match language {
                LanguageType::Float => self.float_precision,
                LanguageType::Double => self.double_precision,
                _ => match code {
                    SqlTypeCode::Real => self.float_precision,
                    _ => self.double_precision,
                },
            },
            _ => self.decimal_precision,
        }
    }

    /// Natural default scale for a column holding `language` values.
    #[must_use]
    pub const fn default_scale(&self, language: LanguageType) -> u32 {
        if language.is_integral() {
            0
        } else {
            self.decimal_scale
        }
    }
}

impl Default for SizeDefaults {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Computes the column size for a (type code, language type) pair.
pub trait SizeStrategy: Send + Sync + std::fmt::Debug {
    /// Resolves a size. Any explicitly supplied precision, scale or length
    /// takes precedence over the computed defaults.
    fn resolve_size(
        &self,
        code: SqlTypeCode,
        language: LanguageType,
        precision: Option<u32>,
        scale: Option<u32>,
        length: Option<u64>,
        defaults: &SizeDefaults,
    ) -> Size;
}

/// The per-code default rules shared by every backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSizeStrategy;

impl SizeStrategy for StandardSizeStrategy {
    fn resolve_size(
        &self,
        code: SqlTypeCode,
        language: LanguageType,
        mut precision: Option<u32>,
        mut scale: Option<u32>,
        mut length: Option<u64>,
        defaults: &SizeDefaults,
    ) -> Size {
        let mut size = Size::nil();
        let jpa_default = length == Some(DEFAULT_LENGTH);

        match code {
            SqlTypeCode::Bit => {
                if jpa_default && language == LanguageType::Boolean {
                    length = None;
                }
                size.length = Some(defaults.default_length(code, language));
            }
            SqlTypeCode::Char | SqlTypeCode::Nchar => {
                if jpa_default
                    && matches!(language, LanguageType::Character | LanguageType::Uuid)
                {
                    length = None;
                }
                size.length = Some(defaults.default_length(code, language));
            }
            SqlTypeCode::Varchar
            | SqlTypeCode::Nvarchar
            | SqlTypeCode::Binary
            | SqlTypeCode::Varbinary => {
                if jpa_default && language == LanguageType::Uuid {
                    length = None;
                }
                size.length = Some(defaults.default_length(code, language));
            }
            SqlTypeCode::LongVarchar | SqlTypeCode::LongNvarchar | SqlTypeCode::LongVarbinary => {
                size.length = Some(LONG_LENGTH);
            }
            SqlTypeCode::Float | SqlTypeCode::Real | SqlTypeCode::Double => {
                // Precision plus scale means decimal digits; FLOAT wants binary digits.
                if let (Some(p), Some(_)) = (precision, scale) {
                    scale = None;
                    precision = Some(decimal_to_binary_digits(p));
                }
                size.precision = Some(defaults.default_precision(code, language));
            }
            SqlTypeCode::Timestamp
            | SqlTypeCode::TimestampWithTimezone
            | SqlTypeCode::TimeWithTimezone => {
                size.precision = Some(defaults.default_precision(code, language));
            }
            SqlTypeCode::Numeric | SqlTypeCode::Decimal => {
                size.precision = Some(defaults.default_precision(code, language));
                size.scale = Some(defaults.default_scale(language));
            }
            SqlTypeCode::Clob | SqlTypeCode::Nclob | SqlTypeCode::Blob => {
                size.length = Some(defaults.default_length(code, language));
            }
            _ => {}
        }

        if precision.is_some() {
            size.precision = precision;
        }
        if scale.is_some() {
            size.scale = scale;
        }
        if length.is_some() {
            size.length = length;
        }
        size
    }
}

/// Number of binary digits needed to hold `digits` decimal digits.
#[must_use]
pub fn decimal_to_binary_digits(digits: u32) -> u32 {
    (f64::from(digits) * std::f64::consts::LN_10).ceil() as u32
}

/// Number of decimal digits held by `bits` binary digits, for backends that
/// express `float(p)` in decimal digits.
#[must_use]
pub fn binary_to_decimal_digits(bits: u32) -> u32 {
    (f64::from(bits) / 53.0 * 17.0).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(
        code: SqlTypeCode,
        language: LanguageType,
        precision: Option<u32>,
        scale: Option<u32>,
        length: Option<u64>,
    ) -> Size {
        StandardSizeStrategy.resolve_size(
            code,
            language,
            precision,
            scale,
            length,
            &SizeDefaults::STANDARD,
        )
    }

    #[test]
    fn test_jpa_default_length_discarded_for_boolean_bit() {
        let size = resolve(
            SqlTypeCode::Bit,
            LanguageType::Boolean,
            None,
            None,
            Some(255),
        );
        assert_eq!(size.length, Some(1));
    }

    #[test]
    fn test_jpa_default_length_discarded_for_char_and_uuid() {
        let size = resolve(
            SqlTypeCode::Char,
            LanguageType::Character,
            None,
            None,
            Some(255),
        );
        assert_eq!(size.length, Some(1));

        let size = resolve(SqlTypeCode::Char, LanguageType::Uuid, None, None, Some(255));
        assert_eq!(size.length, Some(36));

        let size = resolve(
            SqlTypeCode::Varbinary,
            LanguageType::Uuid,
            None,
            None,
            Some(255),
        );
        assert_eq!(size.length, Some(16));
    }

    #[test]
    fn test_explicit_length_is_kept_for_strings() {
        let size = resolve(
            SqlTypeCode::Varchar,
            LanguageType::String,
            None,
            None,
            Some(255),
        );
        assert_eq!(size.length, Some(255));

        let size = resolve(
            SqlTypeCode::Char,
            LanguageType::Character,
            None,
            None,
            Some(3),
        );
        assert_eq!(size.length, Some(3));

        let size = resolve(SqlTypeCode::Varchar, LanguageType::String, None, None, None);
        assert_eq!(size.length, Some(DEFAULT_LENGTH));
    }

    #[test]
    fn test_long_types_default_to_long_length() {
        let size = resolve(SqlTypeCode::LongVarchar, LanguageType::String, None, None, None);
        assert_eq!(size.length, Some(LONG_LENGTH));

        let size = resolve(
            SqlTypeCode::LongVarbinary,
            LanguageType::Bytes,
            None,
            None,
            None,
        );
        assert_eq!(size.length, Some(LONG_LENGTH));
    }

    #[test]
    fn test_long_types_keep_supplied_length() {
        let size = resolve(
            SqlTypeCode::LongVarchar,
            LanguageType::String,
            None,
            None,
            Some(10),
        );
        assert_eq!(size.length, Some(10));
    }

    #[test]
    fn test_time_with_timezone_takes_timestamp_precision() {
        let size = resolve(
            SqlTypeCode::TimeWithTimezone,
            LanguageType::Time,
            None,
            None,
            None,
        );
        assert_eq!(size.precision, Some(6));

        let size = resolve(
            SqlTypeCode::TimeWithTimezone,
            LanguageType::Time,
            Some(3),
            None,
            None,
        );
        assert_eq!(size.precision, Some(3));
    }

    #[test]
    fn test_float_precision_converted_from_decimal_digits() {
        let size = resolve(
            SqlTypeCode::Float,
            LanguageType::Double,
            Some(10),
            Some(2),
            None,
        );
        assert_eq!(size.precision, Some(24));
        assert_eq!(size.scale, None);

        // Precision alone is already binary.
        let size = resolve(SqlTypeCode::Float, LanguageType::Double, Some(10), None, None);
        assert_eq!(size.precision, Some(10));

        let size = resolve(SqlTypeCode::Real, LanguageType::Float, None, None, None);
        assert_eq!(size.precision, Some(24));
    }

    #[test]
    fn test_decimal_defaults_and_overrides() {
        let size = resolve(
            SqlTypeCode::Numeric,
            LanguageType::BigDecimal,
            None,
            None,
            None,
        );
        assert_eq!(size, Size::precision_scale(38, 2));

        let size = resolve(
            SqlTypeCode::Decimal,
            LanguageType::BigInteger,
            None,
            None,
            None,
        );
        assert_eq!(size, Size::precision_scale(38, 0));

        let size = resolve(
            SqlTypeCode::Decimal,
            LanguageType::BigDecimal,
            Some(10),
            Some(4),
            None,
        );
        assert_eq!(size, Size::precision_scale(10, 4));
    }

    #[test]
    fn test_timestamp_and_lob_defaults() {
        let size = resolve(
            SqlTypeCode::TimestampWithTimezone,
            LanguageType::OffsetTimestamp,
            None,
            None,
            None,
        );
        assert_eq!(size.precision, Some(6));

        let size = resolve(SqlTypeCode::Blob, LanguageType::Bytes, None, None, None);
        assert_eq!(size.length, Some(DEFAULT_LOB_LENGTH));
    }

    #[test]
    fn test_digit_conversions() {
        assert_eq!(decimal_to_binary_digits(1), 3);
        assert_eq!(decimal_to_binary_digits(15), 35);
        assert_eq!(binary_to_decimal_digits(53), 17);
        assert_eq!(binary_to_decimal_digits(24), 8);
    }
}
