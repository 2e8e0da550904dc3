//! SQL literals, comments and query hints.

use std::fmt::Write;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;

static CLOSING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*/").expect("Invalid closing comment regex"));
static OPENING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*").expect("Invalid opening comment regex"));
static LEADING_SELECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*select\b").expect("Invalid select regex"));

/// How date/time literals are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeLiteralStyle {
    /// `{d '2024-01-31'}`, translated by the driver.
    #[default]
    JdbcEscape,
    /// `date '2024-01-31'`.
    Ansi,
}

/// Quotes `value` as a string literal, doubling embedded quotes.
#[must_use]
pub fn inline_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Renders bytes as a hexadecimal binary literal.
#[must_use]
pub fn binary_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + 3);
    out.push_str("X'");
    for byte in bytes {
        let _ = write!(out, "{byte:02X}");
    }
    out.push('\'');
    out
}

/// Renders a date literal.
#[must_use]
pub fn date_literal(date: NaiveDate, style: DateTimeLiteralStyle) -> String {
    let text = date.format("%Y-%m-%d");
    match style {
        DateTimeLiteralStyle::JdbcEscape => format!("{{d '{text}'}}"),
        DateTimeLiteralStyle::Ansi => format!("date '{text}'"),
    }
}

/// Renders a time literal.
#[must_use]
pub fn time_literal(time: NaiveTime, style: DateTimeLiteralStyle) -> String {
    let text = time.format("%H:%M:%S");
    match style {
        DateTimeLiteralStyle::JdbcEscape => format!("{{t '{text}'}}"),
        DateTimeLiteralStyle::Ansi => format!("time '{text}'"),
    }
}

/// Renders a timestamp literal with nanosecond precision.
#[must_use]
pub fn timestamp_literal(timestamp: NaiveDateTime, style: DateTimeLiteralStyle) -> String {
    let text = timestamp.format("%Y-%m-%d %H:%M:%S%.9f");
    match style {
        DateTimeLiteralStyle::JdbcEscape => format!("{{ts '{text}'}}"),
        DateTimeLiteralStyle::Ansi => format!("timestamp '{text}'"),
    }
}

/// Renders a timestamp literal carrying its offset.
#[must_use]
pub fn timestamp_with_offset_literal(timestamp: DateTime<FixedOffset>) -> String {
    format!(
        "timestamp with time zone '{}'",
        timestamp.format("%Y-%m-%d %H:%M:%S%.9f%:z")
    )
}

/// Renders a duration as a seconds interval literal.
#[must_use]
pub fn interval_literal(duration: Duration) -> String {
    let seconds = duration.num_seconds();
    let nanos = duration.subsec_nanos().unsigned_abs();
    let sign = if seconds == 0 && duration.subsec_nanos() < 0 {
        "-"
    } else {
        ""
    };
    format!("interval '{sign}{seconds}.{nanos:09}' second")
}

/// Neutralises comment delimiters so `comment` can sit inside `/* */`.
#[must_use]
pub fn escape_comment(comment: &str) -> String {
    if comment.is_empty() {
        return String::new();
    }
    let escaped = CLOSING_COMMENT.replace_all(comment, r"*\/");
    OPENING_COMMENT.replace_all(&escaped, r"/\*").into_owned()
}

/// Prefixes `sql` with an escaped block comment.
#[must_use]
pub fn prepend_comment(sql: &str, comment: &str) -> String {
    if comment.is_empty() {
        return sql.to_string();
    }
    format!("/* {} */ {sql}", escape_comment(comment))
}

/// Places optimizer hints in a `/*+ ... */` comment after the leading `select`.
/// Statements that do not start with `select` are returned unchanged.
#[must_use]
pub fn optimizer_hint_comment(sql: &str, hints: &[&str]) -> String {
    if hints.is_empty() {
        return sql.to_string();
    }
    match LEADING_SELECT.find(sql) {
        Some(m) => format!(
            "{} /*+ {} */{}",
            m.as_str(),
            hints.join(" "),
            &sql[m.end()..]
        ),
        None => sql.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_literal_doubles_quotes() {
        assert_eq!(inline_literal("O'Brien"), "'O''Brien'");
        assert_eq!(inline_literal(""), "''");
    }

    #[test]
    fn test_binary_literal() {
        assert_eq!(binary_literal(&[0x0a, 0xff, 0x00]), "X'0AFF00'");
        assert_eq!(binary_literal(&[]), "X''");
    }

    #[test]
    fn test_date_time_literals() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let time = NaiveTime::from_hms_opt(13, 5, 9).unwrap();
        assert_eq!(
            date_literal(date, DateTimeLiteralStyle::JdbcEscape),
            "{d '2024-01-31'}"
        );
        assert_eq!(date_literal(date, DateTimeLiteralStyle::Ansi), "date '2024-01-31'");
        assert_eq!(
            time_literal(time, DateTimeLiteralStyle::JdbcEscape),
            "{t '13:05:09'}"
        );
        assert_eq!(
            timestamp_literal(date.and_time(time), DateTimeLiteralStyle::Ansi),
            "timestamp '2024-01-31 13:05:09.000000000'"
        );
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let ts = date.and_time(time).and_local_timezone(offset).unwrap();
        assert_eq!(
            timestamp_with_offset_literal(ts),
            "timestamp with time zone '2024-01-31 13:05:09.000000000+02:00'"
        );
    }

    #[test]
    fn test_interval_literal() {
        assert_eq!(
            interval_literal(Duration::milliseconds(90_500)),
            "interval '90.500000000' second"
        );
        assert_eq!(
            interval_literal(Duration::seconds(-3)),
            "interval '-3.000000000' second"
        );
    }

    #[test]
    fn test_comment_escaping() {
        assert_eq!(escape_comment("a */ drop table x; /* b"), r"a *\/ drop table x; /\* b");
        assert_eq!(
            prepend_comment("select 1", "load Book"),
            "/* load Book */ select 1"
        );
        assert_eq!(prepend_comment("select 1", ""), "select 1");
    }

    #[test]
    fn test_optimizer_hints() {
        assert_eq!(
            optimizer_hint_comment("select b.id from book b", &["FIRST_ROWS(10)", "NO_MERGE"]),
            "select /*+ FIRST_ROWS(10) NO_MERGE */ b.id from book b"
        );
        assert_eq!(
            optimizer_hint_comment("update book set x = 1", &["X"]),
            "update book set x = 1"
        );
    }
}
