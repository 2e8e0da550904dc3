//! Rendering of `?1`, `?2`, ... argument patterns.
//!
//! Cast, trim, extract and emulated function patterns all use ordinal
//! placeholders. A placeholder with no matching argument is left as-is.

/// Substitutes ordinal placeholders in `pattern` with `args`.
///
/// `?10` is read as a single placeholder, not `?1` followed by `0`. A `?`
/// not followed by a digit is copied verbatim, so JDBC-style parameter
/// markers survive rendering.
#[must_use]
pub fn render(pattern: &str, args: &[&str]) -> String {
    let capacity = pattern.len() + args.iter().map(|a| a.len()).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '?' {
            out.push(c);
            continue;
        }
        let mut digits = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() {
                digits.push(d);
                chars.next();
            } else {
                break;
            }
        }
        match digits.parse::<usize>() {
            Ok(ordinal) if ordinal >= 1 && ordinal <= args.len() => {
                out.push_str(args[ordinal - 1]);
            }
            _ => {
                out.push('?');
                out.push_str(&digits);
            }
        }
    }
    out
}

/// Returns the highest ordinal placeholder referenced by `pattern`.
#[must_use]
pub fn max_ordinal(pattern: &str) -> usize {
    let bytes = pattern.as_bytes();
    let mut max = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'?' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if let Ok(n) = pattern[start..end].parse::<usize>() {
                max = max.max(n);
            }
            i = end;
        } else {
            i += 1;
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple() {
        assert_eq!(
            render("cast(?1 as ?2)", &["x.name", "varchar(10)"]),
            "cast(x.name as varchar(10))"
        );
    }

    #[test]
    fn test_render_repeated_and_multi_digit() {
        assert_eq!(render("?1+?1", &["a"]), "a+a");
        let args: Vec<String> = (1..=10).map(|i| format!("a{i}")).collect();
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        assert_eq!(render("?10,?1", &refs), "a10,a1");
    }

    #[test]
    fn test_render_leaves_unmatched_markers() {
        assert_eq!(render("?1 in (?, ?)", &["x"]), "x in (?, ?)");
        assert_eq!(render("f(?3)", &["x"]), "f(?3)");
    }

    #[test]
    fn test_max_ordinal() {
        assert_eq!(max_ordinal("case ?1 when 1 then ?2 end"), 2);
        assert_eq!(max_ordinal("current_date"), 0);
        assert_eq!(max_ordinal("f(?12, ?3)"), 12);
    }
}
