//! Helpers for writing SQL scripts as text.
//!
//! Queries against a live connection always bind their values; these helpers
//! are only for the backup and migration scripts, which must carry literal
//! values.

/// Renders `value` as a single-quoted SQL string literal, doubling embedded
/// quotes. `None` becomes `NULL`.
pub(crate) fn quote_literal(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("'{}'", v.replace('\'', "''")),
        None => "NULL".to_string(),
    }
}

/// Renders `name` as a double-quoted identifier.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Writes a three-line comment banner.
pub(crate) fn banner(out: &mut String, title: &str, width: usize) {
    let rule = "=".repeat(width);
    out.push_str(&format!("-- {rule}\n-- {title}\n-- {rule}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_literal_doubles_quotes() {
        assert_eq!(quote_literal(Some("it's")), "'it''s'");
        assert_eq!(quote_literal(Some("")), "''");
        assert_eq!(quote_literal(None), "NULL");
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("question"), "\"question\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_banner() {
        let mut out = String::new();
        banner(&mut out, "SKILL: RUST", 5);
        assert_eq!(out, "-- =====\n-- SKILL: RUST\n-- =====\n");
    }
}
