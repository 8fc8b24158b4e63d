//! Formula-injection guard for free text
//!
//! Text starting with `=`, `+` or `-` is a formula to anyone who opens
//! the sheet or pastes the cell elsewhere. Writes prefix it with `'`;
//! reads strip it again.

const FORMULA_LEADERS: [char; 3] = ['=', '+', '-'];

/// Prefix `'` when `text` would otherwise be read as a formula
pub fn escape_for_sheet(text: &str) -> String {
    if text.starts_with(FORMULA_LEADERS) {
        format!("'{text}")
    } else {
        text.to_string()
    }
}

/// Remove a `'` added by [`escape_for_sheet`]
///
/// Only a quote followed by a formula leader is stripped, so text that
/// legitimately starts with `'` survives.
pub fn unescape_from_sheet(text: &str) -> String {
    match text.strip_prefix('\'') {
        Some(rest) if rest.starts_with(FORMULA_LEADERS) => rest.to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_formula_leaders() {
        assert_eq!(escape_for_sheet("=SUM(A1:A3)"), "'=SUM(A1:A3)");
        assert_eq!(escape_for_sheet("+82 10"), "'+82 10");
        assert_eq!(escape_for_sheet("-_- so so"), "'-_- so so");
        assert_eq!(escape_for_sheet("맛있어요"), "맛있어요");
        assert_eq!(escape_for_sheet(""), "");
    }

    #[test]
    fn test_unescape_only_strips_added_quote() {
        assert_eq!(unescape_from_sheet("'=1+1"), "=1+1");
        assert_eq!(unescape_from_sheet("'quoted'"), "'quoted'");
        assert_eq!(unescape_from_sheet("'"), "'");
        assert_eq!(unescape_from_sheet("plain"), "plain");
    }

    #[test]
    fn test_round_trip_formula_like_comments() {
        for comment in ["=HYPERLINK(\"x\")", "+1 would go again", "-- best noodles", "- ok"] {
            assert_eq!(unescape_from_sheet(&escape_for_sheet(comment)), comment);
        }
    }
}
