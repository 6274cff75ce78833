//! Identifier sanitization for diagram and DDL output.
//!
//! Entity and attribute labels are free-form text; Mermaid node names and
//! SQL identifiers are not. `sanitize` maps a label to a safe token by
//! collapsing every maximal run of non-word characters into a single
//! underscore.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex matching a maximal run of non-word characters
static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());

/// Sanitize a human-readable label into an identifier token.
///
/// Total and deterministic: never fails, same input always yields the same
/// output. Empty or all-symbol input yields a token consisting solely of
/// underscores; callers must tolerate that degenerate case (the store
/// refuses to persist entity names that produce it, see `is_degenerate`).
pub fn sanitize(label: &str) -> String {
    NON_WORD_RE.replace_all(label, "_").into_owned()
}

/// Check whether a sanitized identifier carries no word characters at all.
pub fn is_degenerate(ident: &str) -> bool {
    ident.chars().all(|c| c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_symbol_runs() {
        assert_eq!(sanitize("Customer Details"), "Customer_Details");
        assert_eq!(sanitize("order -- line!!item"), "order_line_item");
        assert_eq!(sanitize("already_safe_123"), "already_safe_123");
    }

    #[test]
    fn test_sanitize_degenerate_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("!!!"), "_");
        assert!(is_degenerate(&sanitize("")));
        assert!(is_degenerate(&sanitize("@#$ %^&")));
        assert!(!is_degenerate(&sanitize("a")));
    }

    #[test]
    fn test_sanitize_is_deterministic() {
        let label = "Sales / EMEA (2024)";
        assert_eq!(sanitize(label), sanitize(label));
    }
}
