//! Case and diacritic folding.
//!
//! # Invariants
//! - Item search matches when the folded title contains the folded query.
//! - Folding is deterministic; persisted keys stay valid across runs.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds `text` into its search key.
///
/// Steps: NFD decomposition, combining marks dropped, lowercase, then a
/// short table for letters without a canonical decomposition.
pub fn fold_for_match(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.nfd().filter(|ch| !is_combining_mark(*ch)) {
        for lower in ch.to_lowercase() {
            // Some lowercase mappings emit combining marks of their own.
            if is_combining_mark(lower) {
                continue;
            }
            push_base_letter(&mut folded, lower);
        }
    }
    folded
}

/// Returns the folded search key for `query`, or `None` when `query` is
/// empty and the unfiltered listing applies.
///
/// Whitespace is significant: `" "` is an ordinary query. A non-empty
/// query made only of combining marks folds to an empty key; callers treat
/// that key as matching no title.
pub fn search_key(query: &str) -> Option<String> {
    if query.is_empty() {
        None
    } else {
        Some(fold_for_match(query))
    }
}

fn push_base_letter(out: &mut String, ch: char) {
    match ch {
        'ı' => out.push('i'),
        'ø' => out.push('o'),
        'đ' | 'ð' => out.push('d'),
        'ł' => out.push('l'),
        'ħ' => out.push('h'),
        'ß' => out.push_str("ss"),
        'æ' => out.push_str("ae"),
        'œ' => out.push_str("oe"),
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::{fold_for_match, search_key};

    #[test]
    fn folds_case_and_accents() {
        assert_eq!(fold_for_match("Crème Brûlée"), "creme brulee");
        assert_eq!(fold_for_match("ÇAĞRI"), "cagri");
    }

    #[test]
    fn folds_turkish_dotted_and_dotless_i() {
        assert_eq!(fold_for_match("İstanbul"), "istanbul");
        assert_eq!(fold_for_match("ılık"), "ilik");
    }

    #[test]
    fn folds_letters_without_decomposition() {
        assert_eq!(fold_for_match("Straße"), "strasse");
        assert_eq!(fold_for_match("Øl"), "ol");
    }

    #[test]
    fn empty_query_has_no_key() {
        assert_eq!(search_key(""), None);
    }

    #[test]
    fn whitespace_query_keeps_its_spaces() {
        assert_eq!(search_key(" ").as_deref(), Some(" "));
        assert_eq!(search_key("\t").as_deref(), Some("\t"));
    }

    #[test]
    fn lone_combining_mark_folds_to_empty_key() {
        assert_eq!(search_key("\u{0301}").as_deref(), Some(""));
    }
}
