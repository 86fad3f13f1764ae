//! Pure text canonicalization for role/name comparison
//!
//! Region and circle names are entered by hand ("Śląskie", "Nowy Sącz")
//! while role identifiers are machine-issued and already canonical
//! ("slaskie", "nowysacz"). Both sides of every comparison go through
//! `normalize` so the two spellings meet in the middle.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a human-entered name for comparison.
///
/// Decomposes to NFKD, drops combining marks (stripping diacritics),
/// lowercases, and removes all whitespace. Total over any input.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_polish_diacritics() {
        assert_eq!(normalize("Śląskie"), "slaskie");
        assert_eq!(normalize("Świętokrzyskie"), "swietokrzyskie");
        assert_eq!(normalize("gęślą jaźń"), "geslajazn");
    }

    #[test]
    fn test_normalize_lowercases_and_removes_whitespace() {
        assert_eq!(normalize("Nowy Sącz"), "nowysacz");
        assert_eq!(normalize("  Mazowieckie  "), "mazowieckie");
        assert_eq!(normalize("KUJAWSKO-POMORSKIE"), "kujawsko-pomorskie");
    }

    #[test]
    fn test_normalize_total_over_any_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("already-canonical"), "already-canonical");
    }
}
