//! Field patterns and length caps shared by the validators.

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const PREFIX_MAX: usize = 10;
pub(crate) const NUMBER_MAX: usize = 20;
pub(crate) const PURCHASE_ORDER_MAX: usize = 50;
pub(crate) const NOTES_MAX: usize = 1000;
pub(crate) const TERMS_MAX: usize = 2000;
pub(crate) const LINK_TITLE_MAX: usize = 100;
pub(crate) const LINK_URL_MAX: usize = 2000;
pub(crate) const CUSTOM_FIELD_MAX: usize = 500;

/// Letters (accented included), digits, whitespace and common punctuation, 1–200 chars.
pub(crate) static DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[\p{L}\p{M}\p{N}\s.,;:!?'’"«»()\[\]/&%€$£+*=#@°_\-]{1,200}$"#)
        .expect("description pattern")
});

/// Letters, digits, spaces and unit punctuation ("m²", "h/j", "kg"), 1–20 chars.
pub(crate) static UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{M}\p{N} .,/%°²³_\-]{1,20}$").expect("unit pattern"));

/// Document prefix and number charset.
pub(crate) static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("reference pattern"));

/// Purchase order reference (bon de commande).
pub(crate) static PURCHASE_ORDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N} _/.#\-]+$").expect("purchase order pattern"));

/// Printable text: no control characters other than tab and line breaks, no markup brackets.
pub(crate) static FREE_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\x00-\x08\x0B\x0C\x0E-\x1F\x7F<>]*$").expect("free text pattern")
});

/// http(s) URL with a host, optional port and path.
pub(crate) static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^https?://[a-z0-9]([a-z0-9\-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9\-]*[a-z0-9])?)*(:[0-9]{1,5})?([/?#]\S*)?$",
    )
    .expect("url pattern")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_accepts_french_text() {
        assert!(DESCRIPTION.is_match("Prestation de conseil: «audit» n°3, 50 % d'acompte"));
        assert!(DESCRIPTION.is_match("Développement (phase 2)"));
        assert!(!DESCRIPTION.is_match(""));
        assert!(!DESCRIPTION.is_match("<script>"));
        assert!(!DESCRIPTION.is_match(&"a".repeat(201)));
        assert!(DESCRIPTION.is_match(&"é".repeat(200)));
    }

    #[test]
    fn unit_pattern() {
        assert!(UNIT.is_match("m²"));
        assert!(UNIT.is_match("h/j"));
        assert!(UNIT.is_match("pièce"));
        assert!(!UNIT.is_match("unité;"));
        assert!(!UNIT.is_match(&"x".repeat(21)));
    }

    #[test]
    fn reference_pattern() {
        assert!(REFERENCE.is_match("FAC-2024_01"));
        assert!(!REFERENCE.is_match("FAC 2024"));
        assert!(!REFERENCE.is_match("FAC/2024"));
    }

    #[test]
    fn url_pattern() {
        assert!(URL.is_match("https://example.fr/cgv"));
        assert!(URL.is_match("http://localhost:8080/terms?lang=fr"));
        assert!(URL.is_match("HTTPS://Example.COM"));
        assert!(!URL.is_match("ftp://example.fr"));
        assert!(!URL.is_match("https://"));
        assert!(!URL.is_match("https://exa mple.fr"));
        assert!(!URL.is_match("example.fr"));
    }

    #[test]
    fn free_text_rejects_control_characters() {
        assert!(FREE_TEXT.is_match("Ligne 1\nLigne 2\tfin"));
        assert!(!FREE_TEXT.is_match("bell\u{7}"));
        assert!(!FREE_TEXT.is_match("<b>gras</b>"));
    }
}
