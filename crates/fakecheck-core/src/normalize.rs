//! Text normalization
//!
//! Turns raw article text into a string made only of ASCII letters, Polish
//! diacritic letters and single spaces. The steps run in a fixed order:
//!
//! 1. escape sequences and newline/tab/carriage-return become a space
//! 2. characters outside the allowed alphabet become a space
//! 3. whitespace runs collapse to one space
//! 4. everything is lowercased
//!
//! Step 1 must run before step 2, otherwise the `n` of a literal `\n` would
//! survive as a letter. Step 3 must run after step 2 because the alphabet
//! restriction itself creates new runs of spaces.

use lazy_static::lazy_static;
use regex::Regex;

/// Polish letters outside ASCII, both cases
pub const POLISH_DIACRITICS: &str = "ĄąĆćĘęŁłŃńÓóŚśŹźŻż";

lazy_static! {
    /// Literal two-character escapes (`\n`, `\t`, `\r`) and the real control characters
    static ref ESCAPE_PATTERN: Regex = Regex::new(r"\\[ntr]|[\n\t\r]").unwrap();

    /// Anything that is not an ASCII letter or a Polish diacritic letter
    static ref NON_POLISH_PATTERN: Regex =
        Regex::new(r"[^a-zA-ZĄąĆćĘęŁłŃńÓóŚśŹźŻż]").unwrap();

    static ref WHITESPACE_PATTERN: Regex = Regex::new(r"\s+").unwrap();
}

/// Run all four normalization steps
pub fn normalize(raw: &str) -> String {
    let text = delete_escape_chars(raw);
    let text = strip_non_polish(&text);
    let text = collapse_whitespace(&text);
    lowercase_all(&text)
}

/// Step 1: replace escape sequences and newline/tab/carriage-return with a space
pub fn delete_escape_chars(text: &str) -> String {
    ESCAPE_PATTERN.replace_all(text, " ").into_owned()
}

/// Step 2: replace every character outside the allowed alphabet with a space
pub fn strip_non_polish(text: &str) -> String {
    NON_POLISH_PATTERN.replace_all(text, " ").into_owned()
}

/// Step 3: collapse each whitespace run into one space
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_PATTERN.replace_all(text, " ").into_owned()
}

/// Step 4
pub fn lowercase_all(text: &str) -> String {
    text.to_lowercase()
}

/// True for characters that may appear in normalized text (before lowercasing)
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphabetic() || POLISH_DIACRITICS.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_reference_sentence() {
        assert_eq!(
            normalize("To JEST    fałszywa!!! wiadomość.\n"),
            "to jest fałszywa wiadomość "
        );
    }

    #[test]
    fn test_literal_escapes_do_not_leak_letters() {
        assert_eq!(normalize(r"Ala\nma\tkota\r"), "ala ma kota ");
        assert_eq!(normalize("Ala\nma\tkota\r"), "ala ma kota ");
    }

    #[test]
    fn test_polish_uppercase_is_lowered() {
        assert_eq!(normalize("ŻÓŁĆ ĘĄŚŃŹ"), "żółć ęąśńź");
    }

    #[test]
    fn test_foreign_letters_are_stripped() {
        // German and Czech letters are outside the allowed alphabet
        assert_eq!(normalize("Müller řekl"), "m ller ekl");
    }

    #[test]
    fn test_digits_and_punctuation_only() {
        assert_eq!(normalize("12345!!!"), " ");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_steps_can_run_individually() {
        assert_eq!(delete_escape_chars(r"a\nb"), "a b");
        assert_eq!(strip_non_polish("a1b"), "a b");
        assert_eq!(collapse_whitespace("a \u{a0}  b"), "a b");
        assert_eq!(lowercase_all("ŁÓDŹ"), "łódź");
    }

    fn polish_like_text() -> impl Strategy<Value = String> {
        "[a-zA-ZąćęłńóśźżĄĆĘŁŃÓŚŹŻ0-9 .,!?\\-\\n\\t\\r\\\\]{0,80}"
    }

    proptest! {
        /// Property: normalizing twice equals normalizing once
        #[test]
        fn normalize_is_idempotent(s in ".*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_polish_text(s in polish_like_text()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: output holds only allowed letters and single spaces
        #[test]
        fn normalize_output_alphabet(s in ".*") {
            let out = normalize(&s);
            prop_assert!(out.chars().all(|c| c == ' ' || is_allowed_char(c)));
            prop_assert!(!out.contains("  "), "double space in {:?}", out);
            prop_assert!(!out.chars().any(|c| c.is_uppercase()));
        }

        #[test]
        fn normalize_output_alphabet_polish(s in polish_like_text()) {
            let out = normalize(&s);
            prop_assert!(out.chars().all(|c| c == ' ' || is_allowed_char(c)));
            prop_assert!(!out.contains("  "));
        }
    }
}
