//! German string collation.
//!
//! Strings are compared in three passes, as dictionary order (DIN 5007-1)
//! does it:
//!
//! 1. base letters, ignoring case and accents (`ä` = `a`, `ß` = `ss`),
//! 2. accents, unaccented before accented,
//! 3. case, lowercase before uppercase.
//!
//! Input is decomposed (NFD) first, so precomposed and combining forms of
//! the same name compare equal up to the final tie-break, and any accented
//! Latin letter sorts with its base letter.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Precomputed sort key for one string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<char>,
    /// Marks attached to each primary letter, in decomposition order.
    secondary: Vec<Vec<char>>,
    tertiary: Vec<u8>,
    raw: String,
}

impl CollationKey {
    pub fn new(value: &str) -> Self {
        let mut key = CollationKey {
            primary: Vec::with_capacity(value.len()),
            secondary: Vec::with_capacity(value.len()),
            tertiary: Vec::with_capacity(value.len()),
            raw: value.to_string(),
        };

        for c in value.nfd() {
            let case = u8::from(c.is_uppercase());
            for lower in c.to_lowercase() {
                if is_combining_mark(lower) {
                    key.push_mark(lower);
                } else if let Some((base, mark)) = expand(lower) {
                    for (i, b) in base.chars().enumerate() {
                        key.push_letter(b, case);
                        if i == 0 {
                            key.push_mark(mark);
                        }
                    }
                } else {
                    key.push_letter(lower, case);
                }
            }
        }

        key
    }

    fn push_letter(&mut self, letter: char, case: u8) {
        self.primary.push(letter);
        self.secondary.push(Vec::new());
        self.tertiary.push(case);
    }

    fn push_mark(&mut self, mark: char) {
        match self.secondary.last_mut() {
            Some(marks) => marks.push(mark),
            // A leading mark has no letter to attach to
            None => self.push_letter(mark, 0),
        }
    }
}

/// Compare two strings in German dictionary order.
pub fn compare_de(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Letters without a canonical decomposition that still sort as Latin base
/// letters. The letter itself is kept as its accent weight.
fn expand(c: char) -> Option<(&'static str, char)> {
    let base = match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'ł' => "l",
        'đ' => "d",
        'ħ' => "h",
        'ı' => "i",
        'þ' => "th",
        _ => return None,
    };
    Some((base, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[&str]) -> Vec<String> {
        let mut values: Vec<String> = values.iter().map(|s| s.to_string()).collect();
        values.sort_by(|a, b| compare_de(a, b));
        values
    }

    #[test]
    fn test_umlauts_sort_with_base_letter() {
        assert_eq!(
            sorted(&["Zeller", "Öztürk", "Ortner", "Pichler"]),
            vec!["Ortner", "Öztürk", "Pichler", "Zeller"]
        );
        assert_eq!(
            sorted(&["Müller", "Mueller", "Muller"]),
            vec!["Mueller", "Muller", "Müller"]
        );
    }

    #[test]
    fn test_case_is_a_late_tie_breaker() {
        assert_eq!(compare_de("anna", "Anna"), Ordering::Less);
        assert_eq!(compare_de("Anna", "bert"), Ordering::Less);
        assert_eq!(compare_de("ANNA", "anton"), Ordering::Less);
    }

    #[test]
    fn test_accent_before_case() {
        // Accents are compared before case
        assert_eq!(compare_de("Oder", "öder"), Ordering::Less);
    }

    #[test]
    fn test_sharp_s_expands() {
        assert_eq!(compare_de("Strasse", "Straße"), Ordering::Less);
        assert_eq!(compare_de("Straße", "Strasser"), Ordering::Less);
    }

    #[test]
    fn test_combining_marks_match_precomposed() {
        let decomposed = "O\u{308}ller";
        assert_eq!(compare_de(decomposed, "Ortner"), Ordering::Less);
        assert_eq!(compare_de("Öller", "Ortner"), Ordering::Less);
        assert_eq!(compare_de("Oller", decomposed), Ordering::Less);
        assert_eq!(
            CollationKey::new(decomposed).primary,
            CollationKey::new("Öller").primary
        );
    }

    #[test]
    fn test_any_accented_letter_sorts_with_base() {
        assert_eq!(compare_de("Ǎlbert", "Bert"), Ordering::Less);
        assert_eq!(compare_de("Nguyễn", "Nguyz"), Ordering::Less);
        assert_eq!(compare_de("Nguyen", "Nguyễn"), Ordering::Less);
        assert_eq!(
            sorted(&["Zapata", "Łukasz", "Lorenz", "Mayer"]),
            vec!["Lorenz", "Łukasz", "Mayer", "Zapata"]
        );
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(compare_de("", "A"), Ordering::Less);
        assert_eq!(compare_de("", ""), Ordering::Equal);
    }
}
