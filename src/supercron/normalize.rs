//! Lexical Normalizer (Component A): lowercase, then expand three-letter
//! weekday/month abbreviations to their canonical full form, on word
//! boundaries only.

use once_cell::sync::Lazy;
use regex::Regex;

const DAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static ABBREVIATIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    DAYS.iter()
        .chain(MONTHS.iter())
        .map(|full| {
            let short = &full[..3];
            let pattern = Regex::new(&format!(r"\b{short}\b")).unwrap();
            (pattern, *full)
        })
        .collect()
});

/// Lowercase `sentence` and expand every whole-word three-letter
/// weekday/month abbreviation to its full form.
pub fn normalize(sentence: &str) -> String {
    let mut normalized = sentence.to_lowercase();
    for (pattern, full) in ABBREVIATIONS.iter() {
        normalized = pattern.replace_all(&normalized, *full).into_owned();
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases() {
        assert_eq!(normalize("EVERY MONDAY"), "every monday");
    }

    #[test]
    fn expands_day_abbreviation() {
        assert_eq!(normalize("on mon"), "on monday");
    }

    #[test]
    fn expands_month_abbreviation() {
        assert_eq!(normalize("in feb"), "in february");
    }

    #[test]
    fn does_not_rewrite_substring_of_longer_word() {
        // "mon" is a prefix of "money" but must not be rewritten there.
        assert_eq!(normalize("pay money"), "pay money");
    }

    #[test]
    fn expands_multiple_abbreviations() {
        assert_eq!(
            normalize("from mon to fri in oct and dec"),
            "from monday to friday in october and december"
        );
    }

    #[test]
    fn leaves_full_words_untouched() {
        assert_eq!(normalize("every wednesday"), "every wednesday");
    }
}
