//! Cleaning of problem text from OCR and text generation.
use once_cell::sync::Lazy;
use regex::Regex;

/// Enumeration prefix such as `12. ` or `3) `; `2.5x` is left alone.
static ENUMERATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s+").unwrap());

/// Characters that cannot occur in an equation, such as OCR artifacts and quotes.
static NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s+\-=()*/.^×÷]").unwrap());

fn is_unicode_space(c: char) -> bool {
    matches!(
        c,
        '\u{00a0}' | '\u{1680}' | '\u{2000}'..='\u{200a}' | '\u{202f}' | '\u{205f}' | '\u{3000}'
    )
}

/// Replaces unicode spaces by ASCII spaces and unicode minus signs by `-`.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            c if is_unicode_space(c) => ' ',
            '\u{2212}' | '\u{2013}' => '-',
            c => c,
        })
        .collect()
}

/// Normalizes one line of problem text.
///
/// Cleans unicode noise, drops characters no equation uses, trims, and strips a
/// leading enumeration prefix.
pub fn normalize_problem_text(text: &str) -> String {
    let cleaned = clean_text(text);
    let cleaned = NOISE.replace_all(&cleaned, "");
    ENUMERATION
        .replace(cleaned.trim(), "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_noise() {
        assert_eq!(
            normalize_problem_text("3x\u{202f}\u{2212}\u{2009}5 = 10\u{00a0}"),
            "3x - 5 = 10"
        );
    }

    #[test]
    fn test_enumeration_prefix() {
        assert_eq!(normalize_problem_text("12. 4x + 3 = 19"), "4x + 3 = 19");
        assert_eq!(normalize_problem_text("  3) 2(x + 1) = 8"), "2(x + 1) = 8");
        assert_eq!(normalize_problem_text("2.5x = 10"), "2.5x = 10");
    }

    #[test]
    fn test_ocr_noise() {
        assert_eq!(normalize_problem_text("| 3x + 5 = 20 ;"), "3x + 5 = 20");
        assert_eq!(normalize_problem_text("\u{201c}2(x - 1) = 6\u{201d}"), "2(x - 1) = 6");
        assert_eq!(normalize_problem_text("4) x^2 = 16 ~"), "x^2 = 16");
        assert_eq!(normalize_problem_text("6 × x ÷ 2 = 9"), "6 × x ÷ 2 = 9");
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(normalize_problem_text(" \u{2009} "), "");
    }
}
