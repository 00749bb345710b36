//! Author list normalization
//!
//! Turns the raw `author` field of a record into a joined name list,
//! ready for the head of a citation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Locale;

lazy_static! {
    static ref CONNECTOR: Regex = Regex::new(r"(?i)\s+and\s+").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a raw author field into a locale-correct joined name list.
///
/// Authors are separated by the word “and”. A name written as
/// “Family, Given” is flipped to “Given Family”; anything else is
/// assumed to be in display order already and passes through unchanged.
/// Two names join as “A and B” (“A und B”), three or more as
/// “A, B, and C” (“A, B, und C”). Returns an empty string for empty
/// input.
pub fn format_authors(raw: &str, locale: Locale) -> String {
    let stripped = raw.replace(['{', '}'], "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let names: Vec<String> = CONNECTOR
        .split(trimmed)
        .map(|name| {
            let name = name.trim();
            match name.find(',') {
                // “Family, Given” -> “Given Family”
                Some(comma) => {
                    format!("{} {}", name[comma + 1..].trim(), name[..comma].trim())
                }
                None => name.to_string(),
            }
        })
        .collect();

    let connector = match locale {
        Locale::De => "und",
        Locale::En => "and",
    };
    match names.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        [first, second] => format!("{first} {connector} {second}"),
        [head @ .., last] => format!("{}, {connector} {last}", head.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_authors_flipped() {
        assert_eq!(
            format_authors("Doe, Jane and Roe, Richard", Locale::En),
            "Jane Doe and Richard Roe"
        );
        assert_eq!(
            format_authors("Doe, Jane and Roe, Richard", Locale::De),
            "Jane Doe und Richard Roe"
        );
    }

    #[test]
    fn test_three_authors_oxford_comma() {
        assert_eq!(
            format_authors("A. Ahn and B. Bee and C. Cee", Locale::En),
            "A. Ahn, B. Bee, and C. Cee"
        );
        assert_eq!(
            format_authors("A. Ahn and B. Bee and C. Cee", Locale::De),
            "A. Ahn, B. Bee, und C. Cee"
        );
    }

    #[test]
    fn test_single_author_passthrough() {
        assert_eq!(format_authors("Jane Doe", Locale::En), "Jane Doe");
        assert_eq!(format_authors("Doe, Jane", Locale::De), "Jane Doe");
    }

    #[test]
    fn test_braces_and_whitespace_cleanup() {
        assert_eq!(
            format_authors("{Doe},\n   Jane  and  Roe,\tRichard", Locale::En),
            "Jane Doe and Richard Roe"
        );
    }

    #[test]
    fn test_connector_is_case_insensitive() {
        assert_eq!(
            format_authors("Doe, J. AND Roe, R.", Locale::En),
            "J. Doe and R. Roe"
        );
    }

    #[test]
    fn test_embedded_and_is_not_a_separator() {
        assert_eq!(format_authors("Brandon Sand", Locale::En), "Brandon Sand");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_authors("", Locale::En), "");
        assert_eq!(format_authors("  {} ", Locale::De), "");
    }
}
