//! Escape-sequence decoding
//!
//! Converts the backslash accent/ligature markup found in field values
//! into display characters.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // \"a  \"{a}  and friends
    static ref UMLAUT: Regex = Regex::new(r#"\\"\{?([aouAOU])\}?"#).unwrap();
    // \"s  \"{s}
    static ref SHARP_S: Regex = Regex::new(r#"\\"\{?s\}?"#).unwrap();
    // \c{c}  \c{S}
    static ref CEDILLA: Regex = Regex::new(r"\\c\{([cCsS])\}").unwrap();
    // \~n  \~N
    static ref TILDE_N: Regex = Regex::new(r"\\~([nN])").unwrap();
    // \`a  \'e  \'{e}  and friends
    static ref ACCENT: Regex = Regex::new(r"\\([`'])\{?([aeiouAEIOU])\}?").unwrap();
}

/// Decode escape markup into display characters.
///
/// Pure and total: malformed markup stays literal, and text without
/// markup comes back unchanged except that every remaining brace is
/// stripped. The passes run in a fixed order, since the accent passes
/// must see the brace-wrapped forms before the final pass removes braces.
pub fn decode(text: &str) -> String {
    let decoded = UMLAUT.replace_all(text, |caps: &Captures| {
        match &caps[1] {
            "a" => "ä",
            "o" => "ö",
            "u" => "ü",
            "A" => "Ä",
            "O" => "Ö",
            _ => "Ü",
        }
        .to_string()
    });

    let decoded = SHARP_S.replace_all(&decoded, "ß");
    let decoded = decoded.replace("\\ss{}", "ß");

    let decoded = CEDILLA.replace_all(&decoded, |caps: &Captures| {
        match &caps[1] {
            "c" => "ç",
            "C" => "Ç",
            "s" => "ş",
            _ => "Ş",
        }
        .to_string()
    });

    let decoded = TILDE_N.replace_all(&decoded, |caps: &Captures| {
        match &caps[1] {
            "n" => "ñ",
            _ => "Ñ",
        }
        .to_string()
    });

    // the table only carries grave/acute on the lowercase vowels; any
    // other combination loses its diacritic and keeps the bare letter
    let decoded = ACCENT.replace_all(&decoded, |caps: &Captures| {
        match (&caps[1], &caps[2]) {
            ("`", "a") => "à",
            ("'", "a") => "á",
            ("`", "e") => "è",
            ("'", "e") => "é",
            ("`", "i") => "ì",
            ("'", "i") => "í",
            ("`", "o") => "ò",
            ("'", "o") => "ó",
            ("`", "u") => "ù",
            ("'", "u") => "ú",
            (_, letter) => letter,
        }
        .to_string()
    });

    decoded
        .replace("\\ae", "æ")
        .replace("\\AE", "Æ")
        .replace("\\oe", "œ")
        .replace("\\OE", "Œ")
        .replace('~', " ")
        .replace("---", "—")
        .replace("--", "–")
        .replace(['{', '}'], "")
}
