use std::collections::HashMap;
use std::fs;
use std::io;
use std::io::Read;
use std::path;
use std::str;

use crate::decode::decode;
use crate::types::BibRecord;

/// Parse a bibliography source into a map from citation key to record.
///
/// The scan never fails: the worst input yields an empty or partial map.
/// Stray “@” characters are skipped, unknown entry types and field names
/// are stored generically and a later record with an already seen key
/// overwrites the earlier one. The one unrecoverable shape is an entry
/// whose brace span never balances: the scan stops there and returns
/// the records collected so far, discarding everything after it.
///
/// Every field value is run through [`decode`] before it is stored, so
/// records carry display text, not escape markup.
pub fn parse(text: &str) -> HashMap<String, BibRecord> {
    let bytes = text.as_bytes();
    let mut records = HashMap::new();
    let mut pos = 0;

    while let Some(at) = find_byte(bytes, pos, b'@') {
        // entry type: a word directly after the marker, then optional
        // whitespace, then the opening brace
        let mut word_end = at + 1;
        while word_end < bytes.len() && is_word_byte(bytes[word_end]) {
            word_end += 1;
        }
        let mut brace_open = word_end;
        while brace_open < bytes.len() && bytes[brace_open].is_ascii_whitespace() {
            brace_open += 1;
        }
        if word_end == at + 1 || brace_open >= bytes.len() || bytes[brace_open] != b'{' {
            // stray “@”, skip it and keep scanning
            pos = at + 1;
            continue;
        }
        let kind = text[at + 1..word_end].to_lowercase();

        // citation key: everything up to the next comma
        let comma = match find_byte(bytes, brace_open + 1, b',') {
            Some(comma) => comma,
            None => break,
        };
        let key = text[brace_open + 1..comma].trim().to_string();

        // record extent: depth-counted scan from the opening brace; an
        // unbalanced span ends the whole parse
        let close = match matching_brace(bytes, brace_open) {
            Some(close) => close,
            None => break,
        };

        let body = if comma + 1 <= close {
            &text[comma + 1..close]
        } else {
            ""
        };
        if !key.is_empty() {
            records.insert(
                key.clone(),
                BibRecord {
                    kind,
                    key,
                    fields: parse_fields(body),
                },
            );
        }
        pos = close + 1;
    }

    records
}

/// Parse the fields of one record body, one `name = value` pair at a
/// time. Values are braced (nesting counted), quoted (a literal quote
/// always terminates, there is no escaping) or bare up to the next comma.
fn parse_fields(body: &str) -> HashMap<String, String> {
    let bytes = body.as_bytes();
    let mut fields = HashMap::new();
    let mut idx = 0;

    while idx < bytes.len() {
        // skip whitespace and field separators
        while idx < bytes.len() && (bytes[idx].is_ascii_whitespace() || bytes[idx] == b',') {
            idx += 1;
        }
        if idx >= bytes.len() {
            break;
        }

        // field name
        let name_start = idx;
        while idx < bytes.len() && is_name_byte(bytes[idx]) {
            idx += 1;
        }
        let name = body[name_start..idx].trim().to_lowercase();

        // skip to the assignment
        while idx < bytes.len() && bytes[idx] != b'=' {
            idx += 1;
        }
        if idx >= bytes.len() {
            break;
        }
        idx += 1;
        while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
            idx += 1;
        }

        let raw;
        if idx < bytes.len() && bytes[idx] == b'{' {
            let mut j = idx;
            let mut depth = 0usize;
            while j < bytes.len() {
                match bytes[j] {
                    b'{' => depth += 1,
                    b'}' => depth -= 1,
                    _ => {}
                }
                j += 1;
                if depth == 0 {
                    break;
                }
            }
            raw = if j > idx + 1 { &body[idx + 1..j - 1] } else { "" };
            idx = j;
        } else if idx < bytes.len() && bytes[idx] == b'"' {
            let mut j = idx + 1;
            while j < bytes.len() && bytes[j] != b'"' {
                j += 1;
            }
            raw = &body[idx + 1..j];
            idx = j + 1;
        } else {
            // bare token, e.g. a plain year
            let mut j = idx;
            while j < bytes.len() && bytes[j] != b',' {
                j += 1;
            }
            raw = &body[idx..j];
            idx = j;
        }

        fields.insert(name, decode(raw.trim()));
    }

    fields
}

/// Index of the brace closing the span opened at `open`, counting nested
/// pairs. None if the input ends while the span is still open.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Parser holding a `.bib` source, in memory as one string
pub struct Parser {
    src: String,
}

impl Parser {
    /// Use a file at some filepath as source for the parsing process.
    pub fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Parser, io::Error> {
        let mut fd = fs::File::open(path)?;
        let mut buf = String::new();
        fd.read_to_string(&mut buf)?;
        Ok(Parser { src: buf })
    }

    /// Use a string as source for the parsing process.
    pub fn from_string(data: String) -> Parser {
        Parser { src: data }
    }

    /// Parse the source into records, keyed by citation key.
    pub fn records(&self) -> HashMap<String, BibRecord> {
        parse(&self.src)
    }
}

impl str::FromStr for Parser {
    type Err = io::Error;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(Parser {
            src: data.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry() {
        let records = parse("@article{k1, title={T}, year={2020}}");
        assert_eq!(records.len(), 1);
        let record = &records["k1"];
        assert_eq!(record.kind, "article");
        assert_eq!(record.key, "k1");
        assert_eq!(record.fields.get("title"), Some(&"T".to_string()));
        assert_eq!(record.fields.get("year"), Some(&"2020".to_string()));
    }

    #[test]
    fn test_taocp() {
        let src = r#"@book{DBLP:books/lib/Knuth97,
  author    = {Donald Ervin Knuth},
  title     = {The art of computer programming, Volume {I:} Fundamental Algorithms,
               3rd Edition},
  publisher = {Addison-Wesley},
  year      = {1997},
  isbn      = {0201896834}
}"#;
        let records = parse(src);
        let record = &records["DBLP:books/lib/Knuth97"];
        assert_eq!(record.kind, "book");
        assert_eq!(record.fields["year"], "1997");
        assert_eq!(record.fields["publisher"], "Addison-Wesley");
    }

    #[test]
    fn test_nested_braces_decoded() {
        let records = parse("@book{k, title={A {B} C}}");
        assert_eq!(records["k"].fields["title"], "A B C");
    }

    #[test]
    fn test_quoted_and_bare_values() {
        let records = parse(r#"@misc{k, note = "plain text", year = 2001, month = jan}"#);
        let fields = &records["k"].fields;
        assert_eq!(fields["note"], "plain text");
        assert_eq!(fields["year"], "2001");
        assert_eq!(fields["month"], "jan");
    }

    #[test]
    fn test_escapes_decoded_at_parse_time() {
        let records = parse(r#"@article{k, author = {M\"uller, J.}, pages = {1--10}}"#);
        let fields = &records["k"].fields;
        assert_eq!(fields["author"], "Müller, J.");
        assert_eq!(fields["pages"], "1–10");
    }

    #[test]
    fn test_stray_marker_is_skipped() {
        let records = parse("mail@example.org @ @article{k1, year={2020}}");
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("k1"));
    }

    #[test]
    fn test_unbalanced_entry_truncates_parse() {
        let src = "@article{a1, title={A}}\n\
                   @book{b1, title={Unbalanced}\n\
                   @misc{c1, title={C}}";
        let records = parse(src);
        // everything from the unbalanced entry onwards is discarded
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("a1"));
        assert!(!records.contains_key("b1"));
        assert!(!records.contains_key("c1"));
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let records = parse("@article{k, year={1}} @book{k, year={2}}");
        assert_eq!(records.len(), 1);
        assert_eq!(records["k"].kind, "book");
        assert_eq!(records["k"].fields["year"], "2");
    }

    #[test]
    fn test_duplicate_field_overwrites() {
        let records = parse("@misc{k, note={a}, note={b}}");
        assert_eq!(records["k"].fields["note"], "b");
    }

    #[test]
    fn test_kind_lowercased_and_key_trimmed() {
        let records = parse("@ARTICLE{  spaced key  , year={1}}");
        let record = &records["spaced key"];
        assert_eq!(record.kind, "article");
        assert_eq!(record.key, "spaced key");
    }

    #[test]
    fn test_empty_key_is_dropped() {
        let records = parse("@misc{, year={1}} @article{k1, year={2}}");
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("k1"));
    }

    #[test]
    fn test_entry_without_comma_stops_scan() {
        let records = parse("@article{a1, year={1}} @misc{nofields}");
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("a1"));
    }

    #[test]
    fn test_unterminated_quote_runs_to_body_end() {
        // the closing entry brace still balances the span; the quoted
        // value simply captures everything up to the body boundary
        let records = parse(r#"@misc{k, note = "no closing}"#);
        assert_eq!(records["k"].fields["note"], "no closing");
    }
}
