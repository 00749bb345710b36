//! Citation-marker substitution
//!
//! The layer between a parsed bibliography and a rendered page: it scans
//! document text for `[cite:KEY]` markers, numbers the cited records by
//! first occurrence and builds the reference list. The page itself stays
//! behind the [`DocumentSink`] trait; nothing here assumes its shape.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::render::render;
use crate::types::{BibRecord, Locale};

lazy_static! {
    static ref CITE_MARKER: Regex = Regex::new(r"\[cite:([^\]]+)\]").unwrap();
}

/// One rendered reference-list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// citation key of the referenced record
    pub key: String,
    /// display index assigned by first occurrence, starting at 1
    pub index: usize,
    /// citation body as produced by [`render`]
    pub body: String,
}

/// Host document abstraction. The substitution layer reads the text it
/// should scan, writes the rewritten text back and appends one item per
/// referenced record.
pub trait DocumentSink {
    /// Text scanned for citation markers.
    fn text(&self) -> &str;
    /// Replace the scanned text with its rewritten form.
    fn set_text(&mut self, text: String);
    /// Append one reference-list item.
    fn append_reference(&mut self, reference: &Reference);
}

/// Replace `[cite:KEY]` markers in `text` and build the reference list.
///
/// Each distinct key that resolves to a record gets the next free
/// display index, in order of first occurrence; every marker for that
/// key becomes a link carrying the index. A marker whose key is unknown
/// renders as the literal `[?]` placeholder and never claims an index.
/// The returned references are in display-index order, each carrying its
/// [`render`]ed body.
pub fn resolve_citations(
    text: &str,
    records: &HashMap<String, BibRecord>,
    locale: Locale,
) -> (String, Vec<Reference>) {
    let mut order: Vec<String> = Vec::new();
    let mut indices: HashMap<String, usize> = HashMap::new();

    let rewritten = CITE_MARKER
        .replace_all(text, |caps: &Captures| {
            let key = caps[1].trim();
            if !records.contains_key(key) {
                return "[?]".to_string();
            }
            let index = match indices.get(key) {
                Some(index) => *index,
                None => {
                    let index = order.len() + 1;
                    order.push(key.to_string());
                    indices.insert(key.to_string(), index);
                    index
                }
            };
            format!("<a href=\"#{key}\">[{index}]</a>")
        })
        .into_owned();

    let references = order
        .iter()
        .enumerate()
        .filter_map(|(i, key)| {
            records.get(key).map(|record| Reference {
                key: key.clone(),
                index: i + 1,
                body: render(record, i + 1, locale),
            })
        })
        .collect();

    (rewritten, references)
}

/// Run the substitution against a host document: rewrite its text and
/// append the reference list in display-index order.
pub fn process_citations<S: DocumentSink>(
    sink: &mut S,
    records: &HashMap<String, BibRecord>,
    locale: Locale,
) {
    let (rewritten, references) = resolve_citations(sink.text(), records, locale);
    sink.set_text(rewritten);
    for reference in &references {
        sink.append_reference(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn library() -> HashMap<String, BibRecord> {
        parse(
            "@article{k1, title={Alpha}, year={2001}}\n\
             @book{k2, title={Beta}, publisher={P}, year={2002}}",
        )
    }

    #[test]
    fn test_markers_numbered_by_first_occurrence() {
        let (text, references) = resolve_citations(
            "see [cite:k2] and [cite:k1], again [cite:k2]",
            &library(),
            Locale::En,
        );
        assert_eq!(
            text,
            "see <a href=\"#k2\">[1]</a> and <a href=\"#k1\">[2]</a>, \
             again <a href=\"#k2\">[1]</a>"
        );
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].key, "k2");
        assert_eq!(references[0].index, 1);
        assert!(references[0].body.starts_with("[1] “Beta.”"));
        assert_eq!(references[1].key, "k1");
        assert_eq!(references[1].index, 2);
    }

    #[test]
    fn test_unknown_key_renders_placeholder() {
        let (text, references) =
            resolve_citations("broken [cite:nope] link", &library(), Locale::En);
        assert_eq!(text, "broken [?] link");
        assert!(references.is_empty());
    }

    #[test]
    fn test_unknown_key_claims_no_index() {
        let (text, _) = resolve_citations(
            "[cite:nope] then [cite:k1]",
            &library(),
            Locale::En,
        );
        assert_eq!(text, "[?] then <a href=\"#k1\">[1]</a>");
    }

    #[test]
    fn test_marker_key_is_trimmed() {
        let (text, _) = resolve_citations("[cite: k1 ]", &library(), Locale::En);
        assert_eq!(text, "<a href=\"#k1\">[1]</a>");
    }

    #[test]
    fn test_text_without_markers_is_untouched() {
        let (text, references) =
            resolve_citations("no citations here [fig:x]", &library(), Locale::De);
        assert_eq!(text, "no citations here [fig:x]");
        assert!(references.is_empty());
    }

    struct PageStub {
        text: String,
        items: Vec<Reference>,
    }

    impl DocumentSink for PageStub {
        fn text(&self) -> &str {
            &self.text
        }

        fn set_text(&mut self, text: String) {
            self.text = text;
        }

        fn append_reference(&mut self, reference: &Reference) {
            self.items.push(reference.clone());
        }
    }

    #[test]
    fn test_process_through_sink() {
        let mut page = PageStub {
            text: "intro [cite:k1] body [cite:k2]".to_string(),
            items: Vec::new(),
        };
        process_citations(&mut page, &library(), Locale::De);
        assert_eq!(
            page.text,
            "intro <a href=\"#k1\">[1]</a> body <a href=\"#k2\">[2]</a>"
        );
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].key, "k1");
        assert_eq!(page.items[1].key, "k2");
    }
}
