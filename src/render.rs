//! IEEE-style citation rendering
//!
//! Assembles the body of one numbered reference-list entry from a
//! record, a display index and a locale.

use crate::authors::format_authors;
use crate::decode::decode;
use crate::types::{BibRecord, Locale};

/// Entry kinds with a dedicated citation layout. Aliases collapse onto
/// one variant; everything else goes through the fallback arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Article,
    InProceedings,
    Book,
    TechReport,
    Misc,
    Other,
}

impl EntryKind {
    fn classify(kind: &str) -> EntryKind {
        match kind {
            "article" => EntryKind::Article,
            "inproceedings" | "conference" => EntryKind::InProceedings,
            "book" => EntryKind::Book,
            "techreport" => EntryKind::TechReport,
            "misc" | "online" => EntryKind::Misc,
            _ => EntryKind::Other,
        }
    }
}

/// Render one record as the body of a numbered IEEE-style reference.
///
/// `index` is the display index assigned to the record's citation key
/// (its `[n]` prefix). Pure: identical inputs always yield the identical
/// string. A missing field drops its segment and nothing else; the call
/// cannot fail.
pub fn render(record: &BibRecord, index: usize, locale: Locale) -> String {
    let authors = format_authors(record.field("author").unwrap_or(""), locale);

    let mut title = decode(record.field("title").unwrap_or(""))
        .trim()
        .to_string();
    if !title.ends_with('.') {
        title.push('.');
    }

    let mut citation = if authors.is_empty() {
        format!("[{index}] “{title}”")
    } else {
        format!("[{index}] {authors}, “{title}”")
    };

    match EntryKind::classify(&record.kind) {
        EntryKind::Article => {
            if let Some(journal) = record.field("journal") {
                citation.push(' ');
                citation.push_str(journal);
            }
            if let Some(volume) = record.field("volume") {
                citation.push_str(&match locale {
                    Locale::De => format!(", Band {volume}"),
                    Locale::En => format!(", vol. {volume}"),
                });
            }
            if let Some(number) = record.field("number") {
                citation.push_str(&match locale {
                    Locale::De => format!(", Nr. {number}"),
                    Locale::En => format!(", no. {number}"),
                });
            }
            if let Some(pages) = record.field("pages") {
                citation.push_str(&format!(", {}", format_pages(pages, locale)));
            }
            let when: Vec<&str> = [record.field("month"), record.field("year")]
                .into_iter()
                .flatten()
                .collect();
            if !when.is_empty() {
                citation.push_str(&format!(", {}", when.join(" ")));
            }
        }
        EntryKind::InProceedings => {
            if let Some(booktitle) = record.field("booktitle") {
                citation.push_str(&format!(" in {booktitle}"));
            }
            if let Some(editor) = record.field("editor") {
                citation.push_str(&match locale {
                    Locale::De => format!(", Red. {editor}"),
                    Locale::En => format!(", Ed. {editor}"),
                });
            }
            if let Some(address) = record.field("address") {
                citation.push_str(&format!(", {address}"));
            }
            if let Some(pages) = record.field("pages") {
                citation.push_str(&format!(", {}", format_pages(pages, locale)));
            }
            if let Some(year) = record.field("year") {
                citation.push_str(&format!(", {year}"));
            }
        }
        EntryKind::Book => {
            if let Some(publisher) = record.field("publisher") {
                citation.push(' ');
                citation.push_str(publisher);
            }
            if let Some(edition) = record.field("edition") {
                citation.push_str(&match locale {
                    Locale::De => format!(", Ausg. {edition}"),
                    Locale::En => format!(", {edition} ed."),
                });
            }
            if let Some(address) = record.field("address") {
                citation.push_str(&format!(", {address}"));
            }
            if let Some(year) = record.field("year") {
                citation.push_str(&format!(", {year}"));
            }
        }
        EntryKind::TechReport => {
            if let Some(institution) = record.field("institution") {
                citation.push_str(&format!(", {institution}"));
            }
            if let Some(number) = record.field("number") {
                citation.push_str(&match locale {
                    Locale::De => format!(", Tech. Ber. {number}"),
                    Locale::En => format!(", Tech. Rep. {number}"),
                });
            }
            if let Some(year) = record.field("year") {
                citation.push_str(&format!(", {year}"));
            }
        }
        EntryKind::Misc => {
            if let Some(howpublished) = record.field("howpublished") {
                citation.push(' ');
                citation.push_str(howpublished);
            }
            if let Some(note) = record.field("note") {
                citation.push_str(&format!(", {note}"));
            }
            if let Some(url) = record.field("url") {
                citation.push_str(&format!(", {}", format_url(url, locale)));
            }
            if let Some(year) = record.field("year") {
                citation.push_str(&format!(", {year}"));
            }
            if let Some(urldate) = record.field("urldate") {
                citation.push_str(&match locale {
                    Locale::De => format!(", Abgerufen: {urldate}"),
                    Locale::En => format!(", Accessed: {urldate}"),
                });
            }
        }
        EntryKind::Other => {
            if let Some(venue) = record
                .field("journal")
                .or_else(|| record.field("booktitle"))
            {
                citation.push(' ');
                citation.push_str(venue);
            }
            if let Some(publisher) = record.field("publisher") {
                citation.push_str(&format!(", {publisher}"));
            }
            if let Some(year) = record.field("year") {
                citation.push_str(&format!(", {year}"));
            }
            if let Some(url) = record.field("url") {
                citation.push_str(&format!(", {}", format_url(url, locale)));
            }
        }
    }

    citation.trim().to_string()
}

/// Prefix the locale's pages label; page ranges written with “--” are
/// normalized to an en dash for records built outside the parser.
fn format_pages(pages: &str, locale: Locale) -> String {
    let pages = pages.replace("--", "–");
    match locale {
        Locale::De => format!("S. {pages}"),
        Locale::En => format!("pp. {pages}"),
    }
}

fn format_url(url: &str, locale: Locale) -> String {
    let verb = match locale {
        Locale::De => "Verfügbar",
        Locale::En => "Available",
    };
    format!("[Online]. {verb}: <a href=\"{url}\">{url}</a>")
}
