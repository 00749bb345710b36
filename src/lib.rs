//! Parsing and IEEE-style citation rendering for `.bib` bibliographies.
//!
//! One entry in such a source looks like this:
//!
//! ```tex
//! @book{DBLP:books/aw/Knuth73a,
//!     author    = {Donald E. Knuth},
//!     title     = {The Art of Computer Programming},
//!     publisher = {Addison-Wesley},
//!     year      = {1973}
//! }
//! ```
//!
//! [`parse`] scans a whole source and returns a map from citation key to
//! [`BibRecord`]. The scan is tolerant: a stray “@” is skipped, unknown
//! entry types and field names are stored generically, and the one
//! unrecoverable shape (an entry whose braces never balance) truncates
//! the result to the records found before it instead of failing. Every
//! field value is run through [`decode`], which turns backslash escape
//! markup (`M\"uller`, `\c{c}`, `1--10`) into display characters.
//!
//! [`render`] turns one record into the body of a numbered reference;
//! [`Locale`] switches its structural labels between English and German:
//!
//! ```rust
//! use bibcite::{parse, render, Locale};
//!
//! let records = parse(r#"@article{dijkstra1968,
//!     author  = {Dijkstra, Edsger W.},
//!     title   = {Go To Statement Considered Harmful},
//!     journal = {Commun. ACM},
//!     volume  = {11},
//!     pages   = {147--148},
//!     year    = {1968}
//! }"#);
//! let line = render(&records["dijkstra1968"], 1, Locale::En);
//! assert_eq!(
//!     line,
//!     "[1] Edsger W. Dijkstra, “Go To Statement Considered Harmful.” \
//!      Commun. ACM, vol. 11, pp. 147–148, 1968"
//! );
//! ```
//!
//! On top of the core, [`resolve_citations`] and [`process_citations`]
//! wire a bibliography into a rendered page: `[cite:KEY]` markers become
//! numbered links, cited records come back as a reference list, and the
//! page itself is only touched through the [`DocumentSink`] trait.

mod authors;
mod decode;
mod document;
mod parser;
mod render;
mod types;

pub use crate::authors::format_authors;
pub use crate::decode::decode;
pub use crate::document::{process_citations, resolve_citations, DocumentSink, Reference};
pub use crate::parser::{parse, Parser};
pub use crate::render::render;
pub use crate::types::{BibRecord, Locale};
