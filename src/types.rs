use std::collections::HashMap;

/// Language switch for rendered citations. Swaps the structural labels
/// (“vol.”/“Band”, “pp.”/“S.”, …) and the list connector (“and”/“und”).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Locale {
    En,
    De,
}

impl Locale {
    /// Interpret a language tag leniently. “de” (any case) selects German,
    /// every other tag falls back to English.
    pub fn from_tag(tag: &str) -> Locale {
        if tag.trim().eq_ignore_ascii_case("de") {
            Locale::De
        } else {
            Locale::En
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

/// One record in a `.bib` source
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BibRecord {
    /// entry type, lowercased, e.g. “article”
    pub kind: String,
    /// citation key, e.g. “DBLP:books/aw/Knuth73a”
    pub key: String,
    /// map of lowercase field names to escape-decoded values,
    /// e.g. “author” mapped to “Donald Ervin Knuth”
    pub fields: HashMap<String, String>,
}

impl BibRecord {
    /// Generate a new, empty instance of BibRecord. Can also be called
    /// through the `Default` implementation.
    pub fn new() -> BibRecord {
        BibRecord {
            kind: String::new(),
            key: String::new(),
            fields: HashMap::new(),
        }
    }

    /// Look up a field value. An empty value counts as absent, so it can
    /// never contribute an empty segment to a citation.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|data| !data.is_empty())
    }
}

impl Default for BibRecord {
    fn default() -> Self {
        Self::new()
    }
}
