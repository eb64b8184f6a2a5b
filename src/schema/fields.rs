//! Field definitions for table schemas.

use std::fmt;

/// The validation/coercion rule attached to an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; a single layer of surrounding quotes is stripped.
    Text,
    /// Must exact-match (case-sensitive) one of the listed values.
    Enum(&'static [&'static str]),
    /// Float in [0.0, 4.0].
    Gpa,
    /// Integer year in [1900, 2100].
    Year,
    /// Absolute URL, with a permissive host/path fallback.
    Url,
    /// URL on github.com with at least an owner/repo path.
    GithubUrl,
    /// Date in YYYY-MM-DD format.
    Date,
    /// Comma-split list whose every element must be in the vocabulary.
    VocabList(&'static [&'static str]),
    /// Bracketed array or single bare value; staged entries are unioned
    /// with anything already staged or on the target record.
    TextList,
    /// Image URL list, managed through the `image` sub-verbs only.
    ImageList,
}

impl FieldKind {
    /// Whether coerced values of this kind are JSON arrays.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            FieldKind::VocabList(_) | FieldKind::TextList | FieldKind::ImageList
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Enum(_) => "enum",
            FieldKind::Gpa => "gpa",
            FieldKind::Year => "year",
            FieldKind::Url => "url",
            FieldKind::GithubUrl => "github url",
            FieldKind::Date => "date (YYYY-MM-DD)",
            FieldKind::VocabList(_) => "vocabulary list",
            FieldKind::TextList => "list",
            FieldKind::ImageList => "image list",
        };
        write!(f, "{}", name)
    }
}

/// An editable field of a table: name plus validation rule.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}
