use serde::{Deserialize, Serialize};
use time::Date;

pub type DocId = u32;
pub type CategoryId = u32;

/// A distinct normalized term and its character length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
    pub num_chars: u32,
}

/// Stored value of a `terms` row; the term text is the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TermRecord {
    pub num_chars: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
    pub title: String,
    /// Characters in `text` excluding whitespace and punctuation.
    pub num_chars: u32,
    pub date: Date,
    pub category_id: CategoryId,
}

/// One entry of a term's posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_count: u32,
}

/// Input for creating or replacing a document. The category is referenced by name.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub id: DocId,
    pub text: String,
    pub title: String,
    pub date: Date,
    pub category: String,
}
