pub mod categories;
pub mod dictionary;
pub mod documents;
pub mod error;
pub mod index;
pub mod maintainer;
pub mod persist;
pub mod postings;
pub mod reader;
pub mod tokenizer;

pub use categories::create_category;
pub use error::{IndexError, Result};
pub use index::{Category, CategoryId, DocId, Document, NewDocument, Posting, Term};
pub use maintainer::{create_document, delete_document, update_document, IndexStats};
pub use persist::Store;
pub use reader::get_index;
