//! Index maintenance: create, replace, and delete documents while keeping terms,
//! documents, and postings consistent. Each public operation is one store transaction.

use crate::persist::{Store, Tx, TxResult};
use crate::tokenizer::{char_count, term_frequencies, tokenize};
use crate::{categories, dictionary, documents, postings, DocId, Document, NewDocument, Result};

/// What a single indexing or unindexing pass touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub postings: usize,
    pub terms_created: usize,
    pub terms_removed: usize,
}

/// Store a new document and index its terms.
pub fn create_document(store: &Store, doc: &NewDocument) -> Result<IndexStats> {
    let stats = store.transaction(|tx| index_document(tx, doc))?;
    tracing::info!(doc_id = doc.id, postings = stats.postings, terms_created = stats.terms_created, "document created");
    Ok(stats)
}

/// Remove a document, its postings, and any term left without postings.
/// Returns `false` if no document had this id.
pub fn delete_document(store: &Store, doc_id: DocId) -> Result<bool> {
    let (existed, stats) = store.transaction(|tx| unindex_document(tx, doc_id))?;
    if existed {
        tracing::info!(doc_id, terms_removed = stats.terms_removed, "document deleted");
    } else {
        tracing::debug!(doc_id, "delete of unknown document ignored");
    }
    Ok(existed)
}

/// Replace a document wholesale: delete then recreate under the same id, atomically.
pub fn update_document(store: &Store, doc: &NewDocument) -> Result<IndexStats> {
    let (removed, created) = store.transaction(|tx| {
        let (_, removed) = unindex_document(tx, doc.id)?;
        let created = index_document(tx, doc)?;
        Ok((removed, created))
    })?;
    tracing::info!(
        doc_id = doc.id,
        postings = created.postings,
        terms_created = created.terms_created,
        terms_removed = removed.terms_removed,
        "document updated"
    );
    Ok(IndexStats { terms_removed: removed.terms_removed, ..created })
}

fn index_document(tx: &Tx<'_>, doc: &NewDocument) -> TxResult<IndexStats> {
    let category_id = categories::category_id(tx, &doc.category)?;
    let record = Document {
        id: doc.id,
        text: doc.text.clone(),
        title: doc.title.clone(),
        num_chars: char_count(&doc.text) as u32,
        date: doc.date,
        category_id,
    };
    documents::put(tx, &record)?;

    let tokens = tokenize(&doc.text);
    let freqs = term_frequencies(&tokens);
    let mut stats = IndexStats { postings: freqs.len(), ..IndexStats::default() };
    for (term, _) in &freqs {
        if dictionary::ensure_term(tx, term)? {
            tracing::debug!(term = %term, "term created");
            stats.terms_created += 1;
        }
    }
    postings::add_document_postings(tx, doc.id, &freqs)?;
    Ok(stats)
}

// Order matters: postings go first so the orphan check and the document delete see them gone.
fn unindex_document(tx: &Tx<'_>, doc_id: DocId) -> TxResult<(bool, IndexStats)> {
    let terms = postings::remove_all_for_document(tx, doc_id)?;
    let mut stats = IndexStats { postings: terms.len(), ..IndexStats::default() };
    for term in &terms {
        if dictionary::remove_term_if_orphaned(tx, term)? {
            tracing::debug!(term = %term, "orphaned term removed");
            stats.terms_removed += 1;
        }
    }
    let existed = documents::remove(tx, doc_id)?;
    Ok((existed, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndexError;
    use time::macros::date;

    fn doc(id: DocId, title: &str, text: &str, category: &str) -> NewDocument {
        NewDocument {
            id,
            text: text.into(),
            title: title.into(),
            date: date!(2023 - 02 - 14),
            category: category.into(),
        }
    }

    fn store() -> Store {
        let store = Store::temporary().unwrap();
        categories::create_category(&store, 1, "Sports").unwrap();
        store
    }

    #[test]
    fn create_reports_stats() {
        let store = store();
        let stats = create_document(&store, &doc(1, "Exercise", "run run walk", "Sports")).unwrap();
        assert_eq!(stats, IndexStats { postings: 2, terms_created: 2, terms_removed: 0 });
        let stats = create_document(&store, &doc(2, "Other", "walk swim", "Sports")).unwrap();
        assert_eq!(stats.terms_created, 1);
    }

    #[test]
    fn failed_create_rolls_back_everything() {
        let store = store();
        let err = create_document(&store, &doc(1, "Exercise", "brand new words", "Missing")).unwrap_err();
        assert!(matches!(err, IndexError::NotFound(_)));
        assert!(documents::get_document(&store, 1).unwrap().is_none());
        assert!(dictionary::list_terms(&store).unwrap().is_empty());
    }

    #[test]
    fn duplicate_id_leaves_first_document_untouched() {
        let store = store();
        create_document(&store, &doc(1, "First", "alpha beta", "Sports")).unwrap();
        let err = create_document(&store, &doc(1, "Second", "gamma", "Sports")).unwrap_err();
        assert!(matches!(err, IndexError::ConstraintViolation(_)));
        assert!(dictionary::get_term(&store, "gamma").unwrap().is_none());
        assert_eq!(documents::get_document(&store, 1).unwrap().unwrap().title, "First");
    }

    #[test]
    fn delete_unknown_document_is_a_noop() {
        let store = store();
        assert!(!delete_document(&store, 42).unwrap());
    }

    #[test]
    fn update_with_bad_category_keeps_old_version() {
        let store = store();
        create_document(&store, &doc(1, "Exercise", "baseball summer", "Sports")).unwrap();
        let err = update_document(&store, &doc(1, "Exercise", "swimming", "Nope")).unwrap_err();
        assert!(matches!(err, IndexError::NotFound(_)));
        let kept = postings::document_postings(&store, 1).unwrap();
        assert_eq!(kept, vec![("baseball".to_string(), 1), ("summer".to_string(), 1)]);
        assert!(dictionary::get_term(&store, "swimming").unwrap().is_none());
    }
}
