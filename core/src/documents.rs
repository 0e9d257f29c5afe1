use crate::persist::{decode, encode, fail, id_key, OrAbort, Store, Tx, TxResult};
use crate::{categories, postings, DocId, Document, IndexError, Result};
use std::collections::HashMap;

/// Insert a new document row.
pub fn put(tx: &Tx<'_>, document: &Document) -> TxResult<()> {
    let key = id_key(document.id);
    if tx.documents.get(&key[..])?.is_some() {
        return fail(IndexError::ConstraintViolation(format!("document {} already exists", document.id)));
    }
    if !categories::exists(tx, document.category_id)? {
        return fail(IndexError::ConstraintViolation(format!(
            "document {} references unknown category {}",
            document.id, document.category_id
        )));
    }
    tx.documents.insert(&key[..], encode(document).or_abort()?)?;
    Ok(())
}

/// Delete a document row. Its postings must already be gone.
/// Returns whether a row was removed.
pub fn remove(tx: &Tx<'_>, doc_id: DocId) -> TxResult<bool> {
    if postings::exists_for_document(tx, doc_id)? {
        return fail(IndexError::ConstraintViolation(format!("document {doc_id} still has postings")));
    }
    Ok(tx.documents.remove(&id_key(doc_id)[..])?.is_some())
}

pub fn exists(tx: &Tx<'_>, doc_id: DocId) -> TxResult<bool> {
    Ok(tx.documents.get(&id_key(doc_id)[..])?.is_some())
}

pub fn get_document(store: &Store, doc_id: DocId) -> Result<Option<Document>> {
    match store.documents.get(id_key(doc_id))? {
        Some(raw) => Ok(Some(decode(&raw)?)),
        None => Ok(None),
    }
}

/// Title of every stored document, keyed by id. Used when joining postings for display.
pub(crate) fn titles(store: &Store) -> Result<HashMap<DocId, String>> {
    let mut out = HashMap::new();
    for item in store.documents.iter() {
        let (_, raw) = item?;
        let doc: Document = decode(&raw)?;
        out.insert(doc.id, doc.title);
    }
    Ok(out)
}
