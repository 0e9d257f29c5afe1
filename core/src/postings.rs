//! Posting store: the inverted index proper.
//!
//! Postings are grouped per term in the `index` relation, each list in insertion order.
//! `doc_terms` keeps the distinct terms of every document so removing a document's
//! postings never needs a scan.

use crate::index::Posting;
use crate::persist::{decode, decode_key, encode, fail, id_key, OrAbort, Store, Tx, TxResult};
use crate::{dictionary, documents, DocId, IndexError, Result};

fn load_list(tx: &Tx<'_>, term: &str) -> TxResult<Vec<Posting>> {
    match tx.index.get(term.as_bytes())? {
        Some(raw) => decode(&raw).or_abort(),
        None => Ok(Vec::new()),
    }
}

fn load_doc_terms(tx: &Tx<'_>, doc_id: DocId) -> TxResult<Vec<String>> {
    match tx.doc_terms.get(&id_key(doc_id)[..])? {
        Some(raw) => decode(&raw).or_abort(),
        None => Ok(Vec::new()),
    }
}

/// Record that `term` occurs `count` times in `doc_id`.
///
/// Both the term and the document must already exist, and the pair must not have a posting yet.
/// Only the `index` relation is written; the document's forward list is written by
/// [`record_document_terms`].
pub fn upsert(tx: &Tx<'_>, term: &str, doc_id: DocId, count: u32) -> TxResult<()> {
    if count == 0 {
        return fail(IndexError::ConstraintViolation(format!("zero count for '{term}' in document {doc_id}")));
    }
    if !dictionary::contains_term(tx, term)? {
        return fail(IndexError::ConstraintViolation(format!("posting references unknown term '{term}'")));
    }
    if !documents::exists(tx, doc_id)? {
        return fail(IndexError::ConstraintViolation(format!("posting references unknown document {doc_id}")));
    }

    let mut list = load_list(tx, term)?;
    if list.iter().any(|p| p.doc_id == doc_id) {
        return fail(IndexError::ConstraintViolation(format!("duplicate posting ('{term}', {doc_id})")));
    }
    list.push(Posting { doc_id, term_count: count });
    tx.index.insert(term.as_bytes(), encode(&list).or_abort()?)?;
    Ok(())
}

/// Store the distinct terms `doc_id` has postings for. Written once per indexing pass.
pub fn record_document_terms(tx: &Tx<'_>, doc_id: DocId, terms: &[String]) -> TxResult<()> {
    let key = id_key(doc_id);
    if tx.doc_terms.get(&key[..])?.is_some() {
        return fail(IndexError::ConstraintViolation(format!("document {doc_id} is already indexed")));
    }
    if !terms.is_empty() {
        tx.doc_terms.insert(&key[..], encode(&terms).or_abort()?)?;
    }
    Ok(())
}

/// Post every `(term, count)` of one document, then record its forward list.
pub fn add_document_postings(tx: &Tx<'_>, doc_id: DocId, freqs: &[(String, u32)]) -> TxResult<()> {
    for (term, count) in freqs {
        upsert(tx, term, doc_id, *count)?;
    }
    let terms: Vec<String> = freqs.iter().map(|(t, _)| t.clone()).collect();
    record_document_terms(tx, doc_id, &terms)
}

/// Delete every posting of `doc_id`, returning the distinct terms they belonged to.
pub fn remove_all_for_document(tx: &Tx<'_>, doc_id: DocId) -> TxResult<Vec<String>> {
    let terms = load_doc_terms(tx, doc_id)?;
    for term in &terms {
        let mut list = load_list(tx, term)?;
        list.retain(|p| p.doc_id != doc_id);
        if list.is_empty() {
            tx.index.remove(term.as_bytes())?;
        } else {
            tx.index.insert(term.as_bytes(), encode(&list).or_abort()?)?;
        }
    }
    tx.doc_terms.remove(&id_key(doc_id)[..])?;
    Ok(terms)
}

/// Whether any document still has a posting for `term`.
pub fn exists_for_term(tx: &Tx<'_>, term: &str) -> TxResult<bool> {
    Ok(!load_list(tx, term)?.is_empty())
}

pub fn exists_for_document(tx: &Tx<'_>, doc_id: DocId) -> TxResult<bool> {
    Ok(tx.doc_terms.get(&id_key(doc_id)[..])?.is_some())
}

/// Every `(term, posting)` pair, ordered by term and then by insertion.
pub fn list_all(store: &Store) -> Result<Vec<(String, Posting)>> {
    let mut out = Vec::new();
    for item in store.index.iter() {
        let (key, raw) = item?;
        let term = decode_key(&key)?;
        let list: Vec<Posting> = decode(&raw)?;
        out.extend(list.into_iter().map(|p| (term.clone(), p)));
    }
    Ok(out)
}

/// `(term, count)` for each posting of one document, in the order they were indexed.
pub fn document_postings(store: &Store, doc_id: DocId) -> Result<Vec<(String, u32)>> {
    let terms: Vec<String> = match store.doc_terms.get(id_key(doc_id))? {
        Some(raw) => decode(&raw)?,
        None => return Ok(Vec::new()),
    };
    let mut out = Vec::with_capacity(terms.len());
    for term in terms {
        let list: Vec<Posting> = match store.index.get(term.as_bytes())? {
            Some(raw) => decode(&raw)?,
            None => Vec::new(),
        };
        let posting = list.into_iter().find(|p| p.doc_id == doc_id).ok_or_else(|| {
            IndexError::StorageUnavailable(format!("forward entry '{term}' of document {doc_id} has no posting"))
        })?;
        out.push((term, posting.term_count));
    }
    Ok(out)
}
