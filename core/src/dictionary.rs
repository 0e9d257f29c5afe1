//! Term dictionary: the set of distinct terms currently referenced by some posting.

use crate::index::TermRecord;
use crate::persist::{decode, decode_key, encode, OrAbort, Store, Tx, TxResult};
use crate::postings;
use crate::{Result, Term};

/// Insert `term` with its character length unless it is already present.
/// Returns whether a new term was created.
pub fn ensure_term(tx: &Tx<'_>, term: &str) -> TxResult<bool> {
    if tx.terms.get(term.as_bytes())?.is_some() {
        return Ok(false);
    }
    let record = TermRecord { num_chars: term.chars().count() as u32 };
    tx.terms.insert(term.as_bytes(), encode(&record).or_abort()?)?;
    Ok(true)
}

/// Delete `term` if no posting in any document still refers to it.
/// Returns whether the term was removed.
pub fn remove_term_if_orphaned(tx: &Tx<'_>, term: &str) -> TxResult<bool> {
    if postings::exists_for_term(tx, term)? {
        return Ok(false);
    }
    Ok(tx.terms.remove(term.as_bytes())?.is_some())
}

pub fn contains_term(tx: &Tx<'_>, term: &str) -> TxResult<bool> {
    Ok(tx.terms.get(term.as_bytes())?.is_some())
}

pub fn get_term(store: &Store, term: &str) -> Result<Option<Term>> {
    match store.terms.get(term.as_bytes())? {
        Some(raw) => {
            let record: TermRecord = decode(&raw)?;
            Ok(Some(Term { text: term.to_string(), num_chars: record.num_chars }))
        }
        None => Ok(None),
    }
}

/// All terms in ascending byte order.
pub fn list_terms(store: &Store) -> Result<Vec<Term>> {
    let mut out = Vec::new();
    for item in store.terms.iter() {
        let (key, raw) = item?;
        let record: TermRecord = decode(&raw)?;
        out.push(Term { text: decode_key(&key)?, num_chars: record.num_chars });
    }
    Ok(out)
}
