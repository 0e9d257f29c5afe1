use crate::{IndexError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionError, TransactionalTree,
};
use sled::{Db, Transactional, Tree};
use std::path::Path;

const TERMS_TREE: &str = "terms";
const CATEGORIES_TREE: &str = "categories";
const CATEGORY_NAMES_TREE: &str = "category_names";
const DOCUMENTS_TREE: &str = "documents";
const INDEX_TREE: &str = "index";
const DOC_TERMS_TREE: &str = "doc_terms";

/// Result of a step running inside a store transaction. An `Err` aborts and rolls back.
pub type TxResult<T> = ConflictableTransactionResult<T, IndexError>;

/// Handle to the on-disk corpus: one sled tree per relation.
pub struct Store {
    db: Db,
    pub(crate) terms: Tree,
    pub(crate) categories: Tree,
    pub(crate) category_names: Tree,
    pub(crate) documents: Tree,
    pub(crate) index: Tree,
    pub(crate) doc_terms: Tree,
}

/// Transactional view over every relation, passed explicitly to each store function.
pub struct Tx<'a> {
    pub(crate) terms: &'a TransactionalTree,
    pub(crate) categories: &'a TransactionalTree,
    pub(crate) category_names: &'a TransactionalTree,
    pub(crate) documents: &'a TransactionalTree,
    pub(crate) index: &'a TransactionalTree,
    pub(crate) doc_terms: &'a TransactionalTree,
}

impl Store {
    /// Open (or create) a store rooted at `path`. Missing relations are created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "opened corpus store");
        Self::with_db(db)
    }

    /// A throwaway store that is deleted when dropped.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::with_db(db)
    }

    fn with_db(db: Db) -> Result<Self> {
        Ok(Self {
            terms: db.open_tree(TERMS_TREE)?,
            categories: db.open_tree(CATEGORIES_TREE)?,
            category_names: db.open_tree(CATEGORY_NAMES_TREE)?,
            documents: db.open_tree(DOCUMENTS_TREE)?,
            index: db.open_tree(INDEX_TREE)?,
            doc_terms: db.open_tree(DOC_TERMS_TREE)?,
            db,
        })
    }

    /// Run `f` as one atomic transaction across all relations.
    ///
    /// sled may call `f` more than once on conflict, so it must not touch state outside `tx`.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: Fn(&Tx<'_>) -> TxResult<T>,
    {
        let trees = (
            &self.terms,
            &self.categories,
            &self.category_names,
            &self.documents,
            &self.index,
            &self.doc_terms,
        );
        let result = trees.transaction(|(terms, categories, category_names, documents, index, doc_terms)| {
            let tx = Tx { terms, categories, category_names, documents, index, doc_terms };
            f(&tx)
        });
        result.map_err(|err| match err {
            TransactionError::Abort(e) => {
                tracing::warn!(error = %e, "transaction rolled back");
                e
            }
            TransactionError::Storage(e) => e.into(),
        })
    }

    /// Block until all committed writes are durable on disk.
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

/// Abort the surrounding transaction with `err`.
pub(crate) fn fail<T>(err: IndexError) -> TxResult<T> {
    sled::transaction::abort(err)
}

pub(crate) trait OrAbort<T> {
    fn or_abort(self) -> TxResult<T>;
}

impl<T> OrAbort<T> for Result<T> {
    fn or_abort(self) -> TxResult<T> {
        self.map_err(ConflictableTransactionError::Abort)
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn decode_key(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| IndexError::StorageUnavailable(format!("non utf-8 key: {e}")))
}

pub(crate) fn id_key(id: u32) -> [u8; 4] { id.to_be_bytes() }

pub(crate) fn id_from_key(bytes: &[u8]) -> Result<u32> {
    let raw: [u8; 4] = bytes
        .try_into()
        .map_err(|_| IndexError::StorageUnavailable(format!("bad id key of {} bytes", bytes.len())))?;
    Ok(u32::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn aborted_transaction_leaves_no_writes() {
        let store = Store::temporary().unwrap();
        let res: Result<()> = store.transaction(|tx| {
            tx.terms.insert(&b"ghost"[..], encode(&1u32).or_abort()?)?;
            fail(IndexError::ConstraintViolation("forced".into()))
        });
        assert_eq!(res, Err(IndexError::ConstraintViolation("forced".into())));
        assert!(store.terms.get(b"ghost").unwrap().is_none());
    }

    #[test]
    fn reopen_keeps_relations() {
        let dir = tempdir().unwrap();
        {
            let store = Store::open(dir.path()).unwrap();
            store.transaction(|tx| {
                tx.terms.insert(&b"kept"[..], encode(&4u32).or_abort()?)?;
                Ok(())
            }).unwrap();
            store.flush().unwrap();
        }
        let store = Store::open(dir.path()).unwrap();
        let raw = store.terms.get(b"kept").unwrap().unwrap();
        assert_eq!(decode::<u32>(&raw).unwrap(), 4);
    }

    #[test]
    fn id_keys_sort_numerically() {
        assert!(id_key(2) < id_key(10));
        assert_eq!(id_from_key(&id_key(77)).unwrap(), 77);
        assert!(id_from_key(b"abc").is_err());
    }
}
