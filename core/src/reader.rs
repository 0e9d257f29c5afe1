use crate::persist::Store;
use crate::{documents, postings, IndexError, Result};
use std::collections::BTreeMap;

/// Flatten the index into `term -> "Title:count, Title:count"`.
///
/// Terms come out ascending; documents within a term keep posting order.
pub fn get_index(store: &Store) -> Result<BTreeMap<String, String>> {
    let titles = documents::titles(store)?;
    let mut index: BTreeMap<String, String> = BTreeMap::new();
    for (term, posting) in postings::list_all(store)? {
        let title = titles.get(&posting.doc_id).ok_or_else(|| {
            IndexError::StorageUnavailable(format!("posting for '{term}' points at missing document {}", posting.doc_id))
        })?;
        let value = index.entry(term).or_default();
        if !value.is_empty() {
            value.push_str(", ");
        }
        value.push_str(&format!("{}:{}", title, posting.term_count));
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{encode, id_key};
    use crate::{create_category, create_document, NewDocument, Posting};
    use time::macros::date;

    fn seeded() -> Store {
        let store = Store::temporary().unwrap();
        create_category(&store, 1, "Sports").unwrap();
        let doc = NewDocument {
            id: 1,
            text: "baseball in the summer".into(),
            title: "Exercise".into(),
            date: date!(2023 - 01 - 01),
            category: "Sports".into(),
        };
        create_document(&store, &doc).unwrap();
        store
    }

    #[test]
    fn undecodable_document_is_storage_unavailable() {
        let store = seeded();
        store.documents.insert(id_key(2), &b"\xff\x01"[..]).unwrap();
        let res = get_index(&store);
        assert!(matches!(res, Err(IndexError::StorageUnavailable(_))), "got {res:?}");
    }

    #[test]
    fn undecodable_posting_list_is_storage_unavailable() {
        let store = seeded();
        store.index.insert("broken", &b"\x07"[..]).unwrap();
        let res = get_index(&store);
        assert!(matches!(res, Err(IndexError::StorageUnavailable(_))), "got {res:?}");
    }

    #[test]
    fn dangling_posting_is_storage_unavailable() {
        let store = seeded();
        let list = vec![Posting { doc_id: 99, term_count: 1 }];
        store.index.insert("zebra", encode(&list).unwrap()).unwrap();
        let res = get_index(&store);
        assert!(matches!(res, Err(IndexError::StorageUnavailable(ref m)) if m.contains("99")), "got {res:?}");
    }

    #[test]
    fn intact_store_reads_back() {
        let store = seeded();
        let index = get_index(&store).unwrap();
        assert_eq!(index.len(), 4);
        assert_eq!(index["the"], "Exercise:1");
    }
}
