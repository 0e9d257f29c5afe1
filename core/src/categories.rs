//! Category reference data. Documents point at categories by id; callers name them.

use crate::persist::{encode, fail, id_from_key, id_key, OrAbort, Store, Tx, TxResult};
use crate::{Category, CategoryId, IndexError, Result};

/// Add a category. Both the id and the name must be unused.
pub fn create_category(store: &Store, id: CategoryId, name: &str) -> Result<()> {
    let category = Category { id, name: name.to_string() };
    store.transaction(|tx| put_category(tx, &category))?;
    tracing::info!(id, name, "category created");
    Ok(())
}

pub fn put_category(tx: &Tx<'_>, category: &Category) -> TxResult<()> {
    let key = id_key(category.id);
    if tx.categories.get(&key[..])?.is_some() {
        return fail(IndexError::ConstraintViolation(format!("category {} already exists", category.id)));
    }
    if tx.category_names.get(category.name.as_bytes())?.is_some() {
        return fail(IndexError::ConstraintViolation(format!("category name '{}' already used", category.name)));
    }
    tx.categories.insert(&key[..], encode(category).or_abort()?)?;
    tx.category_names.insert(category.name.as_bytes(), &key[..])?;
    Ok(())
}

/// Resolve a category name to its id.
pub fn category_id(tx: &Tx<'_>, name: &str) -> TxResult<CategoryId> {
    match tx.category_names.get(name.as_bytes())? {
        Some(raw) => id_from_key(&raw).or_abort(),
        None => fail(IndexError::NotFound(format!("category '{name}'"))),
    }
}

pub fn exists(tx: &Tx<'_>, id: CategoryId) -> TxResult<bool> {
    Ok(tx.categories.get(&id_key(id)[..])?.is_some())
}
