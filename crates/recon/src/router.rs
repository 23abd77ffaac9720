//! Routing of user edits back onto the document store.
//!
//! Edits are made against the currently displayed item list, which is
//! either one document's items or the flattened aggregate list. The router
//! is the only caller of `DocumentStore::replace_items`; switching the view
//! mode never mutates the store, it only changes which slice the next edit
//! targets.

use std::collections::BTreeMap;

use crate::error::ReconError;
use crate::model::LineItem;
use crate::store::DocumentStore;

/// The active view. Transitioned only by explicit user selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    SingleDocument(String),
    Aggregate,
}

/// What happened while routing an edit, for the caller to surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Items added in aggregate mode without a document tag, routed to the
    /// primary (first-appended) document.
    pub routed_to_primary: usize,
}

/// The item list the active view displays. Aggregate order is document
/// append order, tags preserved.
pub fn visible_items(store: &DocumentStore, mode: &ViewMode) -> Vec<LineItem> {
    match mode {
        ViewMode::SingleDocument(id) => store
            .get(id)
            .map(|d| d.items.clone())
            .unwrap_or_default(),
        ViewMode::Aggregate => store
            .all()
            .iter()
            .flat_map(|d| d.items.iter().cloned())
            .collect(),
    }
}

/// Write the full edited item list of the active view back to the store.
///
/// Single-document mode replaces that document's items; new items are
/// tagged with the active document id. Aggregate mode re-partitions the
/// list by each item's `document_id` tag and replaces every document's
/// items with its bucket, so removals reach the right document. Untagged
/// items in aggregate mode are routed to the primary document and counted
/// in the outcome.
pub fn apply(
    store: &mut DocumentStore,
    mode: &ViewMode,
    edited: Vec<LineItem>,
) -> Result<EditOutcome, ReconError> {
    match mode {
        ViewMode::SingleDocument(id) => {
            if store.get(id).is_none() {
                return Err(ReconError::UnknownDocument(id.clone()));
            }
            let mut items = edited;
            for item in items.iter_mut() {
                item.document_id = id.clone();
            }
            store.replace_items(id, items)?;
            Ok(EditOutcome::default())
        }
        ViewMode::Aggregate => {
            let primary = store
                .primary_document_id()
                .ok_or(ReconError::EmptySession)?
                .to_string();

            // One bucket per existing document, so a document whose items
            // were all removed ends up with an empty list.
            let mut buckets: BTreeMap<String, Vec<LineItem>> = store
                .all()
                .iter()
                .map(|d| (d.document_id.clone(), Vec::new()))
                .collect();

            let mut outcome = EditOutcome::default();
            for mut item in edited {
                if item.document_id.is_empty() {
                    item.document_id = primary.clone();
                    outcome.routed_to_primary += 1;
                }
                match buckets.get_mut(&item.document_id) {
                    Some(bucket) => bucket.push(item),
                    None => return Err(ReconError::UnknownDocument(item.document_id)),
                }
            }

            for (document_id, bucket) in buckets {
                store.replace_items(&document_id, bucket)?;
            }
            Ok(outcome)
        }
    }
}

/// Append one item to the active view. Ids and tags are assigned during
/// [`apply`] / `replace_items`.
pub fn add_item(
    store: &mut DocumentStore,
    mode: &ViewMode,
    item: LineItem,
) -> Result<EditOutcome, ReconError> {
    let mut items = visible_items(store, mode);
    items.push(item);
    apply(store, mode, items)
}

/// Replace the item with `updated.id` in the active view.
pub fn update_item(
    store: &mut DocumentStore,
    mode: &ViewMode,
    updated: LineItem,
) -> Result<EditOutcome, ReconError> {
    let mut items = visible_items(store, mode);
    match items.iter_mut().find(|i| i.id == updated.id) {
        Some(slot) => *slot = updated,
        None => return Err(ReconError::UnknownItem(updated.id)),
    }
    apply(store, mode, items)
}

/// Remove the item with `item_id` from the active view.
pub fn remove_item(
    store: &mut DocumentStore,
    mode: &ViewMode,
    item_id: &str,
) -> Result<EditOutcome, ReconError> {
    let mut items = visible_items(store, mode);
    let before = items.len();
    items.retain(|i| i.id != item_id);
    if items.len() == before {
        return Err(ReconError::UnknownItem(item_id.to_string()));
    }
    apply(store, mode, items)
}
