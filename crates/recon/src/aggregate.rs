//! The synthesized "All" view over every document in the store.

use crate::model::{AggregateSummary, DocumentHeader, SourceDocument};
use crate::store::DocumentStore;

/// Compute the aggregate summary. Returns `None` for an empty store; the
/// "All" view is only meaningful with at least one document.
///
/// Merge policy per field:
/// - scalar header fields: first non-null value, scanning in append order
/// - monetary totals: null-excluding sums, exposed only when every non-null
///   document currency agrees
/// - weights: null-excluding sums, not gated by currency
/// - confidence: arithmetic mean over all documents
/// - items: concatenation in append order, document tags preserved
pub fn summarize(store: &DocumentStore) -> Option<AggregateSummary> {
    let docs = store.all();
    if docs.is_empty() {
        return None;
    }

    let mut header = DocumentHeader {
        order_number: first_some(docs, |h| h.order_number.clone()),
        project: first_some(docs, |h| h.project.clone()),
        invoice_number: first_some(docs, |h| h.invoice_number.clone()),
        invoice_date: first_some(docs, |h| h.invoice_date.clone()),
        supplier_name: first_some(docs, |h| h.supplier_name.clone()),
        customer_name: first_some(docs, |h| h.customer_name.clone()),
        delivery_conditions: first_some(docs, |h| h.delivery_conditions.clone()),
        delivery_address: first_some(docs, |h| h.delivery_address.clone()),
        origin: first_some(docs, |h| h.origin.clone()),
        destination: first_some(docs, |h| h.destination.clone()),
        currency: None,
        total_excl_vat: None,
        total_incl_vat: None,
        total_gross_weight_kg: sum_some(docs, |h| h.total_gross_weight_kg),
        total_net_weight_kg: sum_some(docs, |h| h.total_net_weight_kg),
    };

    // A document with no currency is not a disagreement; only two distinct
    // non-null currencies void the monetary aggregates.
    let candidate = first_some(docs, |h| h.currency.clone());
    let currencies_match = docs
        .iter()
        .filter_map(|d| d.header.currency.as_ref())
        .all(|c| Some(c) == candidate.as_ref());

    if currencies_match {
        header.currency = candidate;
        header.total_excl_vat = sum_some(docs, |h| h.total_excl_vat);
        header.total_incl_vat = sum_some(docs, |h| h.total_incl_vat);
    }

    let confidence =
        docs.iter().map(|d| d.confidence).sum::<f64>() / docs.len() as f64;

    let items = docs.iter().flat_map(|d| d.items.iter().cloned()).collect();

    Some(AggregateSummary {
        header,
        currencies_match,
        confidence,
        items,
    })
}

fn first_some<T>(
    docs: &[SourceDocument],
    pick: impl Fn(&DocumentHeader) -> Option<T>,
) -> Option<T> {
    docs.iter().find_map(|d| pick(&d.header))
}

/// Sum the non-null values; `None` when no document contributes. A null is
/// excluded from the summation set, never treated as zero.
fn sum_some(
    docs: &[SourceDocument],
    pick: impl Fn(&DocumentHeader) -> Option<f64>,
) -> Option<f64> {
    let mut total = None;
    for doc in docs {
        if let Some(v) = pick(&doc.header) {
            *total.get_or_insert(0.0) += v;
        }
    }
    total
}
