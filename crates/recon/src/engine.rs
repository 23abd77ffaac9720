//! Three-way diff between declared line items and the project BOQ.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ReconError;
use crate::model::{
    BoqItem, LineItem, QuantityMismatch, ReconciliationReport, RunMeta, SessionResult,
};
use crate::normalize::{normalize_id, normalize_text};
use crate::store::DocumentStore;

/// Quantity-ratio tolerance band. Ratios in [0.8, 1.2] absorb rounding and
/// partial-delivery noise; only ratios strictly outside the band are
/// flagged. These are fixed design constants.
pub const RATIO_LOW: f64 = 0.8;
pub const RATIO_HIGH: f64 = 1.2;

/// Descriptions of 8 or fewer normalized characters are exempt from the
/// no-identifier fallback check; short text is too noisy to compare.
const MIN_DESCRIPTION_LEN: usize = 8;

/// Cross-check `items` (the aggregate view or one document's items) against
/// `boq_items`. Pure function: no IO, no hidden state, never errors; empty
/// inputs degenerate to empty or all-missing buckets.
///
/// Precondition: BOQ item numbers are unique after normalization. Callers
/// going through [`crate::boq::load_boq_csv`] get this checked; if violated
/// here, the later row wins.
pub fn reconcile(items: &[LineItem], boq_items: &[BoqItem]) -> ReconciliationReport {
    let mut extracted_by_article: BTreeMap<String, Vec<&LineItem>> = BTreeMap::new();
    for item in items {
        let key = normalize_id(item.article_number.as_deref().unwrap_or(""));
        if key.is_empty() {
            continue; // no identifier, cannot be key-matched
        }
        extracted_by_article.entry(key).or_default().push(item);
    }

    let mut boq_by_number: BTreeMap<String, &BoqItem> = BTreeMap::new();
    for boq in boq_items {
        boq_by_number.insert(normalize_id(&boq.item_number), boq);
    }

    let missing_from_shipment: Vec<BoqItem> = boq_items
        .iter()
        .filter(|b| !extracted_by_article.contains_key(&normalize_id(&b.item_number)))
        .cloned()
        .collect();

    // Items without an identifier are unverifiable, not extraneous; they are
    // handled by the description fallback below.
    let not_in_boq: Vec<LineItem> = items
        .iter()
        .filter(|i| {
            let key = normalize_id(i.article_number.as_deref().unwrap_or(""));
            !key.is_empty() && !boq_by_number.contains_key(&key)
        })
        .cloned()
        .collect();

    let mut quantity_mismatches = Vec::new();
    for boq in boq_items {
        let Some(matched) = extracted_by_article.get(&normalize_id(&boq.item_number)) else {
            continue;
        };
        // Uncomparable BOQ quantities are skipped entirely, never zero.
        let Some(boq_qty) = boq.quantity.filter(|q| q.is_finite() && *q > 0.0) else {
            continue;
        };
        let extracted_qty: f64 = matched.iter().map(|i| i.quantity).sum();
        let ratio = extracted_qty / boq_qty;
        if ratio > RATIO_HIGH || ratio < RATIO_LOW {
            quantity_mismatches.push(QuantityMismatch {
                boq_item: boq.clone(),
                extracted_qty,
                boq_qty,
                ratio,
            });
        }
    }

    let boq_descriptions: BTreeSet<String> = boq_items
        .iter()
        .map(|b| normalize_text(&b.description))
        .collect();

    let possible_description_mismatches: Vec<LineItem> = items
        .iter()
        .filter(|i| {
            if !normalize_id(i.article_number.as_deref().unwrap_or("")).is_empty() {
                return false;
            }
            let text = normalize_text(&i.description);
            text.chars().count() > MIN_DESCRIPTION_LEN && !boq_descriptions.contains(&text)
        })
        .cloned()
        .collect();

    ReconciliationReport {
        missing_from_shipment,
        not_in_boq,
        quantity_mismatches,
        possible_description_mismatches,
    }
}

/// Reconcile the aggregate view of a whole session and wrap the result in
/// the output envelope. Errors only when the store is empty.
pub fn run(
    session_name: &str,
    store: &DocumentStore,
    boq_items: &[BoqItem],
) -> Result<SessionResult, ReconError> {
    let aggregate = crate::aggregate::summarize(store).ok_or(ReconError::EmptySession)?;
    let report = reconcile(&aggregate.items, boq_items);
    let summary = report.summary();

    Ok(SessionResult {
        meta: RunMeta {
            session_name: session_name.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            document_count: store.len(),
            item_count: aggregate.items.len(),
            boq_count: boq_items.len(),
        },
        summary,
        aggregate,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(article: Option<&str>, description: &str, quantity: f64) -> LineItem {
        LineItem {
            id: "item_t".into(),
            document_id: "doc_t".into(),
            article_number: article.map(Into::into),
            description: description.into(),
            quantity,
            unit: "pcs".into(),
            ..Default::default()
        }
    }

    fn boq(item_number: &str, description: &str, quantity: Option<f64>) -> BoqItem {
        BoqItem {
            id: format!("boq_{item_number}"),
            item_number: item_number.into(),
            description: description.into(),
            unit: "pcs".into(),
            quantity,
        }
    }

    #[test]
    fn empty_items_reports_all_boq_missing() {
        let report = reconcile(&[], &[boq("B2", "Bracket", Some(5.0))]);
        assert_eq!(report.missing_from_shipment.len(), 1);
        assert_eq!(report.missing_from_shipment[0].item_number, "B2");
        assert!(report.not_in_boq.is_empty());
        assert!(report.quantity_mismatches.is_empty());
        assert!(report.possible_description_mismatches.is_empty());
    }

    #[test]
    fn empty_boq_degenerates() {
        let items = [item(Some("A1"), "Beam", 3.0)];
        let report = reconcile(&items, &[]);
        assert!(report.missing_from_shipment.is_empty());
        assert_eq!(report.not_in_boq.len(), 1);
        assert!(report.quantity_mismatches.is_empty());
    }

    #[test]
    fn matching_is_case_and_hyphen_insensitive() {
        let items = [item(Some("a-1"), "Beam", 10.0)];
        let report = reconcile(&items, &[boq("A1", "Beam", Some(10.0))]);
        assert!(report.missing_from_shipment.is_empty());
        assert!(report.not_in_boq.is_empty());
        assert!(report.quantity_mismatches.is_empty());
    }

    #[test]
    fn ratio_below_band_is_flagged() {
        let items = [item(Some("a1"), "Beam", 50.0)];
        let report = reconcile(&items, &[boq("A1", "Beam", Some(100.0))]);
        assert_eq!(report.quantity_mismatches.len(), 1);
        let m = &report.quantity_mismatches[0];
        assert_eq!(m.boq_qty, 100.0);
        assert_eq!(m.extracted_qty, 50.0);
        assert_eq!(m.ratio, 0.5);
    }

    #[test]
    fn ratio_within_band_is_not_flagged() {
        let items = [item(Some("a1"), "Beam", 90.0)];
        let report = reconcile(&items, &[boq("A1", "Beam", Some(100.0))]);
        assert!(report.quantity_mismatches.is_empty());
    }

    #[test]
    fn band_edges_are_inclusive() {
        let low = [item(Some("a1"), "Beam", 80.0)];
        assert!(reconcile(&low, &[boq("A1", "Beam", Some(100.0))])
            .quantity_mismatches
            .is_empty());
        let high = [item(Some("a1"), "Beam", 120.0)];
        assert!(reconcile(&high, &[boq("A1", "Beam", Some(100.0))])
            .quantity_mismatches
            .is_empty());
    }

    #[test]
    fn quantities_sum_across_matched_items() {
        // Two packing lists each declare half; together they are in band.
        let items = [
            item(Some("A1"), "Beam", 50.0),
            item(Some("a-1"), "Beam", 50.0),
        ];
        let report = reconcile(&items, &[boq("A1", "Beam", Some(100.0))]);
        assert!(report.quantity_mismatches.is_empty());
    }

    #[test]
    fn uncomparable_boq_quantity_skips_check() {
        let items = [item(Some("A1"), "Beam", 500.0)];
        for qty in [None, Some(0.0), Some(-3.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let report = reconcile(&items, &[boq("A1", "Beam", qty)]);
            assert!(report.quantity_mismatches.is_empty(), "qty {qty:?}");
        }
    }

    #[test]
    fn keyless_items_are_not_extraneous() {
        let items = [item(None, "Loose fastener assortment", 1.0)];
        let report = reconcile(&items, &[boq("A1", "Beam", Some(1.0))]);
        assert!(report.not_in_boq.is_empty());
        // They fall through to the description check instead
        assert_eq!(report.possible_description_mismatches.len(), 1);
    }

    #[test]
    fn description_fallback_exempts_short_and_exact_matches() {
        let boqs = [boq("A1", "Steel beam 200x200", Some(1.0))];

        // Exact normalized match: not flagged
        let exact = [item(None, "  STEEL beam  200x200 ", 1.0)];
        assert!(reconcile(&exact, &boqs)
            .possible_description_mismatches
            .is_empty());

        // Short description: exempt even without a match
        let short = [item(None, "bolt m8", 1.0)];
        assert!(reconcile(&short, &boqs)
            .possible_description_mismatches
            .is_empty());

        // Long and unmatched: flagged
        let unmatched = [item(None, "Aluminium profile 40x40", 1.0)];
        assert_eq!(
            reconcile(&unmatched, &boqs)
                .possible_description_mismatches
                .len(),
            1
        );
    }

    #[test]
    fn report_preserves_input_order() {
        let boqs = [
            boq("Z9", "Last", Some(1.0)),
            boq("A1", "First", Some(1.0)),
        ];
        let report = reconcile(&[], &boqs);
        assert_eq!(report.missing_from_shipment[0].item_number, "Z9");
        assert_eq!(report.missing_from_shipment[1].item_number, "A1");
    }

    #[test]
    fn run_wraps_envelope_and_rejects_empty_store() {
        let store = DocumentStore::new();
        assert!(matches!(
            run("s", &store, &[]),
            Err(ReconError::EmptySession)
        ));
    }
}
