use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// One package line within a line item. Opaque to reconciliation; carried
/// through from extraction to submission unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageLine {
    pub package_number: Option<String>,
    pub length: Option<f64>,
    pub quantity: Option<f64>,
    pub area: Option<f64>,
    pub gross_weight: Option<f64>,
}

/// One declared article within a shipment.
///
/// `id` is unique across the whole submission session and never reused;
/// `document_id` is the join key back to the owning [`SourceDocument`].
/// Both are empty until the store (or the edit router) assigns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineItem {
    pub id: String,
    pub document_id: String,
    pub article_number: Option<String>,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
    pub weight_kg: Option<f64>,
    pub hs_code: Option<String>,
    pub country_of_origin: Option<String>,
    pub delivery_note: Option<String>,
    pub packages: Vec<PackageLine>,
}

// ---------------------------------------------------------------------------
// Extraction boundary
// ---------------------------------------------------------------------------

/// Header fields shared by extractions, documents, and the aggregate view.
/// Every field is nullable; extraction output is partial by nature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentHeader {
    pub order_number: Option<String>,
    pub project: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<String>,
    pub supplier_name: Option<String>,
    pub customer_name: Option<String>,
    pub delivery_conditions: Option<String>,
    pub delivery_address: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub currency: Option<String>,
    pub total_excl_vat: Option<f64>,
    pub total_incl_vat: Option<f64>,
    pub total_gross_weight_kg: Option<f64>,
    pub total_net_weight_kg: Option<f64>,
}

/// A line item as produced by the extraction collaborator, before the store
/// assigns session ids and a document tag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedItem {
    pub article_number: Option<String>,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
    pub weight_kg: Option<f64>,
    pub hs_code: Option<String>,
    pub country_of_origin: Option<String>,
    pub delivery_note: Option<String>,
    pub packages: Vec<PackageLine>,
}

/// One completed extraction result for one uploaded file, as handed over by
/// the external document-understanding collaborator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentExtraction {
    pub source_file_name: String,
    pub extracted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub header: DocumentHeader,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub items: Vec<ExtractedItem>,
}

impl ShipmentExtraction {
    pub fn from_json(data: &str) -> Result<Self, ReconError> {
        serde_json::from_str(data).map_err(|e| ReconError::Json(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// One extraction result, owned by the store and tagged with a stable id.
/// Mutated only through `DocumentStore::replace_items`.
#[derive(Debug, Clone, Serialize)]
pub struct SourceDocument {
    pub document_id: String,
    pub file_name: String,
    pub extracted_at: DateTime<Utc>,
    pub header: DocumentHeader,
    pub confidence: f64,
    pub items: Vec<LineItem>,
}

/// The synthesized "All" view over every document in the store.
/// Recomputed on demand, never stored; carries no document id.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateSummary {
    pub header: DocumentHeader,
    /// False when two documents declare different non-null currencies;
    /// the monetary totals in `header` are null in that case.
    pub currencies_match: bool,
    pub confidence: f64,
    pub items: Vec<LineItem>,
}

// ---------------------------------------------------------------------------
// BOQ
// ---------------------------------------------------------------------------

/// One Bill of Quantities row. Read-only reference data.
///
/// `quantity` is `None` when the source value was absent, unparsable,
/// non-finite, or non-positive: such rows are uncomparable and excluded
/// from the quantity check, never treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoqItem {
    pub id: String,
    pub item_number: String,
    pub description: String,
    pub unit: String,
    pub quantity: Option<f64>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One flagged quantity discrepancy: the summed extracted quantity for a
/// BOQ key falls outside the tolerance band.
#[derive(Debug, Clone, Serialize)]
pub struct QuantityMismatch {
    pub boq_item: BoqItem,
    pub extracted_qty: f64,
    pub boq_qty: f64,
    pub ratio: f64,
}

/// Output of the reconciliation engine. A pure function of the item set and
/// the BOQ set; field order follows input order.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub missing_from_shipment: Vec<BoqItem>,
    pub not_in_boq: Vec<LineItem>,
    pub quantity_mismatches: Vec<QuantityMismatch>,
    pub possible_description_mismatches: Vec<LineItem>,
}

impl ReconciliationReport {
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            missing_from_shipment: self.missing_from_shipment.len(),
            not_in_boq: self.not_in_boq.len(),
            quantity_mismatches: self.quantity_mismatches.len(),
            possible_description_mismatches: self.possible_description_mismatches.len(),
        }
    }
}

/// Per-bucket counts for badges and exit-code decisions.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub missing_from_shipment: usize,
    pub not_in_boq: usize,
    pub quantity_mismatches: usize,
    pub possible_description_mismatches: usize,
}

impl ReportSummary {
    /// Total findings across all four buckets.
    pub fn findings(&self) -> usize {
        self.missing_from_shipment
            + self.not_in_boq
            + self.quantity_mismatches
            + self.possible_description_mismatches
    }
}

// ---------------------------------------------------------------------------
// Session output envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub session_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub document_count: usize,
    pub item_count: usize,
    pub boq_count: usize,
}

/// Full output of one reconciliation run over a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    pub meta: RunMeta,
    pub summary: ReportSummary,
    pub aggregate: AggregateSummary,
    pub report: ReconciliationReport,
}
