//! Submission payload: the shape that leaves this subsystem.

use serde::Serialize;

use crate::model::{LineItem, PackageLine};

/// One line item as serialized for the submission layer. Internal session
/// ids and document tags never leave this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
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

impl From<&LineItem> for SubmissionItem {
    fn from(item: &LineItem) -> Self {
        Self {
            article_number: item.article_number.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            unit_price: item.unit_price,
            total_price: item.total_price,
            weight_kg: item.weight_kg,
            hs_code: item.hs_code.clone(),
            country_of_origin: item.country_of_origin.clone(),
            delivery_note: item.delivery_note.clone(),
            packages: item.packages.clone(),
        }
    }
}

/// Map the flattened item list of the submitted view into the submission
/// shape, order preserved.
pub fn submission_items(items: &[LineItem]) -> Vec<SubmissionItem> {
    items.iter().map(SubmissionItem::from).collect()
}
