//! BOQ ingestion: CSV with a configurable column mapping.

use std::collections::BTreeSet;

use crate::config::BoqColumns;
use crate::error::ReconError;
use crate::model::BoqItem;
use crate::normalize::normalize_id;

/// Parse a BOQ quantity cell. Absent, unparsable, non-finite, or
/// non-positive values are uncomparable, not zero and not an error.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let qty: f64 = raw.trim().parse().ok()?;
    (qty.is_finite() && qty > 0.0).then_some(qty)
}

/// Load BOQ rows from CSV data, applying the column mapping.
///
/// Item-number collisions after normalization are a precondition violation
/// of the reconciliation engine; they are rejected here at the boundary
/// rather than resolved silently.
pub fn load_boq_csv(csv_data: &str, columns: &BoqColumns) -> Result<Vec<BoqItem>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn { column: name.into() })
    };

    let item_number_idx = idx(&columns.item_number)?;
    let description_idx = idx(&columns.description)?;
    let unit_idx = idx(&columns.unit)?;
    let quantity_idx = idx(&columns.quantity)?;
    let id_idx = match &columns.id {
        Some(col) => Some(idx(col)?),
        None => None,
    };

    let mut items = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;

        let item_number = record.get(item_number_idx).unwrap_or("").trim().to_string();
        let key = normalize_id(&item_number);
        if !key.is_empty() && !seen.insert(key.clone()) {
            return Err(ReconError::DuplicateBoqItem {
                item_number,
                normalized: key,
            });
        }

        let id = match id_idx {
            Some(i) => record.get(i).unwrap_or("").to_string(),
            None => format!("boq_{}", row + 1),
        };

        items.push(BoqItem {
            id,
            item_number,
            description: record.get(description_idx).unwrap_or("").trim().to_string(),
            unit: record.get(unit_idx).unwrap_or("").trim().to_string(),
            quantity: parse_quantity(record.get(quantity_idx).unwrap_or("")),
        });
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
item_number,description,unit,quantity
A-1,Steel beam 200x200,pcs,100
B2,Bracket,pcs,not-a-number
C3,Anchor bolt,box,0
";

    #[test]
    fn load_with_default_columns() {
        let items = load_boq_csv(CSV, &BoqColumns::default()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].item_number, "A-1");
        assert_eq!(items[0].id, "boq_1");
        assert_eq!(items[0].quantity, Some(100.0));
        // Unparsable and non-positive quantities are uncomparable, not zero
        assert_eq!(items[1].quantity, None);
        assert_eq!(items[2].quantity, None);
    }

    #[test]
    fn load_with_mapped_columns() {
        let csv = "\
pos,text,uom,qty
10.20,Cable tray,m,50.5
";
        let columns = BoqColumns {
            id: Some("pos".into()),
            item_number: "pos".into(),
            description: "text".into(),
            unit: "uom".into(),
            quantity: "qty".into(),
        };
        let items = load_boq_csv(csv, &columns).unwrap();
        assert_eq!(items[0].id, "10.20");
        assert_eq!(items[0].quantity, Some(50.5));
    }

    #[test]
    fn missing_column_is_an_error() {
        let columns = BoqColumns {
            quantity: "menge".into(),
            ..Default::default()
        };
        let err = load_boq_csv(CSV, &columns).unwrap_err();
        assert!(matches!(err, ReconError::MissingColumn { column } if column == "menge"));
    }

    #[test]
    fn normalized_collision_is_rejected() {
        let csv = "\
item_number,description,unit,quantity
A-1,Steel beam,pcs,100
a 1,Steel beam again,pcs,10
";
        let err = load_boq_csv(csv, &BoqColumns::default()).unwrap_err();
        match err {
            ReconError::DuplicateBoqItem { item_number, normalized } => {
                assert_eq!(item_number, "a 1");
                assert_eq!(normalized, "A1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_quantity_contract() {
        assert_eq!(parse_quantity(" 12.5 "), Some(12.5));
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("-1"), None);
        assert_eq!(parse_quantity("inf"), None);
        assert_eq!(parse_quantity("NaN"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("n/a"), None);
    }
}
