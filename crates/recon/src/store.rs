//! Ordered collection of source documents for one submission session.
//!
//! Constructed fresh per session and passed by reference; there is no
//! module-level singleton. The store is the only owner of document state;
//! all mutation goes through [`DocumentStore::replace_items`] (driven by
//! the edit router) or [`DocumentStore::append`].

use crate::error::ReconError;
use crate::model::{LineItem, ShipmentExtraction, SourceDocument};

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<SourceDocument>,
    next_document: u64,
    next_item: u64,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed extraction as a new document. Assigns a fresh
    /// document id and tags every contained item with it. Documents keep
    /// their append order; the first-appended document is the primary
    /// source for scalar header merges.
    pub fn append(&mut self, extraction: ShipmentExtraction) -> String {
        self.next_document += 1;
        let document_id = format!("doc_{}", self.next_document);

        let items = extraction
            .items
            .into_iter()
            .map(|it| LineItem {
                id: self.mint_item_id(),
                document_id: document_id.clone(),
                article_number: it.article_number,
                description: it.description,
                quantity: it.quantity,
                unit: it.unit,
                unit_price: it.unit_price,
                total_price: it.total_price,
                weight_kg: it.weight_kg,
                hs_code: it.hs_code,
                country_of_origin: it.country_of_origin,
                delivery_note: it.delivery_note,
                packages: it.packages,
            })
            .collect();

        self.documents.push(SourceDocument {
            document_id: document_id.clone(),
            file_name: extraction.source_file_name,
            extracted_at: extraction.extracted_at,
            header: extraction.header,
            confidence: extraction.confidence,
            items,
        });

        document_id
    }

    pub fn get(&self, document_id: &str) -> Option<&SourceDocument> {
        self.documents.iter().find(|d| d.document_id == document_id)
    }

    /// Replace only the `items` of the targeted document. Items arriving
    /// without a document tag or session id are re-tagged here; ids are
    /// minted once and never reused.
    pub fn replace_items(
        &mut self,
        document_id: &str,
        mut items: Vec<LineItem>,
    ) -> Result<(), ReconError> {
        let idx = self
            .documents
            .iter()
            .position(|d| d.document_id == document_id)
            .ok_or_else(|| ReconError::UnknownDocument(document_id.to_string()))?;

        for item in items.iter_mut() {
            if item.id.is_empty() {
                self.next_item += 1;
                item.id = format!("item_{}", self.next_item);
            }
            if item.document_id.is_empty() {
                item.document_id = document_id.to_string();
            }
        }

        self.documents[idx].items = items;
        Ok(())
    }

    pub fn all(&self) -> &[SourceDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Id of the first-appended document, if any.
    pub fn primary_document_id(&self) -> Option<&str> {
        self.documents.first().map(|d| d.document_id.as_str())
    }

    /// Mint a fresh session-unique item id, for items created by the user.
    pub fn mint_item_id(&mut self) -> String {
        self.next_item += 1;
        format!("item_{}", self.next_item)
    }
}
