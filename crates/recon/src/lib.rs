//! `shipcheck-recon` — packing-list aggregation and BOQ reconciliation.
//!
//! Pure engine crate: receives extraction payloads and BOQ rows, returns
//! aggregate summaries and reconciliation reports. No CLI or IO
//! dependencies; callers hand in file contents as strings.

pub mod aggregate;
pub mod boq;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod router;
pub mod store;
pub mod submit;

pub use config::SessionConfig;
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use model::{
    AggregateSummary, BoqItem, LineItem, ReconciliationReport, SessionResult,
    ShipmentExtraction, SourceDocument,
};
pub use router::ViewMode;
pub use store::DocumentStore;
