//! `shipcheck summary`: aggregate and per-document header display.

use std::path::PathBuf;

use serde::Serialize;
use shipcheck_recon::model::{AggregateSummary, SourceDocument};

use crate::exit_codes::EXIT_CHECK_RUNTIME;
use crate::load::{cli_err, load_session};
use crate::CliError;

#[derive(Serialize)]
struct SummaryOutput<'a> {
    session_name: &'a str,
    aggregate: &'a AggregateSummary,
    documents: &'a [SourceDocument],
}

pub fn cmd_summary(session_path: PathBuf, json_output: bool) -> Result<(), CliError> {
    let loaded = load_session(&session_path)?;
    let aggregate = shipcheck_recon::aggregate::summarize(&loaded.store)
        .ok_or_else(|| cli_err(EXIT_CHECK_RUNTIME, "session has no documents"))?;

    if json_output {
        let out = SummaryOutput {
            session_name: &loaded.config.name,
            aggregate: &aggregate,
            documents: loaded.store.all(),
        };
        let json_str = serde_json::to_string_pretty(&out).map_err(|e| {
            cli_err(EXIT_CHECK_RUNTIME, format!("JSON serialization error: {e}"))
        })?;
        println!("{json_str}");
        return Ok(());
    }

    eprintln!("session: {}", loaded.config.name);
    for doc in loaded.store.all() {
        eprintln!(
            "  {}: {} ({} items, confidence {:.2}, currency {})",
            doc.document_id,
            doc.file_name,
            doc.items.len(),
            doc.confidence,
            doc.header.currency.as_deref().unwrap_or("?"),
        );
    }
    eprintln!(
        "  all: {} items, confidence {:.2}, currency {}{}",
        aggregate.items.len(),
        aggregate.confidence,
        aggregate.header.currency.as_deref().unwrap_or("?"),
        if aggregate.currencies_match {
            String::new()
        } else {
            " (documents disagree, totals withheld)".into()
        },
    );
    if let Some(total) = aggregate.header.total_excl_vat {
        eprintln!("  total excl. VAT: {total:.2}");
    }
    if let Some(total) = aggregate.header.total_incl_vat {
        eprintln!("  total incl. VAT: {total:.2}");
    }
    if let Some(kg) = aggregate.header.total_gross_weight_kg {
        eprintln!("  gross weight: {kg:.1} kg");
    }

    Ok(())
}
