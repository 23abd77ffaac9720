//! `shipcheck check` and `shipcheck validate`.

use std::path::PathBuf;

use crate::exit_codes::{EXIT_CHECK_FINDINGS, EXIT_CHECK_RUNTIME};
use crate::load::{cli_err, load_session};
use crate::CliError;

pub fn cmd_check(
    session_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let loaded = load_session(&session_path)?;

    let result = shipcheck_recon::run(&loaded.config.name, &loaded.store, &loaded.boq)
        .map_err(|e| cli_err(EXIT_CHECK_RUNTIME, e.to_string()))?;

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| cli_err(EXIT_CHECK_RUNTIME, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| cli_err(EXIT_CHECK_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "{} document(s), {} item(s) vs {} BOQ item(s): {} missing, {} not in BOQ, {} quantity mismatch(es), {} description mismatch(es)",
        result.meta.document_count,
        result.meta.item_count,
        result.meta.boq_count,
        s.missing_from_shipment,
        s.not_in_boq,
        s.quantity_mismatches,
        s.possible_description_mismatches,
    );

    if s.findings() > 0 {
        return Err(cli_err(EXIT_CHECK_FINDINGS, "reconciliation findings"));
    }
    Ok(())
}

pub fn cmd_validate(session_path: PathBuf) -> Result<(), CliError> {
    let loaded = load_session(&session_path)?;
    eprintln!(
        "ok: '{}', {} extraction(s), {} BOQ item(s)",
        loaded.config.name,
        loaded.store.len(),
        loaded.boq.len(),
    );
    Ok(())
}
