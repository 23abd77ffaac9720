//! `shipcheck submit-payload`: the stripped item list for the submission
//! layer, built from the aggregate view.

use std::path::PathBuf;

use shipcheck_recon::submit::submission_items;

use crate::exit_codes::EXIT_CHECK_RUNTIME;
use crate::load::{cli_err, load_session};
use crate::CliError;

pub fn cmd_submit_payload(
    session_path: PathBuf,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let loaded = load_session(&session_path)?;
    let aggregate = shipcheck_recon::aggregate::summarize(&loaded.store)
        .ok_or_else(|| cli_err(EXIT_CHECK_RUNTIME, "session has no documents"))?;

    let payload = submission_items(&aggregate.items);
    let json_str = serde_json::to_string_pretty(&payload)
        .map_err(|e| cli_err(EXIT_CHECK_RUNTIME, format!("JSON serialization error: {e}")))?;

    match output_file {
        Some(path) => {
            std::fs::write(&path, &json_str).map_err(|e| {
                cli_err(EXIT_CHECK_RUNTIME, format!("cannot write output: {e}"))
            })?;
            eprintln!("wrote {} item(s) to {}", payload.len(), path.display());
        }
        None => println!("{json_str}"),
    }

    Ok(())
}
