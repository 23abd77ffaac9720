//! Session loading: config TOML, extraction JSONs, BOQ CSV.

use std::path::Path;

use shipcheck_recon::boq::load_boq_csv;
use shipcheck_recon::{
    BoqItem, DocumentStore, ReconError, SessionConfig, ShipmentExtraction,
};

use crate::exit_codes::{
    EXIT_CHECK_INVALID_CONFIG, EXIT_CHECK_PARSE, EXIT_CHECK_RUNTIME,
};
use crate::CliError;

pub struct LoadedSession {
    pub config: SessionConfig,
    pub store: DocumentStore,
    pub boq: Vec<BoqItem>,
}

pub fn cli_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn engine_err(err: ReconError) -> CliError {
    let code = match &err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => {
            EXIT_CHECK_INVALID_CONFIG
        }
        ReconError::Json(_)
        | ReconError::MissingColumn { .. }
        | ReconError::DuplicateBoqItem { .. } => EXIT_CHECK_PARSE,
        _ => EXIT_CHECK_RUNTIME,
    };
    cli_err(code, err.to_string())
}

/// Load everything a session run needs. Extraction files are appended in
/// config order, which fixes the primary document.
/// Paths are resolved relative to the config file's directory.
pub fn load_session(config_path: &Path) -> Result<LoadedSession, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        cli_err(
            EXIT_CHECK_RUNTIME,
            format!("cannot read {}: {e}", config_path.display()),
        )
    })?;
    let config = SessionConfig::from_toml(&config_str).map_err(engine_err)?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut store = DocumentStore::new();
    for file in &config.extractions {
        let path = base_dir.join(file);
        let data = std::fs::read_to_string(&path).map_err(|e| {
            cli_err(EXIT_CHECK_RUNTIME, format!("cannot read {}: {e}", path.display()))
        })?;
        let extraction = ShipmentExtraction::from_json(&data)
            .map_err(|e| cli_err(EXIT_CHECK_PARSE, format!("{}: {e}", path.display())))?;
        store.append(extraction);
    }

    let boq_path = base_dir.join(&config.boq.file);
    let boq_data = std::fs::read_to_string(&boq_path).map_err(|e| {
        cli_err(EXIT_CHECK_RUNTIME, format!("cannot read {}: {e}", boq_path.display()))
    })?;
    let boq = load_boq_csv(&boq_data, &config.boq.columns).map_err(engine_err)?;

    Ok(LoadedSession { config, store, boq })
}
