//! Session config: which extraction files make up a submission session and
//! where the BOQ lives.

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    /// Extraction JSON files, in order. File order is document append
    /// order, which fixes the primary document for header merges.
    pub extractions: Vec<String>,
    pub boq: BoqSource,
}

// ---------------------------------------------------------------------------
// BOQ source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct BoqSource {
    pub file: String,
    #[serde(default)]
    pub columns: BoqColumns,
}

/// Column mapping for the BOQ CSV. `id` is optional; without it row
/// positions become ids.
#[derive(Debug, Clone, Deserialize)]
pub struct BoqColumns {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "default_item_number")]
    pub item_number: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_quantity")]
    pub quantity: String,
}

impl Default for BoqColumns {
    fn default() -> Self {
        Self {
            id: None,
            item_number: default_item_number(),
            description: default_description(),
            unit: default_unit(),
            quantity: default_quantity(),
        }
    }
}

fn default_item_number() -> String {
    "item_number".into()
}
fn default_description() -> String {
    "description".into()
}
fn default_unit() -> String {
    "unit".into()
}
fn default_quantity() -> String {
    "quantity".into()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SessionConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: SessionConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }
        if self.extractions.is_empty() {
            return Err(ReconError::ConfigValidation(
                "at least 1 extraction file is required".into(),
            ));
        }
        if self.boq.file.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "boq.file must not be empty".into(),
            ));
        }
        Ok(())
    }
}
