use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (no extractions, empty name, etc.).
    ConfigValidation(String),
    /// Extraction JSON parse error.
    Json(String),
    /// A referenced document id does not exist in the store.
    UnknownDocument(String),
    /// A referenced item id is not present in the active view.
    UnknownItem(String),
    /// The store has no documents; the aggregate view is undefined.
    EmptySession,
    /// Missing required column in the BOQ CSV.
    MissingColumn { column: String },
    /// Two BOQ rows normalize to the same item-number key.
    DuplicateBoqItem { item_number: String, normalized: String },
    /// IO error (file read, malformed CSV record, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Json(msg) => write!(f, "extraction parse error: {msg}"),
            Self::UnknownDocument(id) => write!(f, "unknown document: {id}"),
            Self::UnknownItem(id) => write!(f, "unknown item: {id}"),
            Self::EmptySession => write!(f, "session has no documents"),
            Self::MissingColumn { column } => {
                write!(f, "BOQ file: missing column '{column}'")
            }
            Self::DuplicateBoqItem { item_number, normalized } => {
                write!(
                    f,
                    "BOQ item '{item_number}' collides with an earlier row (both normalize to '{normalized}')"
                )
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
