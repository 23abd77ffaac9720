//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (emitted by clap)        |
//! | 3-9   | check     | Reconciliation-specific codes            |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// The report has findings (missing, extraneous, quantity or description
/// mismatches). Like `diff(1)`, a non-zero exit means "sides differ".
pub const EXIT_CHECK_FINDINGS: u8 = 3;

/// Session config is invalid (TOML error, empty extraction list, etc.).
pub const EXIT_CHECK_INVALID_CONFIG: u8 = 4;

/// Input data cannot be parsed (extraction JSON, BOQ CSV, duplicate
/// BOQ item numbers).
pub const EXIT_CHECK_PARSE: u8 = 5;

/// Runtime error (file read/write, empty session, serialization).
pub const EXIT_CHECK_RUNTIME: u8 = 6;
