//! Canonicalization of identifiers and free text for comparison.

/// Normalize an article / BOQ item number: uppercase, strip whitespace
/// and hyphens. Idempotent.
pub fn normalize_id(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Normalize free text for the no-identifier fallback: lowercase, collapse
/// every run of non-alphanumeric characters to a single space, trim.
/// Idempotent.
pub fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}
