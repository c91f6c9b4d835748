//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Maximum length of a section key
pub const MAX_SECTION_KEY_LENGTH: usize = 64;

/// Validate a section key.
///
/// Section keys end up in document names (`graph_<key>.json`), so only
/// ASCII letters, digits, `-` and `_` are accepted.
///
/// Examples: `sec3-0`, `3-0`, `merged`, `extra-1`
pub fn validate_section_key(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Section key cannot be empty".to_string());
    }

    if s.len() > MAX_SECTION_KEY_LENGTH {
        return Err(format!(
            "Section key cannot exceed {MAX_SECTION_KEY_LENGTH} characters"
        ));
    }

    if let Some(c) = s
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(format!(
            "Invalid character '{c}' in section key '{s}'. Use letters, digits, '-' and '_' (e.g., sec3-0)"
        ));
    }

    Ok(s.to_string())
}

/// Validate a concept key (label or id).
pub fn validate_concept_key(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Concept cannot be empty".to_string());
    }
    Ok(s.to_string())
}
