//! Input validation for user-supplied artefact names.

use crate::error::CoreError;

/// Validate an artefact name.
///
/// This checks:
/// - The name is not empty
/// - It has no leading or trailing whitespace
/// - It contains no control characters (they would break audit lines)
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    // 1. Non-empty
    if name.is_empty() {
        return Err(CoreError::EmptyName);
    }

    // 2. Trimmed
    if name.trim() != name {
        return Err(CoreError::UntrimmedName(name.to_string()));
    }

    // 3. No control characters, newlines included
    if name.chars().any(char::is_control) {
        return Err(CoreError::ControlCharacters(name.to_string()));
    }

    Ok(())
}
