use crate::error::AppError;

/// Parse an identifier carried in a form field.
///
/// Returns `Ok(None)` for an empty (or whitespace-only) field so callers can
/// report missing fields with their own message.
pub fn parse_form_id(name: &str, raw: &str) -> Result<Option<i32>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(AppError::Validation(format!(
            "{name} must be a positive integer"
        ))),
    }
}

/// Like [`parse_form_id`], but an empty field is an error with `missing_msg`.
pub fn require_form_id(name: &str, raw: &str, missing_msg: &str) -> Result<i32, AppError> {
    parse_form_id(name, raw)?.ok_or_else(|| AppError::Validation(missing_msg.to_string()))
}

/// Clamp an optional page-size query parameter.
pub fn clamp_limit(limit: Option<u64>, default: u64, max: u64) -> u64 {
    limit.unwrap_or(default).clamp(1, max)
}
