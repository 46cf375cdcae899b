use crate::server::error::AppError;

/// Parses a Discord snowflake from a path segment.
///
/// # Arguments
/// - `value` - The string to parse
///
/// # Returns
/// - `Ok(u64)` - A non-zero snowflake
/// - `Err(AppError::BadRequest)` - The value is not a number or is zero
pub fn parse_snowflake(value: &str) -> Result<u64, AppError> {
    match value.parse::<u64>() {
        Ok(0) => Err(AppError::BadRequest(format!("Invalid ID '{}'", value))),
        Ok(id) => Ok(id),
        Err(e) => Err(AppError::BadRequest(format!("Invalid ID '{}': {}", value, e))),
    }
}
