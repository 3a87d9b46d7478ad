use crate::error::AppError;

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate that a free-text field stays within `max` Unicode characters.
pub fn validate_max_chars(value: &str, max: usize, label: &str) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional integer against an inclusive range.
pub fn validate_optional_range(
    value: Option<u32>,
    range: std::ops::RangeInclusive<u32>,
    label: &str,
) -> Result<(), AppError> {
    if let Some(v) = value
        && !range.contains(&v)
    {
        return Err(AppError::Validation(format!(
            "{label} must be {}-{}",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}
