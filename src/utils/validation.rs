use crate::utils::error::{EngineError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Accepts only finite values strictly inside (0, 1).
pub fn validate_open_probability(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EngineError::validation(
            field_name,
            value,
            "Value must be a finite number",
        ));
    }
    if value <= 0.0 || value >= 1.0 {
        return Err(EngineError::validation(
            field_name,
            value,
            "Value must be strictly between 0 and 1",
        ));
    }
    Ok(())
}

/// Accepts finite values in the closed interval [0, 1].
pub fn validate_probability(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(EngineError::validation(
            field_name,
            value,
            "Value must be a finite number between 0 and 1",
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EngineError::validation(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(EngineError::validation(
            field_name,
            path,
            "Path contains null bytes",
        ));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EngineError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EngineError::validation(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
