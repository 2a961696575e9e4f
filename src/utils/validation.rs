use crate::utils::error::{MathError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_origin(field_name: &str, origin: &str) -> Result<()> {
    if origin == "*" {
        return Ok(());
    }

    if origin.is_empty() {
        return Err(MathError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: origin.to_string(),
            reason: "Origin cannot be empty".to_string(),
        });
    }

    match Url::parse(origin) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MathError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: origin.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MathError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: origin.to_string(),
            reason: format!("Invalid origin format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MathError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
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
        return Err(MathError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 驗證請求中的數學式欄位：不可為空，長度受限以避免過大的計算量
pub fn validate_expression(field_name: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MathError::invalid_input(field_name, "expression is empty"));
    }
    if value.chars().count() > max_len {
        return Err(MathError::invalid_input(
            field_name,
            format!("expression longer than {} characters", max_len),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_origin() {
        assert!(validate_origin("cors.allow_origins", "*").is_ok());
        assert!(validate_origin("cors.allow_origins", "https://example.com").is_ok());
        assert!(validate_origin("cors.allow_origins", "http://localhost:5173").is_ok());
        assert!(validate_origin("cors.allow_origins", "").is_err());
        assert!(validate_origin("cors.allow_origins", "not-a-url").is_err());
        assert!(validate_origin("cors.allow_origins", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("server.port", 8000u16, 1, 65535).is_ok());
        assert!(validate_range("server.port", 0u16, 1, 65535).is_err());
    }

    #[test]
    fn test_validate_expression() {
        assert!(validate_expression("expression", "x^2 - 1", 256).is_ok());
        assert!(validate_expression("expression", "   ", 256).is_err());
        assert!(validate_expression("expression", &"x+".repeat(200), 256).is_err());
    }
}
