use thiserror::Error;

#[derive(Error, Debug)]
pub enum MathError {
    #[error("Parse error at position {position}: {message}")]
    ParseError { position: usize, message: String },

    #[error("Unsupported expression: {message}")]
    UnsupportedError { message: String },

    #[error("Math domain error: {message}")]
    DomainError { message: String },

    #[error("Numeric limit exceeded: {message}")]
    NumericLimitError { message: String },

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInputError { field: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' = '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Computation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MathError {
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        MathError::ParseError {
            position,
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        MathError::UnsupportedError {
            message: message.into(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        MathError::DomainError {
            message: message.into(),
        }
    }

    pub fn numeric_limit(message: impl Into<String>) -> Self {
        MathError::NumericLimitError {
            message: message.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MathError::InvalidInputError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MathError::ParseError { .. } | MathError::InvalidInputError { .. } => {
                ErrorCategory::Input
            }
            MathError::UnsupportedError { .. }
            | MathError::DomainError { .. }
            | MathError::NumericLimitError { .. } => ErrorCategory::Computation,
            MathError::ConfigError { .. } | MathError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            MathError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Computation => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MathError::ParseError { message, .. } => format!("無法解析數學式: {}", message),
            MathError::ConfigError { message } => format!("配置錯誤: {}", message),
            MathError::InvalidConfigValueError { field, reason, .. } => {
                format!("配置欄位 '{}' 無效: {}", field, reason)
            }
            MathError::IoError(e) => format!("檔案讀寫失敗: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the expression syntax, e.g. 2x^2 + 3x - 5",
            ErrorCategory::Computation => {
                "Use a single-variable expression with rational coefficients"
            }
            ErrorCategory::Configuration => {
                "Check the TOML configuration file and command line flags"
            }
            ErrorCategory::System => "Check file permissions and that the port is free",
        }
    }
}

pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_and_severity() {
        let io = MathError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "app.toml"));
        assert_eq!(io.category(), ErrorCategory::System);
        assert_eq!(io.severity(), ErrorSeverity::Critical);

        let limit = MathError::numeric_limit("power result exceeds 4096 bits");
        assert_eq!(limit.category(), ErrorCategory::Computation);
        assert_eq!(limit.severity(), ErrorSeverity::Medium);

        let parse = MathError::parse(3, "unexpected '*'");
        assert_eq!(parse.category(), ErrorCategory::Input);
        assert!(parse.user_friendly_message().contains("unexpected '*'"));
    }
}
