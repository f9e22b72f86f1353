use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("Invalid data detected: {value}")]
    InvalidData { value: String },

    #[error("Division by zero: {dividend} / 0")]
    DivisionByZero { dividend: f64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Step {index} ({op}) failed: {source}")]
    StepFailed {
        index: usize,
        op: String,
        #[source]
        source: Box<OpsError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Arithmetic,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OpsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OpsError::InvalidData { .. } => ErrorCategory::Input,
            OpsError::DivisionByZero { .. } => ErrorCategory::Arithmetic,
            OpsError::IoError(_) | OpsError::SerializationError(_) => ErrorCategory::System,
            OpsError::ConfigError { .. }
            | OpsError::ConfigValidationError { .. }
            | OpsError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            OpsError::StepFailed { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OpsError::InvalidData { .. } | OpsError::DivisionByZero { .. } => ErrorSeverity::High,
            OpsError::ConfigError { .. }
            | OpsError::ConfigValidationError { .. }
            | OpsError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            OpsError::IoError(_) | OpsError::SerializationError(_) => ErrorSeverity::Critical,
            OpsError::StepFailed { source, .. } => source.severity(),
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            OpsError::InvalidData { value } => format!("The input '{}' was rejected", value),
            OpsError::DivisionByZero { .. } => "Cannot divide by zero".to_string(),
            OpsError::IoError(e) => format!("System I/O failure: {}", e),
            OpsError::SerializationError(_) => "Failed to render the result".to_string(),
            OpsError::ConfigError { message } => format!("Configuration problem: {}", message),
            OpsError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            OpsError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            OpsError::StepFailed { index, op, source } => format!(
                "Step {} ({}) failed: {}",
                index,
                op,
                source.user_friendly_message()
            ),
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OpsError::InvalidData { .. } => "Pass any value other than the reserved sentinel",
            OpsError::DivisionByZero { .. } => "Use a non-zero divisor",
            OpsError::IoError(_) => "Check that the path exists and is readable",
            OpsError::SerializationError(_) => "Retry without --json",
            OpsError::ConfigError { .. }
            | OpsError::ConfigValidationError { .. }
            | OpsError::InvalidConfigValueError { .. } => {
                "Fix the script file and run again (try --dry-run first)"
            }
            OpsError::StepFailed { source, .. } => source.recovery_suggestion(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_message_includes_value() {
        let err = OpsError::InvalidData {
            value: "bad_data".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid data detected: bad_data");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_step_failed_inherits_from_source() {
        let err = OpsError::StepFailed {
            index: 2,
            op: "divide".to_string(),
            source: Box::new(OpsError::DivisionByZero { dividend: 1.0 }),
        };
        assert_eq!(err.category(), ErrorCategory::Arithmetic);
        assert_eq!(err.recovery_suggestion(), "Use a non-zero divisor");
        assert!(err.to_string().contains("Step 2 (divide)"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: OpsError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        let invalid = OpsError::InvalidData {
            value: "bad_data".to_string(),
        };
        assert_eq!(invalid.exit_code(), 1);

        let config = OpsError::ConfigError {
            message: "broken".to_string(),
        };
        assert_eq!(config.exit_code(), 2);

        let step = OpsError::StepFailed {
            index: 0,
            op: "divide".to_string(),
            source: Box::new(OpsError::DivisionByZero { dividend: 1.0 }),
        };
        assert_eq!(step.exit_code(), 1);
    }
}
