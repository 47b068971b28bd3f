use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Telegram rejected {method}: {description} (code {code})")]
    TelegramError {
        method: String,
        code: i64,
        description: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Document error: {message}")]
    DocumentError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Platform,
    FileSystem,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::ApiError(_) => ErrorCategory::Network,
            BotError::TelegramError { .. } => ErrorCategory::Platform,
            BotError::IoError(_) => ErrorCategory::FileSystem,
            BotError::SerializationError(_) | BotError::DocumentError { .. } => {
                ErrorCategory::Data
            }
            BotError::ConfigValidationError { .. } | BotError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BotError::ApiError(_) => ErrorSeverity::Medium,
            // 401 means the token is wrong, nothing will work until it is fixed
            BotError::TelegramError { code, .. } if *code == 401 || *code == 404 => {
                ErrorSeverity::Critical
            }
            BotError::TelegramError { .. } => ErrorSeverity::Medium,
            BotError::IoError(_)
            | BotError::SerializationError(_)
            | BotError::DocumentError { .. } => ErrorSeverity::High,
            BotError::ConfigValidationError { .. } | BotError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::ApiError(_) => "Could not reach the Telegram Bot API".to_string(),
            BotError::TelegramError { description, .. } => {
                format!("Telegram refused the request: {}", description)
            }
            BotError::IoError(e) => format!("File access failed: {}", e),
            BotError::SerializationError(e) => format!("Malformed JSON: {}", e),
            BotError::DocumentError { message } => message.clone(),
            BotError::ConfigValidationError { field, message } => {
                format!("Invalid configuration ({}): {}", field, message)
            }
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration ({}): {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the --api-base value",
            ErrorCategory::Platform => {
                "Check that TELEGRAM_BOT_TOKEN is the token issued by @BotFather"
            }
            ErrorCategory::FileSystem => "Check --data-dir and the file names under [files]",
            ErrorCategory::Data => "Check that the data file is well-formed JSON",
            ErrorCategory::Configuration => "Fix the configuration file or the CLI flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_token_is_critical() {
        let err = BotError::TelegramError {
            method: "getMe".to_string(),
            code: 401,
            description: "Unauthorized".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Platform);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("Unauthorized"));
    }

    #[test]
    fn test_config_errors_share_category() {
        let validation = BotError::ConfigValidationError {
            field: "token".to_string(),
            message: "Field cannot be empty".to_string(),
        };
        let invalid = BotError::InvalidConfigValueError {
            field: "telegram.api_base".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(validation.category(), ErrorCategory::Configuration);
        assert_eq!(invalid.category(), ErrorCategory::Configuration);
        assert_eq!(
            invalid.to_string(),
            "Invalid value 'ftp://x' for 'telegram.api_base': Unsupported URL scheme: ftp"
        );
    }

    #[test]
    fn test_malformed_json_is_a_data_error() {
        let err: BotError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
