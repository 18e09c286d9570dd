use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Menu data error at row {row}: {message}")]
    DataError { row: usize, message: String },

    #[error("Alias '{alias}' is claimed by both '{existing}' and '{incoming}'")]
    AliasCollision {
        alias: String,
        existing: String,
        incoming: String,
    },

    #[error("Unresolved order lines: {}", queries.join(", "))]
    UnresolvedOrderLines { queries: Vec<String> },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    Resolution,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MenuError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MenuError::IoError(_) => ErrorCategory::Io,
            MenuError::ConfigError { .. }
            | MenuError::InvalidConfigValueError { .. }
            | MenuError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MenuError::CsvError(_)
            | MenuError::SerializationError(_)
            | MenuError::DataError { .. }
            | MenuError::AliasCollision { .. } => ErrorCategory::Data,
            MenuError::UnresolvedOrderLines { .. } => ErrorCategory::Resolution,
            MenuError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // strict 模式下的未解析品項屬於使用者輸入問題
            ErrorCategory::Resolution => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MenuError::IoError(_) => {
                "Check that the menu CSV path exists and is readable".to_string()
            }
            MenuError::CsvError(_) | MenuError::DataError { .. } => {
                "Fix the offending row in the menu CSV (dish_id, name and calories_kcal are required)"
                    .to_string()
            }
            MenuError::SerializationError(_) => {
                "Retry without --json or report the failing order".to_string()
            }
            MenuError::ConfigError { .. }
            | MenuError::InvalidConfigValueError { .. }
            | MenuError::MissingConfigError { .. } => {
                "Review the TOML configuration and command-line flags".to_string()
            }
            MenuError::AliasCollision { alias, .. } => format!(
                "Remove '{}' from one of the dishes or switch alias_policy to last_write_wins",
                alias
            ),
            MenuError::UnresolvedOrderLines { .. } => {
                "Use `search` to find the exact dish name, or drop --strict".to_string()
            }
            MenuError::ValidationError { .. } => "Correct the input values".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MenuError::IoError(e) => format!("Could not read or write a file: {}", e),
            MenuError::DataError { row, message } => {
                format!("The menu file is invalid at row {}: {}", row, message)
            }
            MenuError::UnresolvedOrderLines { queries } => {
                format!("No dish matches: {}", queries.join(", "))
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
