use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported dataset source: {source_spec}")]
    UnsupportedSource { source_spec: String },

    #[error("Source returned HTTP {status}: {url}")]
    SourceStatusError { url: String, status: u16 },

    #[error("Invalid {entity} record #{index}: {reason}")]
    InvalidRecordError {
        entity: String,
        index: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Source,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::InvalidConfigValueError { .. }
            | ReportError::TomlError(_) => ErrorCategory::Configuration,
            ReportError::HttpError(_)
            | ReportError::UnsupportedSource { .. }
            | ReportError::SourceStatusError { .. } => ErrorCategory::Source,
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::InvalidRecordError { .. } => ErrorCategory::Data,
            ReportError::ZipError(_) | ReportError::IoError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端來源可能只是暫時性失敗，重試即可
            ReportError::HttpError(_) | ReportError::SourceStatusError { .. } => {
                ErrorSeverity::Medium
            }
            ReportError::IoError(_) | ReportError::ZipError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            ReportError::TomlError(_) => "Check the config file for TOML syntax errors".to_string(),
            ReportError::UnsupportedSource { .. } => {
                "Use 'builtin', an http(s) URL, a .json/.toml file or a directory of CSV files"
                    .to_string()
            }
            ReportError::HttpError(_) | ReportError::SourceStatusError { .. } => {
                "Check that the dataset URL is reachable and retry".to_string()
            }
            ReportError::CsvError(_) => {
                "Check the CSV headers match the record field names".to_string()
            }
            ReportError::SerializationError(_) => {
                "Check the dataset document is valid JSON".to_string()
            }
            ReportError::InvalidRecordError { entity, index, .. } => {
                format!("Correct {} record #{} in the dataset", entity, index)
            }
            ReportError::IoError(_) => {
                "Check the paths exist and the output directory is writable".to_string()
            }
            ReportError::ZipError(_) => "Retry without --archive".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Source => format!("Could not load dataset: {}", self),
            ErrorCategory::Data => format!("Dataset is invalid: {}", self),
            ErrorCategory::Output => format!("Could not write report: {}", self),
        }
    }

    /// 依嚴重程度對應的程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
