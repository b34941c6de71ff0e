use thiserror::Error;

#[derive(Error, Debug)]
pub enum NbdError {
    #[error("Holiday retrieval failed for {jurisdiction}: {message}")]
    RetrievalError {
        jurisdiction: String,
        message: String,
    },

    #[error("Invalid holiday date '{value}': {reason}")]
    ParseError { value: String, reason: String },

    #[error("Unknown jurisdiction: {code}")]
    InvalidJurisdiction { code: String },

    #[error("Unsupported year {year}: must be between 1 and 9999")]
    InvalidYear { year: i32 },

    #[error("Date {date} has no next business day within the supported calendar")]
    DateOutOfRange { date: String },

    #[error("Unsupported output format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl NbdError {
    pub fn retrieval(jurisdiction: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RetrievalError {
            jurisdiction: jurisdiction.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RetrievalError { .. } => ErrorCategory::Network,
            Self::ParseError { .. } | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Data
            }
            Self::InvalidJurisdiction { .. }
            | Self::InvalidYear { .. }
            | Self::DateOutOfRange { .. } => ErrorCategory::Input,
            Self::UnsupportedFormat { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
            #[cfg(feature = "xlsx")]
            Self::XlsxError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Input | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI, derived from severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::RetrievalError { jurisdiction, .. } => format!(
                "Could not download the holiday calendar for {}; no lookup table was written",
                jurisdiction
            ),
            Self::ParseError { value, .. } => format!(
                "The holiday calendar contains an unreadable date '{}'; no lookup table was written",
                value
            ),
            Self::InvalidJurisdiction { code } => format!("Invalid state entered: {}", code),
            Self::InvalidYear { year } => format!("Year {} is outside the supported range", year),
            Self::DateOutOfRange { date } => {
                format!("Date {} is outside the supported calendar", date)
            }
            Self::UnsupportedFormat { extension } => {
                format!("Output format '{}' is not supported", extension)
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Configuration problem in '{}': {}", field, self)
            }
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Failed to encode the lookup table".to_string()
            }
            Self::IoError(e) => format!("File system error: {}", e),
            #[cfg(feature = "xlsx")]
            Self::XlsxError(_) => "Failed to build the spreadsheet".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::RetrievalError { .. } => {
                "Check the network connection and the API endpoint, or raise --retry-attempts"
            }
            Self::ParseError { .. } => {
                "The upstream dataset may have changed format; dates must be YYYYMMDD"
            }
            Self::InvalidJurisdiction { .. } => {
                "Use one of: NSW, VIC, QLD, WA, SA, TAS, ACT, NT"
            }
            Self::InvalidYear { .. } => "Pass a year between 1 and 9999 with --year",
            Self::DateOutOfRange { .. } => "Pass a date between years 1 and 9999 with --date",
            Self::UnsupportedFormat { .. } => {
                "Supported formats are csv, tsv, json and, with the xlsx feature, xlsx"
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and try again"
            }
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Retry with a different output format"
            }
            Self::IoError(_) => "Make sure the output directory is writable",
            #[cfg(feature = "xlsx")]
            Self::XlsxError(_) => "Retry with a different output format",
        }
    }
}

pub type Result<T> = std::result::Result<T, NbdError>;
