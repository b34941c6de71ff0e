use crate::core::generator::{MAX_YEAR, MIN_YEAR};
use crate::domain::model::{CalendarDate, OutputFormat};
use crate::utils::error::{NbdError, Result};
use chrono::Datelike;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> NbdError {
    NbdError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The holiday endpoint must be an absolute http(s) URL with a host.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() || path.contains('\0') {
        return Err(invalid(field_name, path, "Path must be non-empty without null bytes"));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(field_name, value, format!("Value must be at least {}", min_value)));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
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
        let reason = format!("Value must be between {} and {}", min, max);
        return Err(invalid(field_name, value, reason));
    }
    Ok(())
}

/// 單日查詢的日期必須落在支援的年份內
pub fn validate_supported_date(field_name: &str, date: CalendarDate) -> Result<()> {
    validate_range(field_name, date.year(), MIN_YEAR, MAX_YEAR)
}

/// 檢查輸出格式清單，並回傳解析後的格式
pub fn validate_formats(field_name: &str, formats: &[String]) -> Result<Vec<OutputFormat>> {
    if formats.is_empty() {
        return Err(NbdError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one output format is required".to_string(),
        });
    }

    formats.iter().map(|f| f.parse::<OutputFormat>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_endpoint", "https://example.com").is_ok());
        assert!(validate_url("api_endpoint", "http://example.com").is_ok());
        assert!(validate_url("api_endpoint", "").is_err());
        assert!(validate_url("api_endpoint", "invalid-url").is_err());
        assert!(validate_url("api_endpoint", "ftp://example.com").is_err());
        assert!(validate_url("api_endpoint", "mailto:someone@example.com").is_err());
        assert!(validate_url("api_endpoint", "http://127.0.0.1:9/api").is_ok());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("year", 2023, 1, 9999).is_ok());
        assert!(validate_range("year", 0, 1, 9999).is_err());
        assert!(validate_range("year", 10000, 1, 9999).is_err());
    }

    #[test]
    fn test_validate_formats() {
        let formats = vec!["csv".to_string(), "TSV".to_string()];
        let parsed = validate_formats("formats", &formats).unwrap();
        assert_eq!(parsed, vec![OutputFormat::Csv, OutputFormat::Tsv]);

        assert!(validate_formats("formats", &["ods".to_string()]).is_err());
        assert!(validate_formats("formats", &[]).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "out\0put").is_err());
        assert!(validate_path("output_path", "   ").is_err());
    }

    #[test]
    fn test_validate_supported_date() {
        let ok = chrono::NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
        assert!(validate_supported_date("date", ok).is_ok());
        assert!(validate_supported_date("date", chrono::NaiveDate::MAX).is_err());
        assert!(validate_supported_date("date", chrono::NaiveDate::MIN).is_err());
    }
}
