use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "nbd-lookup")]
#[command(about = "Generate a next business day lookup table for an Australian state or territory")]
pub struct CliConfig {
    /// State or territory code: NSW, VIC, QLD, WA, SA, TAS, ACT or NT
    pub jurisdiction: String,

    /// Calendar year to generate (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Print the next business day after this date (YYYY-MM-DD) instead of writing a table
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the lookup files are written to (defaults to ./output)
    #[arg(long)]
    pub output_path: Option<String>,

    /// Output formats, comma separated (csv, tsv, json; xlsx when built with the xlsx feature)
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Holiday datastore SQL endpoint (defaults to data.gov.au)
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Datastore resource holding the holiday rows
    #[arg(long)]
    pub resource_id: Option<String>,

    /// HTTP timeout for the holiday fetch, in seconds (defaults to 30)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Retries after a network error or 5xx response (defaults to 0)
    #[arg(long)]
    pub retry_attempts: Option<u32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = CliConfig::try_parse_from(["nbd-lookup", "NSW"]).unwrap();
        assert_eq!(cli.jurisdiction, "NSW");
        assert!(cli.year.is_none());
        assert!(cli.formats.is_empty());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = CliConfig::try_parse_from([
            "nbd-lookup",
            "vic",
            "--year",
            "2024",
            "--date",
            "2024-12-24",
            "--formats",
            "csv,json",
            "--output-path",
            "/tmp/out",
            "--retry-attempts",
            "2",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.year, Some(2024));
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 12, 24));
        assert_eq!(cli.formats, vec!["csv", "json"]);
        assert_eq!(cli.output_path.as_deref(), Some("/tmp/out"));
        assert_eq!(cli.retry_attempts, Some(2));
        assert!(cli.verbose);
    }

    #[test]
    fn test_every_flag_has_help() {
        use clap::CommandFactory;

        let command = CliConfig::command();
        for arg in command.get_arguments() {
            assert!(
                arg.get_help().is_some(),
                "--{} has no help text",
                arg.get_id()
            );
        }
    }

    #[test]
    fn test_year_zero_date_is_rejected_after_parsing() {
        use crate::core::generator::{MAX_YEAR, MIN_YEAR};
        use crate::utils::validation;
        use chrono::Datelike;

        // clap 接受，範圍檢查在執行前擋下
        let cli = CliConfig::try_parse_from(["nbd-lookup", "nsw", "--date", "0000-06-01"]).unwrap();
        let date = cli.date.unwrap();
        assert_eq!(date.year(), 0);
        assert!(validation::validate_range("date", date.year(), MIN_YEAR, MAX_YEAR).is_err());
    }

    #[test]
    fn test_jurisdiction_is_required() {
        assert!(CliConfig::try_parse_from(["nbd-lookup"]).is_err());
    }
}
