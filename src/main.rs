use clap::Parser;
use chrono::Datelike;
use nbd_lookup::core::generator::{MAX_YEAR, MIN_YEAR};
use nbd_lookup::utils::{logger, validation, validation::Validate};
use nbd_lookup::{
    CliConfig, DataGovAuHolidaySource, FileExporter, Jurisdiction, LocalStorage, LookupEngine,
    NbdError, Settings,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<(), NbdError> {
    // 先檢查州別，避免無謂的網路請求
    let jurisdiction: Jurisdiction = cli.jurisdiction.parse()?;
    if let Some(date) = cli.date {
        validation::validate_range("date", date.year(), MIN_YEAR, MAX_YEAR)?;
    }

    let settings = Settings::from_cli(&cli)?;
    settings.validate()?;
    let formats = settings.formats()?;

    println!("Generating NBD lookup for {}", jurisdiction.full_name());

    let source = DataGovAuHolidaySource::from_config(&settings)?;
    let exporter = FileExporter::new(LocalStorage::new(settings.output_path.clone()));
    let engine = LookupEngine::with_formats(source, exporter, formats);

    if let Some(date) = cli.date {
        let next = engine.resolve_date(jurisdiction, date).await?;
        println!("Next business day after {} in {}: {}", date, jurisdiction, next);
        return Ok(());
    }

    let year = settings.year_or_current();
    tracing::info!("🚀 Building {} lookup for {}", year, jurisdiction);

    for path in engine.run(jurisdiction, year).await? {
        println!("Saved NBD lookup to {}", path);
    }

    Ok(())
}
