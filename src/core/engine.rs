use crate::core::generator::generate;
use crate::core::resolver::next_business_day;
use crate::domain::model::{CalendarDate, HolidaySet, Jurisdiction, LookupTable, OutputFormat};
use crate::domain::ports::{HolidaySource, LookupTableSink};
use crate::utils::error::{NbdError, Result};
use crate::utils::validation::validate_supported_date;

pub struct LookupEngine<H: HolidaySource, E: LookupTableSink> {
    source: H,
    sink: E,
    formats: Vec<OutputFormat>,
}

impl<H: HolidaySource, E: LookupTableSink> LookupEngine<H, E> {
    pub fn new(source: H, sink: E) -> Self {
        Self::with_formats(source, sink, vec![OutputFormat::Csv])
    }

    pub fn with_formats(source: H, sink: E, formats: Vec<OutputFormat>) -> Self {
        Self {
            source,
            sink,
            formats,
        }
    }

    pub fn output_file_name(jurisdiction: Jurisdiction, format: OutputFormat) -> String {
        format!("{}_nbd_lookup.{}", jurisdiction.code(), format.extension())
    }

    /// 取得完整假日清單；任何錯誤都會中止，不會用不完整的清單繼續
    pub async fn load_holidays(&self, jurisdiction: Jurisdiction) -> Result<HolidaySet> {
        tracing::info!("📥 Fetching holidays for {}", jurisdiction.full_name());
        let records = self.source.fetch(jurisdiction).await?;
        tracing::info!("📥 Received {} holiday records", records.len());

        let holidays = HolidaySet::from_records(&records)?;
        if holidays.is_empty() {
            tracing::warn!(
                "⚠️ No holidays listed for {}; only weekends will be skipped",
                jurisdiction
            );
        } else {
            tracing::debug!("Holiday set holds {} distinct dates", holidays.len());
        }
        Ok(holidays)
    }

    pub async fn build_table(&self, jurisdiction: Jurisdiction, year: i32) -> Result<LookupTable> {
        let holidays = self.load_holidays(jurisdiction).await?;
        generate(year, &holidays)
    }

    /// Fetch, generate and export. Returns the paths written, one per format.
    pub async fn run(&self, jurisdiction: Jurisdiction, year: i32) -> Result<Vec<String>> {
        if self.formats.is_empty() {
            return Err(NbdError::ConfigValidationError {
                field: "formats".to_string(),
                message: "No output format selected".to_string(),
            });
        }

        let table = self.build_table(jurisdiction, year).await?;
        tracing::info!("🗓️ Generated {} rows for {}", table.len(), year);

        let mut written = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            let destination = Self::output_file_name(jurisdiction, *format);
            tracing::debug!("Writing {}", destination);
            written.push(self.sink.write(&table, &destination).await?);
        }

        Ok(written)
    }

    /// Next business day after a single date, without writing anything.
    pub async fn resolve_date(
        &self,
        jurisdiction: Jurisdiction,
        date: CalendarDate,
    ) -> Result<CalendarDate> {
        validate_supported_date("date", date)?;
        let holidays = self.load_holidays(jurisdiction).await?;
        next_business_day(date, &holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawHolidayRecord;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct FakeSource {
        result: std::result::Result<Vec<&'static str>, &'static str>,
    }

    #[async_trait]
    impl HolidaySource for FakeSource {
        async fn fetch(&self, jurisdiction: Jurisdiction) -> Result<Vec<RawHolidayRecord>> {
            match &self.result {
                Ok(dates) => Ok(dates.iter().map(|d| RawHolidayRecord::new(*d)).collect()),
                Err(msg) => Err(NbdError::retrieval(jurisdiction.code(), *msg)),
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        writes: Arc<Mutex<Vec<(String, usize)>>>,
    }

    #[async_trait]
    impl LookupTableSink for RecordingSink {
        async fn write(&self, table: &LookupTable, destination: &str) -> Result<String> {
            self.writes
                .lock()
                .await
                .push((destination.to_string(), table.len()));
            Ok(format!("mem/{}", destination))
        }
    }

    fn source(dates: Vec<&'static str>) -> FakeSource {
        FakeSource { result: Ok(dates) }
    }

    #[tokio::test]
    async fn test_run_writes_one_file_per_format() {
        let sink = RecordingSink::default();
        let engine = LookupEngine::with_formats(
            source(vec!["20230101", "20231225", "20231226"]),
            sink.clone(),
            vec![OutputFormat::Csv, OutputFormat::Json],
        );

        let paths = engine.run(Jurisdiction::Nsw, 2023).await.unwrap();

        assert_eq!(
            paths,
            vec!["mem/nsw_nbd_lookup.csv", "mem/nsw_nbd_lookup.json"]
        );
        let writes = sink.writes.lock().await;
        assert_eq!(writes.len(), 2);
        assert!(writes.iter().all(|(_, rows)| *rows == 365));
    }

    #[tokio::test]
    async fn test_retrieval_failure_writes_nothing() {
        let sink = RecordingSink::default();
        let engine = LookupEngine::new(
            FakeSource {
                result: Err("connection refused"),
            },
            sink.clone(),
        );

        let err = engine.run(Jurisdiction::Vic, 2023).await.unwrap_err();

        assert!(matches!(err, NbdError::RetrievalError { .. }));
        assert!(sink.writes.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_writes_nothing() {
        let sink = RecordingSink::default();
        let engine = LookupEngine::new(source(vec!["20230101", "2023-12-25"]), sink.clone());

        let err = engine.run(Jurisdiction::Qld, 2023).await.unwrap_err();

        assert!(matches!(err, NbdError::ParseError { .. }));
        assert!(sink.writes.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_build_table_uses_fetched_holidays() {
        let engine = LookupEngine::new(
            source(vec!["20230101", "20231225", "20231226"]),
            RecordingSink::default(),
        );

        let table = engine.build_table(Jurisdiction::Sa, 2023).await.unwrap();

        let christmas_eve = NaiveDate::from_ymd_opt(2023, 12, 24).unwrap();
        assert_eq!(
            table.lookup(christmas_eve),
            NaiveDate::from_ymd_opt(2023, 12, 27)
        );
    }

    #[tokio::test]
    async fn test_resolve_date() {
        let engine = LookupEngine::new(source(vec!["20230410"]), RecordingSink::default());

        let next = engine
            .resolve_date(Jurisdiction::Tas, NaiveDate::from_ymd_opt(2023, 4, 7).unwrap())
            .await
            .unwrap();

        assert_eq!(next, NaiveDate::from_ymd_opt(2023, 4, 11).unwrap());
    }

    #[tokio::test]
    async fn test_resolve_date_outside_supported_years() {
        let engine = LookupEngine::new(
            FakeSource {
                result: Err("must not be called"),
            },
            RecordingSink::default(),
        );

        let err = engine
            .resolve_date(Jurisdiction::Nsw, NaiveDate::MAX)
            .await
            .unwrap_err();

        // 在抓取假日之前就被擋下
        assert!(matches!(err, NbdError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_no_formats_is_rejected() {
        let engine = LookupEngine::with_formats(source(vec![]), RecordingSink::default(), vec![]);
        assert!(engine.run(Jurisdiction::Act, 2023).await.is_err());
    }

    #[test]
    fn test_output_file_name() {
        type Engine = LookupEngine<FakeSource, RecordingSink>;
        assert_eq!(
            Engine::output_file_name(Jurisdiction::Wa, OutputFormat::Tsv),
            "wa_nbd_lookup.tsv"
        );
    }
}
