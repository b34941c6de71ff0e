use crate::domain::model::{LookupTable, OutputFormat};
use crate::domain::ports::{LookupTableSink, Storage};
use crate::utils::error::{NbdError, Result};
use async_trait::async_trait;

/// Serialises a table. csv/tsv get a `Date`/`Next Business Day` header row.
pub fn encode_table(table: &LookupTable, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => encode_delimited(table, b','),
        OutputFormat::Tsv => encode_delimited(table, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(table.records())?),
        #[cfg(feature = "xlsx")]
        OutputFormat::Xlsx => encode_xlsx(table),
    }
}

/// One sheet, header row, real Excel dates so the columns sort and filter.
#[cfg(feature = "xlsx")]
fn encode_xlsx(table: &LookupTable) -> Result<Vec<u8>> {
    use rust_xlsxwriter::{Format, Workbook};

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(format!("NBD {}", table.year()))?;
    worksheet.write_string_with_format(0, 0, "Date", &header)?;
    worksheet.write_string_with_format(0, 1, "Next Business Day", &header)?;
    worksheet.set_column_width(0, 12)?;
    worksheet.set_column_width(1, 20)?;

    for (i, record) in table.records().iter().enumerate() {
        let row = i as u32 + 1;
        let (date, next) = (record.date(), record.next_business_day());
        worksheet.write_datetime_with_format(row, 0, &date, &date_format)?;
        worksheet.write_datetime_with_format(row, 1, &next, &date_format)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn encode_delimited(table: &LookupTable, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for record in table {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| NbdError::IoError(e.into_error()))
}

pub struct FileExporter<S: Storage> {
    storage: S,
}

impl<S: Storage> FileExporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> LookupTableSink for FileExporter<S> {
    async fn write(&self, table: &LookupTable, destination: &str) -> Result<String> {
        let format = OutputFormat::from_path(destination)?;
        let data = encode_table(table, format)?;

        tracing::debug!(
            "Writing {} rows ({} bytes) as {:?} to {}",
            table.len(),
            data.len(),
            format,
            destination
        );
        self.storage.write_file(destination, &data).await
    }
}
