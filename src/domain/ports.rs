use crate::domain::model::{Jurisdiction, LookupTable, RawHolidayRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn resource_id(&self) -> &str;
    fn output_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_ms(&self) -> u64;
}

/// Where holiday rows come from. Must either return every row or fail.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch(&self, jurisdiction: Jurisdiction) -> Result<Vec<RawHolidayRecord>>;
}

#[async_trait]
pub trait LookupTableSink: Send + Sync {
    /// Writes `table` to `destination` and returns the full path written.
    async fn write(&self, table: &LookupTable, destination: &str) -> Result<String>;
}
