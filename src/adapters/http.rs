use crate::domain::model::{Jurisdiction, RawHolidayRecord};
use crate::domain::ports::{ConfigProvider, HolidaySource};
use crate::utils::error::{NbdError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://data.gov.au/data/api/3/action/datastore_search_sql";
pub const DEFAULT_RESOURCE_ID: &str = "d256f989-8f49-46eb-9770-1c6ee9bd2661";

/// CKAN 回應外層
#[derive(Debug, Deserialize)]
struct DatastoreResponse {
    success: bool,
    #[serde(default)]
    result: Option<DatastoreResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DatastoreResult {
    records: Vec<RawHolidayRecord>,
    /// Set by CKAN when the SQL row cap cut the result short.
    #[serde(default)]
    records_truncated: bool,
}

#[derive(Debug)]
struct FetchFailure {
    message: String,
    retryable: bool,
}

impl FetchFailure {
    fn retryable(message: String) -> Self {
        Self {
            message,
            retryable: true,
        }
    }

    fn fatal(message: String) -> Self {
        Self {
            message,
            retryable: false,
        }
    }
}

/// Australian public holidays from the data.gov.au datastore SQL endpoint.
pub struct DataGovAuHolidaySource {
    client: Client,
    endpoint: String,
    resource_id: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl DataGovAuHolidaySource {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(|e| NbdError::ConfigValidationError {
                field: "http_client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint().to_string(),
            resource_id: config.resource_id().to_string(),
            retry_attempts: config.retry_attempts(),
            retry_delay: Duration::from_millis(config.retry_delay_ms()),
        })
    }

    pub fn sql_for(&self, jurisdiction: Jurisdiction) -> String {
        format!(
            "SELECT * from \"{}\" WHERE \"Jurisdiction\" LIKE '{}'",
            self.resource_id,
            jurisdiction.code()
        )
    }

    async fn fetch_once(
        &self,
        sql: &str,
    ) -> std::result::Result<Vec<RawHolidayRecord>, FetchFailure> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("sql", sql)])
            .send()
            .await
            .map_err(|e| FetchFailure::retryable(format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let message = format!("API responded with status {}", status);
            return Err(if status.is_server_error() {
                FetchFailure::retryable(message)
            } else {
                FetchFailure::fatal(message)
            });
        }

        let body: DatastoreResponse = response
            .json()
            .await
            .map_err(|e| FetchFailure::fatal(format!("malformed response: {}", e)))?;

        if !body.success {
            let detail = body
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no details".to_string());
            return Err(FetchFailure::fatal(format!("API reported failure: {}", detail)));
        }

        let result = body
            .result
            .ok_or_else(|| FetchFailure::fatal("response has no result".to_string()))?;

        // 被截斷的結果不能當作完整假日清單
        if result.records_truncated {
            return Err(FetchFailure::fatal(format!(
                "result truncated after {} records",
                result.records.len()
            )));
        }

        Ok(result.records)
    }
}

#[async_trait]
impl HolidaySource for DataGovAuHolidaySource {
    async fn fetch(&self, jurisdiction: Jurisdiction) -> Result<Vec<RawHolidayRecord>> {
        let sql = self.sql_for(jurisdiction);
        tracing::debug!("Making API request to: {} ({})", self.endpoint, sql);

        let mut attempt = 0;
        loop {
            match self.fetch_once(&sql).await {
                Ok(records) => return Ok(records),
                Err(failure) if failure.retryable && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "⚠️ Holiday fetch failed ({}), retry {}/{}",
                        failure.message,
                        attempt,
                        self.retry_attempts
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(failure) => {
                    return Err(NbdError::retrieval(jurisdiction.code(), failure.message));
                }
            }
        }
    }
}
