use crate::utils::error::NbdError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A year/month/day value with no time or zone component.
pub type CalendarDate = NaiveDate;

/// Australian states and territories with a published holiday calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jurisdiction {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 8] = [
        Jurisdiction::Nsw,
        Jurisdiction::Vic,
        Jurisdiction::Qld,
        Jurisdiction::Wa,
        Jurisdiction::Sa,
        Jurisdiction::Tas,
        Jurisdiction::Act,
        Jurisdiction::Nt,
    ];

    /// Lower-case code used by the holiday dataset and in output file names.
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::Nsw => "nsw",
            Jurisdiction::Vic => "vic",
            Jurisdiction::Qld => "qld",
            Jurisdiction::Wa => "wa",
            Jurisdiction::Sa => "sa",
            Jurisdiction::Tas => "tas",
            Jurisdiction::Act => "act",
            Jurisdiction::Nt => "nt",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Jurisdiction::Nsw => "New South Wales",
            Jurisdiction::Vic => "Victoria",
            Jurisdiction::Qld => "Queensland",
            Jurisdiction::Wa => "Western Australia",
            Jurisdiction::Sa => "South Australia",
            Jurisdiction::Tas => "Tasmania",
            Jurisdiction::Act => "Australian Capital Territory",
            Jurisdiction::Nt => "Northern Territory",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_uppercase())
    }
}

impl FromStr for Jurisdiction {
    type Err = NbdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Jurisdiction::ALL
            .into_iter()
            .find(|j| j.code() == wanted)
            .ok_or_else(|| NbdError::InvalidJurisdiction {
                code: s.to_string(),
            })
    }
}

/// One row of the upstream holiday dataset, as delivered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawHolidayRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Holiday Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Jurisdiction", default)]
    pub jurisdiction: Option<String>,
}

#[cfg(test)]
impl RawHolidayRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            name: None,
            jurisdiction: None,
        }
    }
}

/// Non-business dates for one jurisdiction. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: HashSet<CalendarDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<CalendarDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// A calendar date paired with the first business day strictly after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessDayRecord {
    #[serde(rename = "Date")]
    date: CalendarDate,
    #[serde(rename = "Next Business Day")]
    next_business_day: CalendarDate,
}

impl BusinessDayRecord {
    pub(crate) fn new(date: CalendarDate, next_business_day: CalendarDate) -> Self {
        debug_assert!(next_business_day > date);
        Self {
            date,
            next_business_day,
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn next_business_day(&self) -> CalendarDate {
        self.next_business_day
    }
}

/// One record per day of `year`, ascending, no gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    year: i32,
    records: Vec<BusinessDayRecord>,
}

impl LookupTable {
    pub(crate) fn new(year: i32, records: Vec<BusinessDayRecord>) -> Self {
        Self { year, records }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn records(&self) -> &[BusinessDayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Binary search by date; the table is sorted so this is exact.
    pub fn lookup(&self, date: CalendarDate) -> Option<CalendarDate> {
        self.records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| self.records[i].next_business_day)
    }
}

impl<'a> IntoIterator for &'a LookupTable {
    type Item = &'a BusinessDayRecord;
    type IntoIter = std::slice::Iter<'a, BusinessDayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
    #[cfg(feature = "xlsx")]
    Xlsx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
            #[cfg(feature = "xlsx")]
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// 依副檔名判斷格式
    pub fn from_path(path: &str) -> Result<Self, NbdError> {
        let extension = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }
}

impl FromStr for OutputFormat {
    type Err = NbdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            #[cfg(feature = "xlsx")]
            "xlsx" => Ok(OutputFormat::Xlsx),
            _ => Err(NbdError::UnsupportedFormat {
                extension: s.to_string(),
            }),
        }
    }
}
