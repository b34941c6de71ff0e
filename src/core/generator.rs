use crate::core::resolver::next_business_day;
use crate::domain::model::{BusinessDayRecord, HolidaySet, LookupTable};
use crate::utils::error::{NbdError, Result};
use chrono::{Datelike, NaiveDate};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Builds the next-business-day table for every day of `year`, 1 Jan to 31 Dec.
///
/// Pure: no I/O, same inputs give the same table. The only failure is a year
/// outside `MIN_YEAR..=MAX_YEAR`.
pub fn generate(year: i32, holidays: &HolidaySet) -> Result<LookupTable> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(NbdError::InvalidYear { year });
    }
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(NbdError::InvalidYear { year })?;

    let records = start
        .iter_days()
        .take_while(|d| d.year() == year)
        .map(|d| Ok(BusinessDayRecord::new(d, next_business_day(d, holidays)?)))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "Generated {} lookup rows for {} against {} holidays",
        records.len(),
        year,
        holidays.len()
    );

    Ok(LookupTable::new(year, records))
}
