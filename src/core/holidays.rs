use crate::domain::model::{CalendarDate, HolidaySet, RawHolidayRecord};
use crate::utils::error::{NbdError, Result};
use chrono::NaiveDate;

const HOLIDAY_DATE_FORMAT: &str = "%Y%m%d";

/// Parses a dataset date: exactly eight ASCII digits, `YYYYMMDD`.
pub fn parse_holiday_date(value: &str) -> Result<CalendarDate> {
    // chrono 的 %Y 可接受不定長度，先檢查格式
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NbdError::ParseError {
            value: value.to_string(),
            reason: "expected eight digits in YYYYMMDD form".to_string(),
        });
    }

    NaiveDate::parse_from_str(value, HOLIDAY_DATE_FORMAT).map_err(|e| NbdError::ParseError {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

pub fn parse_holiday_dates<S: AsRef<str>>(values: &[S]) -> Result<Vec<CalendarDate>> {
    values.iter().map(|v| parse_holiday_date(v.as_ref())).collect()
}

impl HolidaySet {
    /// Builds the set from fetched rows. One bad row fails the whole set.
    pub fn from_records(records: &[RawHolidayRecord]) -> Result<Self> {
        let dates = records
            .iter()
            .map(|record| {
                parse_holiday_date(&record.date).inspect_err(|_| {
                    tracing::error!(
                        "Rejecting holiday row {:?} ({:?})",
                        record.date,
                        record.name
                    );
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let set: HolidaySet = dates.into_iter().collect();
        if set.len() < records.len() {
            tracing::debug!(
                "Collapsed {} holiday rows into {} distinct dates",
                records.len(),
                set.len()
            );
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_holiday_date() {
        assert_eq!(
            parse_holiday_date("20230101").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for bad in ["2023-01-01", "2023011", "202301011", "", "2023O101", "20231301", "20230230"] {
            assert!(
                matches!(parse_holiday_date(bad), Err(NbdError::ParseError { .. })),
                "{} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_parse_holiday_dates() {
        let result = parse_holiday_dates(&["20230101", "20231225", "20231226"]).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[2], NaiveDate::from_ymd_opt(2023, 12, 26).unwrap());
    }

    #[test]
    fn test_from_records_fails_closed() {
        let records = vec![
            RawHolidayRecord::new("20230101"),
            RawHolidayRecord::new("not-a-date"),
            RawHolidayRecord::new("20231225"),
        ];
        let err = HolidaySet::from_records(&records).unwrap_err();
        assert!(matches!(err, NbdError::ParseError { value, .. } if value == "not-a-date"));
    }

    #[test]
    fn test_from_records_deduplicates() {
        let records = vec![
            RawHolidayRecord::new("20231225"),
            RawHolidayRecord::new("20231225"),
            RawHolidayRecord::new("20231226"),
        ];
        let set = HolidaySet::from_records(&records).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_records_empty() {
        assert!(HolidaySet::from_records(&[]).unwrap().is_empty());
    }
}
