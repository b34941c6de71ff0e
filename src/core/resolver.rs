//! Business-day rules: Saturday and Sunday are never business days, and
//! neither is any date in the supplied [`HolidaySet`].

use crate::domain::model::{CalendarDate, HolidaySet};
use crate::utils::error::{NbdError, Result};
use chrono::{Datelike, Days, Weekday};

pub fn is_weekend(date: CalendarDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_business_day(date: CalendarDate, holidays: &HolidaySet) -> bool {
    !is_weekend(date) && !holidays.contains(&date)
}

/// First business day strictly after `date`.
///
/// Holidays outside the range being walked are simply never hit. Fails with
/// `DateOutOfRange` only when the walk would leave `chrono`'s calendar.
pub fn next_business_day(date: CalendarDate, holidays: &HolidaySet) -> Result<CalendarDate> {
    let step = |d: CalendarDate| {
        d.checked_add_days(Days::new(1))
            .ok_or_else(|| NbdError::DateOutOfRange {
                date: date.to_string(),
            })
    };

    let mut candidate = step(date)?;
    while !is_business_day(candidate, holidays) {
        candidate = step(candidate)?;
    }
    Ok(candidate)
}
