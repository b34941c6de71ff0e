pub mod engine;
pub mod generator;
pub mod holidays;
pub mod resolver;

pub use crate::domain::model::{
    BusinessDayRecord, CalendarDate, HolidaySet, Jurisdiction, LookupTable, OutputFormat,
    RawHolidayRecord,
};
pub use crate::domain::ports::{ConfigProvider, HolidaySource, LookupTableSink, Storage};
pub use crate::utils::error::Result;
