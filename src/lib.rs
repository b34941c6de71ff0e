pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{export::FileExporter, http::DataGovAuHolidaySource, storage::LocalStorage};
pub use config::Settings;
pub use core::{
    engine::LookupEngine,
    generator::generate,
    resolver::{is_business_day, next_business_day},
};
pub use domain::model::{
    BusinessDayRecord, CalendarDate, HolidaySet, Jurisdiction, LookupTable, OutputFormat,
    RawHolidayRecord,
};
pub use utils::error::{NbdError, Result};
