//! The stored `dd-MM-yyyy` date format.
//!
//! This format round-trips against rows written by earlier releases, so it
//! must not change.

use expensedb_core::StorageError;
use time::{Date, Month};

pub fn date_to_str(d: Date) -> String {
    format!("{:02}-{:02}-{:04}", d.day(), d.month() as u8, d.year())
}

pub fn str_to_date(s: &str) -> Result<Date, StorageError> {
    let malformed = || StorageError::MalformedDate(s.to_string());

    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(malformed());
    }
    let day = parts[0].parse::<u8>().map_err(|_| malformed())?;
    let month = parts[1].parse::<u8>().map_err(|_| malformed())?;
    let year = parts[2].parse::<i32>().map_err(|_| malformed())?;

    let month = Month::try_from(month).map_err(|_| malformed())?;
    Date::from_calendar_date(year, month, day).map_err(|_| malformed())
}
