use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Utc};

use regex::Regex;

use crate::error::{Error, Result};

/// A calendar month, written as `MM-YYYY` on the wire.
/// Carried as the first instant (UTC) of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthYear(DateTime<Utc>);

impl MonthYear {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .map(Self)
            .ok_or_else(|| Error::validation(format!("{:02}-{} is not a valid month", month, year)))
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl FromStr for MonthYear {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        lazy_static::lazy_static! {
            static ref MONTH_YEAR_REGEX: Regex = Regex::new(r"^([0-9]{2})-([0-9]{4})$").unwrap();
        }

        let captures = MONTH_YEAR_REGEX
            .captures(value)
            .ok_or_else(|| Error::validation("Date must be in MM-YYYY format"))?;

        // Both groups are ascii digits of fixed width, so these cannot overflow
        let month: u32 = captures[1]
            .parse()
            .map_err(|_| Error::validation("Invalid month"))?;
        let year: i32 = captures[2]
            .parse()
            .map_err(|_| Error::validation("Invalid year"))?;

        if !(1..=12).contains(&month) {
            return Err(Error::validation("Month must be between 01 and 12"));
        }

        Self::new(month, year)
    }
}

impl From<MonthYear> for DateTime<Utc> {
    fn from(value: MonthYear) -> Self {
        value.0
    }
}

impl AsRef<DateTime<Utc>> for MonthYear {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}
