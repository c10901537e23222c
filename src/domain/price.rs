use std::fmt;

use crate::error::{Error, Result};

/// Unit-less, non-negative subscription price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(i32);

impl TryFrom<i64> for Price {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(Error::validation("Price cannot be negative"));
        }
        let value = i32::try_from(value).map_err(|_| Error::validation("Price too large"))?;
        Ok(Self(value))
    }
}

impl From<Price> for i32 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
