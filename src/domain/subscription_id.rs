use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Store-generated subscription identifier, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(i32);

impl FromStr for SubscriptionId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let id: i32 = value
            .parse()
            .map_err(|_| Error::validation(format!("{} is not a valid id", value)))?;
        if id <= 0 {
            return Err(Error::validation("Id must be positive"));
        }
        Ok(Self(id))
    }
}

impl From<SubscriptionId> for i32 {
    fn from(value: SubscriptionId) -> Self {
        value.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
