use std::fmt;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

const MAX_LEN: usize = 256;

/// Name of the subscribed service, e.g. "Netflix"
#[derive(Debug, PartialEq, Clone)]
pub struct ServiceName(String);

impl FromStr for ServiceName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Err(Error::validation("Service name cannot be empty"));
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err(Error::validation("Service name too long"));
        }
        Ok(Self(value.to_string()))
    }
}

impl ServiceName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
