use crate::error::{Error, Result};

/// A 1-based page of `count` records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    count: i64,
}

impl Pagination {
    pub fn new(page: i64, count: i64) -> Result<Self> {
        if page <= 0 {
            return Err(Error::validation("Page must be positive"));
        }
        if count <= 0 {
            return Err(Error::validation("Count must be positive"));
        }
        // Reject pages whose offset cannot be represented
        (page - 1)
            .checked_mul(count)
            .ok_or_else(|| Error::validation("Page out of range"))?;

        Ok(Self { page, count })
    }

    /// Parse the raw `page` and `count` query values
    pub fn parse(page: Option<&str>, count: Option<&str>) -> Result<Self> {
        let page = parse_positive("page", page)?;
        let count = parse_positive("count", count)?;
        Self::new(page, count)
    }

    /// Number of records to skip
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.count
    }

    /// Number of records to return
    pub fn limit(&self) -> i64 {
        self.count
    }
}

fn parse_positive(name: &str, value: Option<&str>) -> Result<i64> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::validation(format!("Missing {}", name)))?;
    value
        .trim()
        .parse()
        .map_err(|_| Error::validation(format!("{} must be an integer", name)))
}
