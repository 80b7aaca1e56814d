//! Monthly calculation period.
//!
//! Incentives are computed per calendar month; the [`MonthlyPeriod`] type
//! identifies which month a batch of sales rows belongs to.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month identified by year and month number.
///
/// # Example
///
/// ```
/// use incentive_engine::models::MonthlyPeriod;
///
/// let period = MonthlyPeriod::new(2026, 2).unwrap();
/// assert_eq!(period.to_string(), "2026-02");
/// assert!(MonthlyPeriod::new(2026, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthlyPeriod {
    /// The calendar year.
    pub year: i32,
    /// The month number, 1 through 12.
    pub month: u32,
}

impl MonthlyPeriod {
    /// Creates a validated period.
    ///
    /// Returns `InvalidPeriod` if the month is outside 1-12 or the year is out
    /// of the supported calendar range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let period = Self { year, month };
        period.validate()?;
        Ok(period)
    }

    /// Checks that this period names a real calendar month.
    ///
    /// Deserialized periods are not validated automatically.
    pub fn validate(&self) -> EngineResult<()> {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(_) => Ok(()),
            None => Err(EngineError::InvalidPeriod {
                year: self.year,
                month: self.month,
            }),
        }
    }
}

impl fmt::Display for MonthlyPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
