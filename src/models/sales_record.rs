//! Sales record model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's sales figures for a period, as produced by ingestion.
///
/// # Example
///
/// ```
/// use incentive_engine::models::SalesRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = SalesRecord {
///     employee_name: "서인영".to_string(),
///     position: " 팀장 ".to_string(),
///     category: "택시".to_string(),
///     net_sales: Decimal::from(58_691_900),
///     profit_margin: Decimal::from_str("37.6").unwrap(),
/// };
/// assert_eq!(record.normalized_position(), "팀장");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// The employee's name as written in the upload.
    pub employee_name: String,
    /// Position title; must match a threshold table key once trimmed.
    pub position: String,
    /// Incentive category text; selects the margin table.
    #[serde(default)]
    pub category: String,
    /// Net sales in the smallest currency unit.
    pub net_sales: Decimal,
    /// Profit margin as a percentage (37.6 means 37.6%).
    pub profit_margin: Decimal,
}

impl SalesRecord {
    /// Returns the position with surrounding whitespace removed.
    pub fn normalized_position(&self) -> &str {
        self.position.trim()
    }

    /// Returns the gross profit implied by net sales and margin.
    ///
    /// This is `net_sales * profit_margin / 100`, unrounded, saturating at the
    /// `Decimal` bounds.
    pub fn gross_profit(&self) -> Decimal {
        let rate = self.profit_margin / Decimal::ONE_HUNDRED;
        self.net_sales
            .checked_mul(rate)
            .unwrap_or_else(|| self.net_sales.saturating_mul(rate))
    }
}
