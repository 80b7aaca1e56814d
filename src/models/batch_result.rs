//! Batch result models.
//!
//! A batch is one month's uploaded sales rows run through the engine. These
//! types hold the per-row outcomes and the monthly totals that a persistence
//! layer stores alongside them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{IncentiveResult, MonthlyPeriod, SalesRecord};

/// Store label used when an employee has no store assignment.
pub const UNASSIGNED_STORE: &str = "미지정";

/// One sales row together with its calculated result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    /// The input row.
    pub record: SalesRecord,
    /// The employee's store, or [`UNASSIGNED_STORE`].
    pub store_name: String,
    /// The engine's result for this row.
    pub result: IncentiveResult,
}

/// Monthly totals across all rows of a batch.
///
/// Sums saturate at the `Decimal` bounds rather than overflowing.
///
/// # Example
///
/// ```
/// use incentive_engine::models::BatchTotals;
///
/// let totals = BatchTotals::default();
/// assert_eq!(totals.employee_count, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchTotals {
    /// Sum of net sales.
    pub total_revenue: Decimal,
    /// Sum of floored incentive amounts.
    pub total_incentive: Decimal,
    /// Sum of `net_sales * margin / 100`, rounded to a whole unit.
    pub total_profit: Decimal,
    /// Sum of base salaries.
    pub total_base_salary: Decimal,
    /// Sum of total salaries (incentive plus base salary).
    pub total_salary: Decimal,
    /// Number of rows in the batch.
    pub employee_count: usize,
}

impl BatchTotals {
    /// Accumulates totals over a set of batch rows.
    pub fn from_rows(rows: &[BatchRow]) -> Self {
        let mut totals = Self::default();
        let mut profit = Decimal::ZERO;

        for row in rows {
            totals.total_revenue = totals.total_revenue.saturating_add(row.record.net_sales);
            totals.total_incentive = totals
                .total_incentive
                .saturating_add(row.result.incentive_amount);
            totals.total_base_salary = totals
                .total_base_salary
                .saturating_add(row.result.base_salary);
            totals.total_salary = totals.total_salary.saturating_add(row.result.total_salary);
            profit = profit.saturating_add(row.record.gross_profit());
        }

        totals.total_profit = profit.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        totals.employee_count = rows.len();
        totals
    }
}

/// The outcome of running the engine over a month's sales rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// The month the rows belong to.
    pub period: MonthlyPeriod,
    /// Per-row results in input order.
    pub rows: Vec<BatchRow>,
    /// Totals across all rows.
    pub totals: BatchTotals,
}
