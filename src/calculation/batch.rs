//! Batch calculation over a month's uploaded sales rows.
//!
//! Each row is run through [`calculate_incentive`] independently. The roster
//! fills in what the upload lacks: the employee's compensation terms when no
//! explicit classification was supplied, and the store name.

use tracing::debug;

use crate::config::{EmployeeRoster, ThresholdTable};
use crate::models::{
    BatchResult, BatchRow, BatchTotals, EmploymentClassification, MonthlyPeriod, SalesRecord,
    UNASSIGNED_STORE,
};

use super::incentive::calculate_incentive;

/// One row of a batch with its optional explicit classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// The sales row.
    pub record: SalesRecord,
    /// Compensation terms supplied with the row; takes precedence over the roster.
    pub classification: Option<EmploymentClassification>,
}

impl From<SalesRecord> for BatchEntry {
    fn from(record: SalesRecord) -> Self {
        Self {
            record,
            classification: None,
        }
    }
}

/// Calculates every row of a batch and the month's totals.
///
/// Rows are returned in input order. An ineligible row never aborts the batch.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::{BatchEntry, calculate_batch};
/// use incentive_engine::config::EmployeeRoster;
/// use incentive_engine::models::{MonthlyPeriod, SalesRecord, UNASSIGNED_STORE};
/// use rust_decimal::Decimal;
///
/// let record = SalesRecord {
///     employee_name: "홍길동".to_string(),
///     position: "팀장".to_string(),
///     category: "택시".to_string(),
///     net_sales: Decimal::from(26_000_000),
///     profit_margin: Decimal::from(40),
/// };
///
/// let period = MonthlyPeriod::new(2024, 5).unwrap();
/// let result = calculate_batch(period, vec![BatchEntry::from(record)], &EmployeeRoster::default(), None);
///
/// assert_eq!(result.rows[0].store_name, UNASSIGNED_STORE);
/// assert_eq!(result.totals.total_incentive, Decimal::from(49_500));
/// assert_eq!(result.totals.employee_count, 1);
/// ```
pub fn calculate_batch(
    period: MonthlyPeriod,
    entries: Vec<BatchEntry>,
    roster: &EmployeeRoster,
    thresholds: Option<&ThresholdTable>,
) -> BatchResult {
    let rows: Vec<BatchRow> = entries
        .into_iter()
        .map(|entry| {
            let rostered = roster.find_by_name(&entry.record.employee_name);
            let classification = entry
                .classification
                .or_else(|| rostered.map(|e| e.classification()));
            let store_name = rostered
                .and_then(|e| e.store_name.clone())
                .unwrap_or_else(|| UNASSIGNED_STORE.to_string());

            let result = calculate_incentive(&entry.record, classification.as_ref(), thresholds);

            BatchRow {
                record: entry.record,
                store_name,
                result,
            }
        })
        .collect();

    let totals = BatchTotals::from_rows(&rows);

    debug!(
        period = %period,
        rows = rows.len(),
        total_incentive = %totals.total_incentive,
        "Calculated batch"
    );

    BatchResult {
        period,
        rows,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompensationMode, IneligibleReason, RosterEmployee};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(name: &str, position: &str, net_sales: &str, margin: &str) -> SalesRecord {
        SalesRecord {
            employee_name: name.to_string(),
            position: position.to_string(),
            category: "택시".to_string(),
            net_sales: dec(net_sales),
            profit_margin: dec(margin),
        }
    }

    fn roster_employee(
        name: &str,
        store: Option<&str>,
        mode: CompensationMode,
        base_salary: &str,
        is_active: bool,
    ) -> RosterEmployee {
        RosterEmployee {
            name: name.to_string(),
            position: "팀장".to_string(),
            store_name: store.map(str::to_string),
            compensation_mode: mode,
            base_salary: dec(base_salary),
            is_active,
        }
    }

    fn roster() -> EmployeeRoster {
        EmployeeRoster::new(vec![
            roster_employee("서인영", Some("강남점"), CompensationMode::IncentiveEligible, "2500000", true),
            roster_employee("박기본", Some("분당점"), CompensationMode::BasicSalaryOnly, "3200000", true),
            roster_employee("정퇴사", Some("분당점"), CompensationMode::IncentiveEligible, "2100000", false),
        ])
    }

    fn period() -> MonthlyPeriod {
        MonthlyPeriod::new(2024, 5).unwrap()
    }

    /// BT-001: roster supplies classification and store
    #[test]
    fn test_roster_supplies_classification_and_store() {
        let entries = vec![BatchEntry::from(record("서인영", "팀장", "26000000", "40"))];
        let result = calculate_batch(period(), entries, &roster(), None);

        let row = &result.rows[0];
        assert_eq!(row.store_name, "강남점");
        assert_eq!(row.result.base_salary, dec("2500000"));
        assert_eq!(row.result.incentive_amount, dec("49500"));
        assert_eq!(row.result.total_salary, dec("2549500"));
    }

    /// BT-002: explicit classification beats the roster
    #[test]
    fn test_explicit_classification_wins() {
        let entries = vec![BatchEntry {
            record: record("박기본", "팀장", "26000000", "40"),
            classification: Some(EmploymentClassification {
                compensation_mode: CompensationMode::IncentiveEligible,
                base_salary: dec("1000000"),
            }),
        }];
        let result = calculate_batch(period(), entries, &roster(), None);

        let row = &result.rows[0];
        assert!(row.result.is_calculated());
        assert_eq!(row.result.base_salary, dec("1000000"));
        assert_eq!(row.store_name, "분당점");
    }

    /// BT-003: unknown employees are unassigned with no classification
    #[test]
    fn test_unknown_employee_is_unassigned() {
        let entries = vec![BatchEntry::from(record("없는사람", "팀장", "26000000", "40"))];
        let result = calculate_batch(period(), entries, &roster(), None);

        let row = &result.rows[0];
        assert_eq!(row.store_name, UNASSIGNED_STORE);
        assert_eq!(row.result.base_salary, Decimal::ZERO);
        assert_eq!(row.result.incentive_amount, dec("49500"));
    }

    /// BT-004: inactive employees keep their store and compensation terms
    #[test]
    fn test_inactive_employee_keeps_roster_terms() {
        let entries = vec![BatchEntry::from(record("정퇴사", "팀장", "26000000", "40"))];
        let result = calculate_batch(period(), entries, &roster(), None);

        let row = &result.rows[0];
        assert_eq!(row.store_name, "분당점");
        assert_eq!(row.result.base_salary, dec("2100000"));
        assert_eq!(row.result.total_salary, dec("2149500"));
    }

    /// BT-005: ineligible rows do not abort the batch
    #[test]
    fn test_ineligible_rows_do_not_abort_batch() {
        let entries = vec![
            BatchEntry::from(record("박기본", "팀장", "50000000", "40")),
            BatchEntry::from(record("최공장", "공장장", "50000000", "40")),
            BatchEntry::from(record("서인영", "팀장", "26000000", "40")),
        ];
        let result = calculate_batch(period(), entries, &roster(), None);

        assert_eq!(result.rows.len(), 3);
        assert_eq!(
            result.rows[0].result.ineligible_reason(),
            Some(IneligibleReason::BasicSalaryOnly)
        );
        assert_eq!(
            result.rows[1].result.ineligible_reason(),
            Some(IneligibleReason::ManagerRole)
        );
        assert!(result.rows[2].result.is_calculated());

        assert_eq!(result.totals.employee_count, 3);
        assert_eq!(result.totals.total_revenue, dec("126000000"));
        assert_eq!(result.totals.total_incentive, dec("49500"));
        assert_eq!(result.totals.total_base_salary, dec("5700000"));
        assert_eq!(result.totals.total_salary, dec("5749500"));
        // 50M x 40% x 2 + 26M x 40%
        assert_eq!(result.totals.total_profit, dec("50400000"));
    }

    /// BT-006: rows too large for `Decimal` arithmetic do not abort the batch
    #[test]
    fn test_oversized_rows_do_not_abort_batch() {
        let entries = vec![
            BatchEntry::from(record("a", "팀장", "50000000000000000000000000000", "40")),
            BatchEntry::from(record("b", "팀장", "50000000000000000000000000000", "40")),
        ];
        let result = calculate_batch(period(), entries, &roster(), None);

        assert_eq!(result.rows.len(), 2);
        assert!(result.rows.iter().all(|r| r.result.is_calculated()));
        assert_eq!(result.totals.total_revenue, Decimal::MAX);
        assert_eq!(result.totals.employee_count, 2);
    }

    #[test]
    fn test_rows_keep_input_order() {
        let entries = vec![
            BatchEntry::from(record("b", "기사", "1", "30")),
            BatchEntry::from(record("a", "기사", "2", "30")),
        ];
        let result = calculate_batch(period(), entries, &roster(), None);

        let names: Vec<&str> = result
            .rows
            .iter()
            .map(|r| r.record.employee_name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_batch() {
        let result = calculate_batch(period(), Vec::new(), &roster(), None);
        assert!(result.rows.is_empty());
        assert_eq!(result.totals, BatchTotals::default());
        assert_eq!(result.period, period());
    }

    #[test]
    fn test_override_table_applies_to_every_row() {
        let mut overrides = ThresholdTable::new();
        overrides.insert(
            "수습기사",
            crate::config::ThresholdTriple::new(dec("18000000"), dec("22000000"), dec("35000000")),
        );

        let entries = vec![BatchEntry::from(record("이수습", "수습기사", "20000000", "38.5"))];
        let result = calculate_batch(period(), entries, &roster(), Some(&overrides));

        // (20,000,000 - 18,000,000) x 0.03 x 1.00
        assert_eq!(result.rows[0].result.incentive_amount, dec("60000"));
    }
}
