//! Request types for the Incentive Engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint and their conversion into validated domain inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::BatchEntry;
use crate::config::ThresholdTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmploymentClassification, MonthlyPeriod, SalesRecord};

/// Largest accepted net sales or base salary, in currency units.
const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Request body for the `/calculate` endpoint.
///
/// Contains one month's sales rows and, optionally, a threshold table that
/// replaces the configured override table for this call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The month the rows belong to.
    pub period: PeriodRequest,
    /// The uploaded sales rows.
    pub rows: Vec<SalesRowRequest>,
    /// Per-request override thresholds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdTable>,
}

/// Period information in a calculation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The calendar year.
    pub year: i32,
    /// The month number, 1 through 12.
    pub month: u32,
}

/// One sales row in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRowRequest {
    /// The employee's name.
    pub employee_name: String,
    /// Position title.
    pub position: String,
    /// Incentive category text.
    #[serde(default)]
    pub category: String,
    /// Net sales; between zero and 10^15.
    pub net_sales: Decimal,
    /// Profit margin percentage, between -100 and 100.
    pub profit_margin: Decimal,
    /// Explicit compensation terms; the roster is consulted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<EmploymentClassification>,
}

/// A calculation request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    /// The validated period.
    pub period: MonthlyPeriod,
    /// Rows ready for the batch calculation.
    pub entries: Vec<BatchEntry>,
    /// Request-level overrides, if supplied.
    pub thresholds: Option<ThresholdTable>,
}

impl CalculationRequest {
    /// Validates the request and converts it into domain inputs.
    ///
    /// Fails with `InvalidPeriod`, `InvalidSalesRecord` or `InvalidThresholds`.
    pub fn validate(self) -> EngineResult<ValidatedRequest> {
        let period = MonthlyPeriod::try_from(self.period)?;

        if let Some(thresholds) = &self.thresholds {
            thresholds.validate()?;
        }

        for (index, row) in self.rows.iter().enumerate() {
            row.validate(index)?;
        }

        Ok(ValidatedRequest {
            period,
            entries: self.rows.into_iter().map(Into::into).collect(),
            thresholds: self.thresholds,
        })
    }
}

impl SalesRowRequest {
    fn validate(&self, row: usize) -> EngineResult<()> {
        if self.employee_name.trim().is_empty() {
            return Err(EngineError::InvalidSalesRecord {
                row,
                field: "employee_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let invalid = |field: &str, message: String| EngineError::InvalidSalesRecord {
            row,
            field: field.to_string(),
            message,
        };
        let max_amount = Decimal::from(MAX_AMOUNT);

        if self.net_sales < Decimal::ZERO {
            return Err(invalid(
                "net_sales",
                format!("must not be negative, got {}", self.net_sales),
            ));
        }
        if self.net_sales > max_amount {
            return Err(invalid(
                "net_sales",
                format!("must not exceed {}, got {}", max_amount, self.net_sales),
            ));
        }
        if self.profit_margin.abs() > Decimal::ONE_HUNDRED {
            return Err(invalid(
                "profit_margin",
                format!("must be between -100 and 100, got {}", self.profit_margin),
            ));
        }
        if let Some(classification) = &self.classification {
            let base_salary = classification.base_salary;
            if base_salary < Decimal::ZERO || base_salary > max_amount {
                return Err(invalid(
                    "classification.base_salary",
                    format!("must be between 0 and {}, got {}", max_amount, base_salary),
                ));
            }
        }
        Ok(())
    }
}

impl TryFrom<PeriodRequest> for MonthlyPeriod {
    type Error = EngineError;

    fn try_from(req: PeriodRequest) -> EngineResult<Self> {
        MonthlyPeriod::new(req.year, req.month)
    }
}

impl From<SalesRowRequest> for BatchEntry {
    fn from(req: SalesRowRequest) -> Self {
        BatchEntry {
            record: SalesRecord {
                employee_name: req.employee_name,
                position: req.position,
                category: req.category,
                net_sales: req.net_sales,
                profit_margin: req.profit_margin,
            },
            classification: req.classification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompensationMode;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(name: &str, net_sales: &str) -> SalesRowRequest {
        SalesRowRequest {
            employee_name: name.to_string(),
            position: "팀장".to_string(),
            category: "택시".to_string(),
            net_sales: dec(net_sales),
            profit_margin: dec("37.6"),
            classification: None,
        }
    }

    fn request(rows: Vec<SalesRowRequest>) -> CalculationRequest {
        CalculationRequest {
            period: PeriodRequest {
                year: 2024,
                month: 5,
            },
            rows,
            thresholds: None,
        }
    }

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{
            "period": { "year": 2024, "month": 5 },
            "rows": [
                {
                    "employee_name": "서인영",
                    "position": "팀장",
                    "category": "택시",
                    "net_sales": "58691900",
                    "profit_margin": "37.6",
                    "classification": { "compensation_mode": "incentive", "base_salary": "2500000" }
                }
            ],
            "thresholds": { "팀장": ["24500000", "28500000", "45500000"] }
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.period.month, 5);
        assert_eq!(request.rows.len(), 1);
        assert_eq!(
            request.rows[0].classification.as_ref().unwrap().compensation_mode,
            CompensationMode::IncentiveEligible
        );
        assert!(request.thresholds.unwrap().get("팀장").is_some());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "period": { "year": 2024, "month": 5 },
            "rows": [
                { "employee_name": "a", "position": "기사", "net_sales": 1, "profit_margin": 30 }
            ]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert!(request.thresholds.is_none());
        assert!(request.rows[0].classification.is_none());
        assert_eq!(request.rows[0].category, "");
    }

    #[test]
    fn test_validate_converts_rows() {
        let validated = request(vec![row("서인영", "58691900")]).validate().unwrap();

        assert_eq!(validated.period, MonthlyPeriod::new(2024, 5).unwrap());
        assert_eq!(validated.entries.len(), 1);
        assert_eq!(validated.entries[0].record.employee_name, "서인영");
        assert!(validated.entries[0].classification.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_month() {
        let mut req = request(vec![]);
        req.period.month = 13;

        match req.validate() {
            Err(EngineError::InvalidPeriod { month, .. }) => assert_eq!(month, 13),
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let result = request(vec![row("서인영", "1"), row("   ", "1")]).validate();

        match result {
            Err(EngineError::InvalidSalesRecord { row, field, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(field, "employee_name");
            }
            other => panic!("Expected InvalidSalesRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_sales() {
        let result = request(vec![row("서인영", "-1")]).validate();

        match result {
            Err(EngineError::InvalidSalesRecord { field, .. }) => assert_eq!(field, "net_sales"),
            other => panic!("Expected InvalidSalesRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_monotonic_thresholds() {
        let mut req = request(vec![row("서인영", "1")]);
        let mut table = ThresholdTable::new();
        table.insert(
            "팀장",
            crate::config::ThresholdTriple::new(dec("3"), dec("2"), dec("1")),
        );
        req.thresholds = Some(table);

        assert!(matches!(
            req.validate(),
            Err(EngineError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_sales_above_limit() {
        let result = request(vec![row("서인영", "1000000000000001")]).validate();

        match result {
            Err(EngineError::InvalidSalesRecord { field, .. }) => assert_eq!(field, "net_sales"),
            other => panic!("Expected InvalidSalesRecord, got {:?}", other),
        }
        assert!(request(vec![row("서인영", "1000000000000000")]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_margin_out_of_range() {
        for margin in ["100.1", "-100.1", "100000000000000000000"] {
            let mut bad = row("서인영", "10000000000");
            bad.profit_margin = dec(margin);

            match request(vec![bad]).validate() {
                Err(EngineError::InvalidSalesRecord { field, .. }) => {
                    assert_eq!(field, "profit_margin")
                }
                other => panic!("Expected InvalidSalesRecord for {}, got {:?}", margin, other),
            }
        }

        let mut loss = row("서인영", "1");
        loss.profit_margin = dec("-12.5");
        assert!(request(vec![loss]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_base_salary() {
        for base_salary in ["-1", "1000000000000001"] {
            let mut bad = row("서인영", "1");
            bad.classification = Some(EmploymentClassification {
                compensation_mode: CompensationMode::IncentiveEligible,
                base_salary: dec(base_salary),
            });

            match request(vec![bad]).validate() {
                Err(EngineError::InvalidSalesRecord { field, .. }) => {
                    assert_eq!(field, "classification.base_salary")
                }
                other => panic!("Expected InvalidSalesRecord, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_sales_is_valid() {
        assert!(request(vec![row("서인영", "0")]).validate().is_ok());
    }
}
