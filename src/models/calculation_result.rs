//! Calculation result models for the Incentive Engine.
//!
//! This module contains the [`IncentiveResult`] type and its associated
//! structures: the tagged [`IncentiveOutcome`], the [`ThresholdSource`] that
//! records which table supplied the thresholds, and the audit trace that
//! documents each decision taken during a calculation.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why an employee earns no incentive regardless of sales.
///
/// The `Display` form is the diagnostic message shown next to a zero row.
///
/// # Example
///
/// ```
/// use incentive_engine::models::IneligibleReason;
///
/// assert_eq!(IneligibleReason::UnknownPosition.to_string(), "unknown position");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    /// The employee is paid base salary only.
    BasicSalaryOnly,
    /// The position is the manager role, which never earns incentive.
    ManagerRole,
    /// The position is in neither the override nor the default threshold table.
    UnknownPosition,
}

impl IneligibleReason {
    /// A stable machine-readable code for this reason.
    pub fn code(&self) -> &'static str {
        match self {
            IneligibleReason::BasicSalaryOnly => "basic_salary_only",
            IneligibleReason::ManagerRole => "manager_role",
            IneligibleReason::UnknownPosition => "unknown_position",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            IneligibleReason::BasicSalaryOnly => "basic-salary only (no incentive)",
            IneligibleReason::ManagerRole => "manager role (no incentive)",
            IneligibleReason::UnknownPosition => "unknown position",
        };
        f.write_str(message)
    }
}

/// Whether the tiered computation ran for a row.
///
/// A `Calculated` outcome with a zero amount means sales did not exceed the
/// base threshold, which is distinct from an `Ineligible` outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IncentiveOutcome {
    /// Thresholds were resolved and the tiers were evaluated.
    Calculated,
    /// A policy rule short-circuited the calculation.
    Ineligible {
        /// The rule that applied.
        reason: IneligibleReason,
    },
}

/// Which threshold table supplied the triple used for a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// The tenant-configured override table.
    Override,
    /// The built-in default table.
    Default,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag suspicious inputs that do not stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for one incentive calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The result of calculating one employee's incentive.
///
/// # Example
///
/// ```
/// use incentive_engine::models::{IncentiveOutcome, IncentiveResult, IneligibleReason};
/// use rust_decimal::Decimal;
///
/// let result = IncentiveResult::ineligible(IneligibleReason::ManagerRole, Decimal::from(4_000_000));
/// assert_eq!(result.incentive_amount, Decimal::ZERO);
/// assert_eq!(result.total_salary, Decimal::from(4_000_000));
/// assert_eq!(result.message().as_deref(), Some("manager role (no incentive)"));
/// assert_eq!(
///     result.outcome,
///     IncentiveOutcome::Ineligible { reason: IneligibleReason::ManagerRole }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveResult {
    /// Whether the tiers were evaluated or a policy rule applied.
    pub outcome: IncentiveOutcome,
    /// Incentive in whole currency units, floored.
    pub incentive_amount: Decimal,
    /// The highest tier (0-3) with a strictly positive contribution.
    pub level: u8,
    /// The margin multiplier applied to every tier (zero when ineligible).
    pub multiplier: Decimal,
    /// The base threshold that was deducted before tier 1.
    pub base_deductible: Decimal,
    /// The employee's base salary (zero when no classification is known).
    pub base_salary: Decimal,
    /// `incentive_amount + base_salary`.
    pub total_salary: Decimal,
    /// Which table supplied the thresholds, when they were resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_source: Option<ThresholdSource>,
    /// Audit trace of the calculation decisions.
    pub audit_trace: AuditTrace,
}

impl IncentiveResult {
    /// Builds the zero-incentive result for a policy short-circuit.
    pub fn ineligible(reason: IneligibleReason, base_salary: Decimal) -> Self {
        Self {
            outcome: IncentiveOutcome::Ineligible { reason },
            incentive_amount: Decimal::ZERO,
            level: 0,
            multiplier: Decimal::ZERO,
            base_deductible: Decimal::ZERO,
            base_salary,
            total_salary: base_salary,
            threshold_source: None,
            audit_trace: AuditTrace::default(),
        }
    }

    /// Returns the reason when a policy rule short-circuited the calculation.
    pub fn ineligible_reason(&self) -> Option<IneligibleReason> {
        match self.outcome {
            IncentiveOutcome::Ineligible { reason } => Some(reason),
            IncentiveOutcome::Calculated => None,
        }
    }

    /// Returns true if the tiers were evaluated.
    pub fn is_calculated(&self) -> bool {
        self.outcome == IncentiveOutcome::Calculated
    }

    /// Returns the diagnostic message explaining a short-circuit outcome.
    ///
    /// Below-threshold results carry no message.
    pub fn message(&self) -> Option<String> {
        self.ineligible_reason().map(|reason| reason.to_string())
    }
}
