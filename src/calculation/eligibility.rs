//! Incentive eligibility policy.
//!
//! Two policy rules stop a calculation before thresholds are consulted, and
//! they are checked in this order:
//!
//! 1. Employees paid base salary only.
//! 2. The manager role, which never earns incentive.

use crate::models::{AuditStep, EmploymentClassification, IneligibleReason};

/// The position that never earns incentive.
pub const MANAGER_POSITION: &str = "공장장";

/// The result of the eligibility check, including the audit step.
#[derive(Debug, Clone)]
pub struct EligibilityResult {
    /// The policy rule that applied, if any.
    pub ineligible_reason: Option<IneligibleReason>,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Checks the policy rules that disqualify a row from incentive.
///
/// `position` is expected to be trimmed already.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::check_eligibility;
/// use incentive_engine::models::IneligibleReason;
///
/// let result = check_eligibility("공장장", None, 1);
/// assert_eq!(result.ineligible_reason, Some(IneligibleReason::ManagerRole));
///
/// let result = check_eligibility("팀장", None, 1);
/// assert_eq!(result.ineligible_reason, None);
/// ```
pub fn check_eligibility(
    position: &str,
    classification: Option<&EmploymentClassification>,
    step_number: u32,
) -> EligibilityResult {
    let basic_salary_only = classification.is_some_and(|c| c.is_basic_salary_only());

    let ineligible_reason = if basic_salary_only {
        Some(IneligibleReason::BasicSalaryOnly)
    } else if position == MANAGER_POSITION {
        Some(IneligibleReason::ManagerRole)
    } else {
        None
    };

    let reasoning = match ineligible_reason {
        Some(IneligibleReason::BasicSalaryOnly) => {
            "Employee is paid base salary only - no incentive".to_string()
        }
        Some(IneligibleReason::ManagerRole) => {
            format!("Position '{}' is the manager role - no incentive", position)
        }
        _ => format!("Position '{}' is eligible for incentive", position),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "eligibility".to_string(),
        rule_name: "Incentive Eligibility".to_string(),
        input: serde_json::json!({
            "position": position,
            "basic_salary_only": basic_salary_only,
        }),
        output: serde_json::json!({
            "eligible": ineligible_reason.is_none(),
            "reason": ineligible_reason.map(|r| r.code()),
        }),
        reasoning,
    };

    EligibilityResult {
        ineligible_reason,
        audit_step,
    }
}
