//! Incentive calculation for a single sales row.
//!
//! [`calculate_incentive`] runs the full pipeline and is the only entry point
//! callers need:
//!
//! 1. Eligibility (basic salary only, manager role)
//! 2. Threshold lookup (override table, then defaults)
//! 3. Margin multiplier
//! 4. Tiered accumulation
//! 5. Flooring to a whole currency unit
//!
//! The function never fails or panics. Policy short-circuits are reported
//! through [`IncentiveOutcome::Ineligible`], and amounts too large for
//! `Decimal` are clamped with an `AMOUNT_SATURATED` warning.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ThresholdTable;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, EmploymentClassification, IncentiveOutcome,
    IncentiveResult, IneligibleReason, SalesRecord,
};

use super::eligibility::check_eligibility;
use super::margin_multiplier::determine_multiplier;
use super::threshold_lookup::resolve_thresholds;
use super::tiered_incentive::calculate_tiers;

/// Calculates the incentive and total salary for one sales row.
///
/// A missing `classification` means the employee is incentive-eligible with a
/// base salary of zero. `thresholds` is the tenant override table; positions
/// it lacks fall back to the built-in defaults.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::calculate_incentive;
/// use incentive_engine::models::SalesRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = SalesRecord {
///     employee_name: "양성승".to_string(),
///     position: "선임기사".to_string(),
///     category: "택시".to_string(),
///     net_sales: Decimal::from(58_454_200),
///     profit_margin: Decimal::from_str("38.5").unwrap(),
/// };
///
/// let result = calculate_incentive(&record, None, None);
/// assert_eq!(result.incentive_amount, Decimal::from(2_815_420));
/// assert_eq!(result.level, 3);
/// ```
pub fn calculate_incentive(
    record: &SalesRecord,
    classification: Option<&EmploymentClassification>,
    thresholds: Option<&ThresholdTable>,
) -> IncentiveResult {
    let position = record.normalized_position();
    let base_salary = classification
        .map(|c| c.base_salary)
        .unwrap_or(Decimal::ZERO);
    let mut trace = AuditTrace::default();

    let eligibility = check_eligibility(position, classification, 1);
    trace.steps.push(eligibility.audit_step);
    if let Some(reason) = eligibility.ineligible_reason {
        return short_circuit(record, reason, base_salary, trace);
    }

    let lookup = resolve_thresholds(position, thresholds, 2);
    trace.steps.push(lookup.audit_step);
    let Some((triple, source)) = lookup.resolved else {
        return short_circuit(record, IneligibleReason::UnknownPosition, base_salary, trace);
    };

    if !triple.is_monotonic() {
        trace.warnings.push(AuditWarning {
            code: "THRESHOLDS_NOT_MONOTONIC".to_string(),
            message: format!(
                "Thresholds for '{}' are not ascending ({} / {} / {}); negative bands were skipped",
                position, triple.base, triple.level1_end, triple.level2_end
            ),
            severity: "medium".to_string(),
        });
    }

    let multiplier = determine_multiplier(record.profit_margin, &record.category, 3);
    trace.steps.push(multiplier.audit_step);

    let tiers = calculate_tiers(record.net_sales, &triple, multiplier.multiplier, position, 4);
    let floor_step_number = 4 + tiers.audit_steps.len() as u32;
    trace.steps.extend(tiers.audit_steps);

    let incentive_amount = tiers.raw_amount.floor();
    trace.steps.push(AuditStep {
        step_number: floor_step_number,
        rule_id: "incentive_floor".to_string(),
        rule_name: "Incentive Total".to_string(),
        input: serde_json::json!({
            "raw_amount": tiers.raw_amount.normalize().to_string(),
        }),
        output: serde_json::json!({
            "incentive_amount": incentive_amount.normalize().to_string(),
            "level": tiers.level,
        }),
        reasoning: format!(
            "Sum of tiers {} floored to {} (level {})",
            tiers.raw_amount.normalize(),
            incentive_amount.normalize(),
            tiers.level
        ),
    });

    let total_salary = incentive_amount.checked_add(base_salary);
    if tiers.saturated || total_salary.is_none() {
        trace.warnings.push(AuditWarning {
            code: "AMOUNT_SATURATED".to_string(),
            message: format!(
                "Incentive for '{}' exceeded the representable range and was clamped",
                position
            ),
            severity: "high".to_string(),
        });
    }
    let total_salary = total_salary.unwrap_or_else(|| incentive_amount.saturating_add(base_salary));

    debug!(
        employee = %record.employee_name,
        position,
        net_sales = %record.net_sales,
        multiplier = %multiplier.multiplier,
        level = tiers.level,
        incentive_amount = %incentive_amount,
        "Calculated incentive"
    );

    IncentiveResult {
        outcome: IncentiveOutcome::Calculated,
        incentive_amount,
        level: tiers.level,
        multiplier: multiplier.multiplier,
        base_deductible: triple.base,
        base_salary,
        total_salary,
        threshold_source: Some(source),
        audit_trace: trace,
    }
}

fn short_circuit(
    record: &SalesRecord,
    reason: IneligibleReason,
    base_salary: Decimal,
    trace: AuditTrace,
) -> IncentiveResult {
    debug!(
        employee = %record.employee_name,
        position = record.normalized_position(),
        reason = reason.code(),
        "Incentive short-circuited"
    );

    IncentiveResult {
        audit_trace: trace,
        ..IncentiveResult::ineligible(reason, base_salary)
    }
}
