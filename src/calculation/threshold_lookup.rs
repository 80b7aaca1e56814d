//! Threshold resolution.
//!
//! Thresholds are resolved in two explicit steps:
//!
//! 1. If an override table is supplied and contains the position, use it.
//! 2. Otherwise use the built-in default table.
//!
//! A position found in neither table cannot be calculated.

use crate::config::{ThresholdTable, ThresholdTriple};
use crate::models::{AuditStep, ThresholdSource};

/// The result of a threshold lookup, including the audit step.
#[derive(Debug, Clone)]
pub struct ThresholdLookupResult {
    /// The resolved triple and the table it came from, if found.
    pub resolved: Option<(ThresholdTriple, ThresholdSource)>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Resolves the threshold triple for a position.
///
/// `position` is expected to be trimmed already.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::resolve_thresholds;
/// use incentive_engine::config::{ThresholdTable, ThresholdTriple};
/// use incentive_engine::models::ThresholdSource;
/// use rust_decimal::Decimal;
///
/// // An override table that lacks the position falls back to the defaults.
/// let mut overrides = ThresholdTable::new();
/// overrides.insert(
///     "수습기사",
///     ThresholdTriple::new(Decimal::from(1), Decimal::from(2), Decimal::from(3)),
/// );
///
/// let result = resolve_thresholds("팀장", Some(&overrides), 1);
/// let (triple, source) = result.resolved.unwrap();
/// assert_eq!(source, ThresholdSource::Default);
/// assert_eq!(triple.base, Decimal::from(24_500_000));
/// ```
pub fn resolve_thresholds(
    position: &str,
    overrides: Option<&ThresholdTable>,
    step_number: u32,
) -> ThresholdLookupResult {
    let from_override = overrides
        .and_then(|table| table.get(position))
        .map(|triple| (*triple, ThresholdSource::Override));

    let resolved = match from_override {
        Some(found) => Some(found),
        None => ThresholdTable::defaults()
            .get(position)
            .map(|triple| (*triple, ThresholdSource::Default)),
    };

    let (output, reasoning) = match &resolved {
        Some((triple, source)) => {
            let source_str = match source {
                ThresholdSource::Override => "override",
                ThresholdSource::Default => "default",
            };
            (
                serde_json::json!({
                    "found": true,
                    "source": source_str,
                    "base": triple.base.to_string(),
                    "level1_end": triple.level1_end.to_string(),
                    "level2_end": triple.level2_end.to_string(),
                }),
                format!(
                    "Position '{}' uses {} thresholds {} / {} / {}",
                    position, source_str, triple.base, triple.level1_end, triple.level2_end
                ),
            )
        }
        None => (
            serde_json::json!({ "found": false }),
            format!(
                "Position '{}' is not in the override or default threshold table",
                position
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "threshold_lookup".to_string(),
        rule_name: "Threshold Lookup".to_string(),
        input: serde_json::json!({
            "position": position,
            "override_table_supplied": overrides.is_some(),
        }),
        output,
        reasoning,
    };

    ThresholdLookupResult {
        resolved,
        audit_step,
    }
}
