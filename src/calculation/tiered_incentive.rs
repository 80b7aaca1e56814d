//! Tiered incentive accumulation.
//!
//! Sales above the base threshold earn incentive in three bands:
//!
//! | Tier | Band                        | Rate                         |
//! |------|-----------------------------|------------------------------|
//! | 1    | base .. level1_end          | 3%                           |
//! | 2    | level1_end .. level2_end    | 7%                           |
//! | 3    | above level2_end            | 10% (7% for 기사)            |
//!
//! Every band is scaled by the margin multiplier. A band only contributes
//! when it is strictly positive, so a non-monotonic triple never produces a
//! negative amount.
//!
//! Arithmetic that would overflow `Decimal` saturates instead of panicking;
//! the result reports it through [`TieredIncentiveResult::saturated`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ThresholdTriple;
use crate::models::AuditStep;

/// Rate applied to the tier 1 band.
pub const TIER_1_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Rate applied to the tier 2 band.
pub const TIER_2_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// Rate applied to the tier 3 band for every position except the lowest one.
pub const TIER_3_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// The lowest-seniority position, whose tier 3 band runs at the tier 2 rate.
pub const LOWEST_SENIORITY_POSITION: &str = "기사";

/// Returns the tier 3 rate for a trimmed position.
pub fn tier_3_rate(position: &str) -> Decimal {
    if position == LOWEST_SENIORITY_POSITION {
        TIER_2_RATE
    } else {
        TIER_3_RATE
    }
}

/// One band's contribution to the incentive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierContribution {
    /// The tier number (1-3).
    pub tier: u8,
    /// Sales within this tier's band.
    pub band: Decimal,
    /// The tier's rate before the multiplier.
    pub rate: Decimal,
    /// `band * rate * multiplier`, unrounded.
    pub amount: Decimal,
}

/// The result of the tiered accumulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredIncentiveResult {
    /// Sum of every contribution, before flooring.
    pub raw_amount: Decimal,
    /// The highest tier with a strictly positive contribution (0 if none).
    pub level: u8,
    /// Contributing tiers in ascending order.
    pub tiers: Vec<TierContribution>,
    /// Audit steps, one per contributing tier.
    pub audit_steps: Vec<AuditStep>,
    /// True if a band, contribution or the sum overflowed and was clamped.
    pub saturated: bool,
}

/// Accumulates the tiered incentive for net sales against a threshold triple.
///
/// `position` selects the tier 3 rate and must already be trimmed.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::calculate_tiers;
/// use incentive_engine::config::ThresholdTriple;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let thresholds = ThresholdTriple::new(
///     Decimal::from(24_500_000),
///     Decimal::from(28_500_000),
///     Decimal::from(45_500_000),
/// );
///
/// let result = calculate_tiers(
///     Decimal::from(30_000_000),
///     &thresholds,
///     Decimal::from_str("0.95").unwrap(),
///     "팀장",
///     1,
/// );
///
/// assert_eq!(result.level, 2);
/// assert_eq!(result.raw_amount, Decimal::from(213_750));
/// ```
pub fn calculate_tiers(
    net_sales: Decimal,
    thresholds: &ThresholdTriple,
    multiplier: Decimal,
    position: &str,
    step_number_start: u32,
) -> TieredIncentiveResult {
    let bands = [
        (1u8, thresholds.base, Some(thresholds.level1_end), TIER_1_RATE),
        (2u8, thresholds.level1_end, Some(thresholds.level2_end), TIER_2_RATE),
        (3u8, thresholds.level2_end, None, tier_3_rate(position)),
    ];

    let mut tiers = Vec::new();
    let mut audit_steps = Vec::new();
    let mut step_number = step_number_start;
    let mut saturated = false;

    for (tier, lower, upper, rate) in bands {
        if net_sales <= lower {
            continue;
        }

        let capped = match upper {
            Some(upper) => net_sales.min(upper),
            None => net_sales,
        };
        let band = capped.checked_sub(lower).unwrap_or_else(|| {
            saturated = true;
            capped.saturating_sub(lower)
        });
        if band <= Decimal::ZERO {
            continue;
        }

        let amount = band
            .checked_mul(rate)
            .and_then(|scaled| scaled.checked_mul(multiplier))
            .unwrap_or_else(|| {
                saturated = true;
                band.saturating_mul(rate).saturating_mul(multiplier)
            });
        if amount <= Decimal::ZERO {
            continue;
        }

        audit_steps.push(AuditStep {
            step_number,
            rule_id: format!("tier_{}", tier),
            rule_name: format!("Tier {} Incentive", tier),
            input: serde_json::json!({
                "net_sales": net_sales.normalize().to_string(),
                "lower": lower.normalize().to_string(),
                "upper": upper.map(|u| u.normalize().to_string()),
                "rate": rate.normalize().to_string(),
                "multiplier": multiplier.normalize().to_string(),
            }),
            output: serde_json::json!({
                "band": band.normalize().to_string(),
                "amount": amount.normalize().to_string(),
            }),
            reasoning: format!(
                "({} - {}) x {} x {} = {}",
                capped.normalize(),
                lower.normalize(),
                rate.normalize(),
                multiplier.normalize(),
                amount.normalize()
            ),
        });
        step_number += 1;

        tiers.push(TierContribution {
            tier,
            band,
            rate,
            amount,
        });
    }

    let raw_amount = tiers.iter().fold(Decimal::ZERO, |sum, t| {
        sum.checked_add(t.amount).unwrap_or_else(|| {
            saturated = true;
            Decimal::MAX
        })
    });
    let level = tiers.last().map(|t| t.tier).unwrap_or(0);

    TieredIncentiveResult {
        raw_amount,
        level,
        tiers,
        audit_steps,
        saturated,
    }
}
