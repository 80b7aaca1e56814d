//! Calculation logic for the Incentive Engine.
//!
//! This module contains the incentive pipeline: eligibility checks, threshold
//! resolution, margin-to-multiplier lookup, tiered accumulation, the
//! single-row entry point [`calculate_incentive`] and the month-level
//! [`calculate_batch`].

mod batch;
mod eligibility;
mod incentive;
mod margin_multiplier;
mod threshold_lookup;
mod tiered_incentive;

pub use batch::{BatchEntry, calculate_batch};
pub use eligibility::{EligibilityResult, MANAGER_POSITION, check_eligibility};
pub use incentive::calculate_incentive;
pub use margin_multiplier::{
    COLUMN_MULTIPLIERS, IncentiveCategory, MarginBreakpoint, MarginGrid, MultiplierResult,
    PANGPANG_GRID, TAXI_CATEGORY_MARKER, TAXI_GRID, determine_multiplier, multiplier_for_column,
};
pub use threshold_lookup::{ThresholdLookupResult, resolve_thresholds};
pub use tiered_incentive::{
    LOWEST_SENIORITY_POSITION, TIER_1_RATE, TIER_2_RATE, TIER_3_RATE, TierContribution,
    TieredIncentiveResult, calculate_tiers, tier_3_rate,
};
