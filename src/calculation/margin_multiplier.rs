//! Margin multiplier lookup.
//!
//! The incentive multiplier depends on the row's profit margin and its
//! category. Each category has its own margin grid: an ordered list of
//! inclusive upper bounds, each naming a grid column, followed by a catch-all
//! column for margins above the last bound. Columns map to multipliers through
//! a single shared table.
//!
//! ## Grids
//!
//! | Column | Taxi (A) upper bound | Other (B) upper bound | Multiplier |
//! |--------|----------------------|-----------------------|------------|
//! | 1      | 36.5                 | 36.5                  | 0.90       |
//! | 2      | 38.0                 | 38.0                  | 0.95       |
//! | 3      | 39.5                 | 39.5                  | 1.00       |
//! | 4      | 41.0                 | 41.0                  | 1.10       |
//! | 5      | above 41.0           | 42.5                  | 1.20       |
//! | 6      |                      | 44.0                  | 1.30       |
//! | 7      |                      | 45.5                  | 1.40       |
//! | 8      |                      | 47.0                  | 1.50       |
//! | 9      |                      | above 47.0            | 1.60       |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Category text containing this marker selects the taxi grid.
pub const TAXI_CATEGORY_MARKER: &str = "택시";

/// Multiplier for each grid column, indexed from column 1.
pub const COLUMN_MULTIPLIERS: [Decimal; 9] = [
    Decimal::from_parts(90, 0, 0, false, 2),
    Decimal::from_parts(95, 0, 0, false, 2),
    Decimal::from_parts(100, 0, 0, false, 2),
    Decimal::from_parts(110, 0, 0, false, 2),
    Decimal::from_parts(120, 0, 0, false, 2),
    Decimal::from_parts(130, 0, 0, false, 2),
    Decimal::from_parts(140, 0, 0, false, 2),
    Decimal::from_parts(150, 0, 0, false, 2),
    Decimal::from_parts(160, 0, 0, false, 2),
];

/// Which margin grid applies to a sales row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveCategory {
    /// Taxi work (category A): five-column grid.
    Taxi,
    /// Everything else (category B, "빵빵"): nine-column grid.
    Pangpang,
}

impl IncentiveCategory {
    /// Classifies free-text category input.
    ///
    /// # Examples
    ///
    /// ```
    /// use incentive_engine::calculation::IncentiveCategory;
    ///
    /// assert_eq!(IncentiveCategory::classify("택시"), IncentiveCategory::Taxi);
    /// assert_eq!(IncentiveCategory::classify("법인택시"), IncentiveCategory::Taxi);
    /// assert_eq!(IncentiveCategory::classify("빵빵"), IncentiveCategory::Pangpang);
    /// assert_eq!(IncentiveCategory::classify(""), IncentiveCategory::Pangpang);
    /// ```
    pub fn classify(category: &str) -> Self {
        if category.contains(TAXI_CATEGORY_MARKER) {
            IncentiveCategory::Taxi
        } else {
            IncentiveCategory::Pangpang
        }
    }

    /// Returns the margin grid for this category.
    pub fn grid(&self) -> &'static MarginGrid {
        match self {
            IncentiveCategory::Taxi => &TAXI_GRID,
            IncentiveCategory::Pangpang => &PANGPANG_GRID,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            IncentiveCategory::Taxi => "taxi",
            IncentiveCategory::Pangpang => "pangpang",
        }
    }
}

/// A margin upper bound (inclusive) and the column it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginBreakpoint {
    /// Margins at or below this value select `column`.
    pub max_margin: Decimal,
    /// The 1-indexed grid column.
    pub column: u8,
}

/// An ordered margin grid with a final catch-all column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginGrid {
    /// Breakpoints in ascending order of `max_margin`.
    pub breakpoints: &'static [MarginBreakpoint],
    /// Column for margins above every breakpoint.
    pub catch_all_column: u8,
}

impl MarginGrid {
    /// Returns the first column whose upper bound is at or above `margin`,
    /// or the catch-all column.
    pub fn column_for(&self, margin: Decimal) -> u8 {
        self.breakpoints
            .iter()
            .find(|bp| margin <= bp.max_margin)
            .map(|bp| bp.column)
            .unwrap_or(self.catch_all_column)
    }
}

const fn breakpoint(tenths: u32, column: u8) -> MarginBreakpoint {
    MarginBreakpoint {
        max_margin: Decimal::from_parts(tenths, 0, 0, false, 1),
        column,
    }
}

/// Grid for taxi rows.
pub const TAXI_GRID: MarginGrid = MarginGrid {
    breakpoints: &[
        breakpoint(365, 1),
        breakpoint(380, 2),
        breakpoint(395, 3),
        breakpoint(410, 4),
    ],
    catch_all_column: 5,
};

/// Grid for all other rows.
pub const PANGPANG_GRID: MarginGrid = MarginGrid {
    breakpoints: &[
        breakpoint(365, 1),
        breakpoint(380, 2),
        breakpoint(395, 3),
        breakpoint(410, 4),
        breakpoint(425, 5),
        breakpoint(440, 6),
        breakpoint(455, 7),
        breakpoint(470, 8),
    ],
    catch_all_column: 9,
};

/// Returns the multiplier for a 1-indexed grid column.
pub fn multiplier_for_column(column: u8) -> Option<Decimal> {
    let index = usize::from(column).checked_sub(1)?;
    COLUMN_MULTIPLIERS.get(index).copied()
}

/// The result of the multiplier lookup, including the audit step.
#[derive(Debug, Clone)]
pub struct MultiplierResult {
    /// The category the row was classified as.
    pub category: IncentiveCategory,
    /// The selected grid column.
    pub column: u8,
    /// The multiplier applied to every tier.
    pub multiplier: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Determines the tier multiplier from a row's margin and category.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::determine_multiplier;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = determine_multiplier(Decimal::from_str("37.6").unwrap(), "택시", 1);
/// assert_eq!(result.column, 2);
/// assert_eq!(result.multiplier, Decimal::from_str("0.95").unwrap());
/// ```
pub fn determine_multiplier(margin: Decimal, category: &str, step_number: u32) -> MultiplierResult {
    let incentive_category = IncentiveCategory::classify(category);
    let column = incentive_category.grid().column_for(margin);
    // Every grid column is within the multiplier table.
    let multiplier = multiplier_for_column(column).unwrap_or(Decimal::ONE);

    let audit_step = AuditStep {
        step_number,
        rule_id: "margin_multiplier".to_string(),
        rule_name: "Margin Multiplier".to_string(),
        input: serde_json::json!({
            "profit_margin": margin.normalize().to_string(),
            "category": category,
        }),
        output: serde_json::json!({
            "grid": incentive_category.as_str(),
            "column": column,
            "multiplier": multiplier.normalize().to_string(),
        }),
        reasoning: format!(
            "Margin {}% on the {} grid selects column {} (x{})",
            margin.normalize(),
            incentive_category.as_str(),
            column,
            multiplier.normalize()
        ),
    };

    MultiplierResult {
        category: incentive_category,
        column,
        multiplier,
        audit_step,
    }
}
