//! Employee classification and roster models.
//!
//! The engine only needs an [`EmploymentClassification`]; the wider
//! [`RosterEmployee`] record is what the employee roster supplies and is used
//! to resolve a classification and store for a sales row by employee name.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an employee is compensated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompensationMode {
    /// Base salary plus sales incentive.
    #[default]
    #[serde(rename = "incentive")]
    IncentiveEligible,
    /// Base salary only; never earns incentive.
    #[serde(rename = "basic")]
    BasicSalaryOnly,
}

/// The compensation terms the engine needs for one employee.
///
/// When no classification is supplied the engine treats the employee as
/// incentive-eligible with a base salary of zero, which is also what
/// [`EmploymentClassification::default`] produces.
///
/// # Examples
///
/// ```
/// use incentive_engine::models::{CompensationMode, EmploymentClassification};
/// use rust_decimal::Decimal;
///
/// let basic = EmploymentClassification {
///     compensation_mode: CompensationMode::BasicSalaryOnly,
///     base_salary: Decimal::from(2_800_000),
/// };
/// assert!(basic.is_basic_salary_only());
/// assert!(!EmploymentClassification::default().is_basic_salary_only());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmploymentClassification {
    /// Whether the employee earns incentive.
    #[serde(default)]
    pub compensation_mode: CompensationMode,
    /// Monthly base salary in the smallest currency unit.
    #[serde(default)]
    pub base_salary: Decimal,
}

impl EmploymentClassification {
    /// Returns true if the employee is paid base salary only.
    pub fn is_basic_salary_only(&self) -> bool {
        self.compensation_mode == CompensationMode::BasicSalaryOnly
    }
}

/// An employee as held in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEmployee {
    /// Display name; sales rows match it after trimming surrounding whitespace.
    pub name: String,
    /// Position title (e.g. "팀장").
    pub position: String,
    /// The store the employee belongs to, if assigned.
    #[serde(default)]
    pub store_name: Option<String>,
    /// Whether the employee earns incentive.
    #[serde(default)]
    pub compensation_mode: CompensationMode,
    /// Monthly base salary in the smallest currency unit.
    #[serde(default)]
    pub base_salary: Decimal,
    /// Inactive employees still match; an active entry wins on a duplicate name.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl RosterEmployee {
    /// Returns the compensation terms for this employee.
    pub fn classification(&self) -> EmploymentClassification {
        EmploymentClassification {
            compensation_mode: self.compensation_mode,
            base_salary: self.base_salary,
        }
    }
}
