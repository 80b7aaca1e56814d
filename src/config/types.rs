//! Configuration types for incentive calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the built-in default
//! threshold table used when no tenant override exists for a position.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::RosterEmployee;

/// Built-in thresholds per position: base, end of level 1, end of level 2.
const DEFAULT_THRESHOLDS: [(&str, [i64; 3]); 3] = [
    ("기사", [21_500_000, 25_500_000, 40_000_000]),
    ("선임기사", [23_000_000, 27_000_000, 42_000_000]),
    ("팀장", [24_500_000, 28_500_000, 45_500_000]),
];

/// Sales thresholds bounding the three incentive tiers for one position.
///
/// Serialized as a three-element sequence `[base, level1_end, level2_end]`.
///
/// # Example
///
/// ```
/// use incentive_engine::config::ThresholdTriple;
/// use rust_decimal::Decimal;
///
/// let triple = ThresholdTriple::new(
///     Decimal::from(24_500_000),
///     Decimal::from(28_500_000),
///     Decimal::from(45_500_000),
/// );
/// assert!(triple.is_monotonic());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[Decimal; 3]", into = "[Decimal; 3]")]
pub struct ThresholdTriple {
    /// Sales at or below this earn nothing.
    pub base: Decimal,
    /// Upper bound of tier 1.
    pub level1_end: Decimal,
    /// Upper bound of tier 2; sales above it fall in tier 3.
    pub level2_end: Decimal,
}

impl ThresholdTriple {
    /// Creates a triple without validating it.
    pub fn new(base: Decimal, level1_end: Decimal, level2_end: Decimal) -> Self {
        Self {
            base,
            level1_end,
            level2_end,
        }
    }

    /// Returns true if `base <= level1_end <= level2_end`.
    pub fn is_monotonic(&self) -> bool {
        self.base <= self.level1_end && self.level1_end <= self.level2_end
    }

    /// Rejects a non-monotonic triple with `InvalidThresholds`.
    pub fn validate(&self, position: &str) -> EngineResult<()> {
        if self.is_monotonic() {
            Ok(())
        } else {
            Err(EngineError::InvalidThresholds {
                position: position.to_string(),
                base: self.base,
                level1_end: self.level1_end,
                level2_end: self.level2_end,
            })
        }
    }
}

impl From<[Decimal; 3]> for ThresholdTriple {
    fn from([base, level1_end, level2_end]: [Decimal; 3]) -> Self {
        Self::new(base, level1_end, level2_end)
    }
}

impl From<ThresholdTriple> for [Decimal; 3] {
    fn from(triple: ThresholdTriple) -> Self {
        [triple.base, triple.level1_end, triple.level2_end]
    }
}

/// Mapping from position name to its threshold triple.
///
/// # Example
///
/// ```
/// use incentive_engine::config::ThresholdTable;
/// use rust_decimal::Decimal;
///
/// let defaults = ThresholdTable::defaults();
/// assert_eq!(defaults.get("팀장").unwrap().base, Decimal::from(24_500_000));
/// assert!(defaults.get("공장장").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    entries: BTreeMap<String, ThresholdTriple>,
}

impl ThresholdTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default table.
    pub fn defaults() -> Self {
        DEFAULT_THRESHOLDS
            .iter()
            .map(|(position, [base, level1_end, level2_end])| {
                (
                    position.to_string(),
                    ThresholdTriple::new(
                        Decimal::from(*base),
                        Decimal::from(*level1_end),
                        Decimal::from(*level2_end),
                    ),
                )
            })
            .collect()
    }

    /// Looks up the triple for an exact position key.
    pub fn get(&self, position: &str) -> Option<&ThresholdTriple> {
        self.entries.get(position)
    }

    /// Inserts or replaces the triple for a position.
    pub fn insert(&mut self, position: impl Into<String>, triple: ThresholdTriple) {
        self.entries.insert(position.into(), triple);
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of positions in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates entries in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ThresholdTriple)> {
        self.entries.iter()
    }

    /// Rejects the table if any triple is not monotonic.
    pub fn validate(&self) -> EngineResult<()> {
        for (position, triple) in &self.entries {
            triple.validate(position)?;
        }
        Ok(())
    }

    /// Returns the defaults with this table's entries laid over them.
    pub fn overlaid_on_defaults(&self) -> Self {
        let mut effective = Self::defaults();
        for (position, triple) in &self.entries {
            effective.insert(position.clone(), *triple);
        }
        effective
    }
}

impl FromIterator<(String, ThresholdTriple)> for ThresholdTable {
    fn from_iter<I: IntoIterator<Item = (String, ThresholdTriple)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Tenant settings from settings.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncentiveSettings {
    /// Override thresholds; an empty map means "use the defaults".
    #[serde(default)]
    pub thresholds: ThresholdTable,
    /// Configured store names.
    #[serde(default)]
    pub stores: Vec<String>,
}

impl IncentiveSettings {
    /// Returns the override table, or `None` when no overrides are configured.
    pub fn override_thresholds(&self) -> Option<&ThresholdTable> {
        if self.thresholds.is_empty() {
            None
        } else {
            Some(&self.thresholds)
        }
    }
}

/// The employee roster from employees.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeRoster {
    /// All employees, active and inactive.
    pub employees: Vec<RosterEmployee>,
}

impl EmployeeRoster {
    /// Creates a roster from a list of employees.
    pub fn new(employees: Vec<RosterEmployee>) -> Self {
        Self { employees }
    }

    /// Finds the employee whose name matches, ignoring surrounding whitespace.
    ///
    /// Inactive employees still match, since someone who left mid-month can
    /// have sales for it. When a name appears more than once, the first
    /// active entry wins over inactive ones.
    pub fn find_by_name(&self, name: &str) -> Option<&RosterEmployee> {
        let name = name.trim();
        let mut matches = self.employees.iter().filter(|e| e.name.trim() == name);
        let first = matches.next()?;
        if first.is_active {
            return Some(first);
        }
        matches.find(|e| e.is_active).or(Some(first))
    }
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct IncentiveConfig {
    /// Tenant settings.
    settings: IncentiveSettings,
    /// Employee roster.
    roster: EmployeeRoster,
}

impl IncentiveConfig {
    /// Creates a config from its parts, rejecting non-monotonic thresholds.
    pub fn new(settings: IncentiveSettings, roster: EmployeeRoster) -> EngineResult<Self> {
        settings.thresholds.validate()?;
        Ok(Self { settings, roster })
    }

    /// Returns the tenant settings.
    pub fn settings(&self) -> &IncentiveSettings {
        &self.settings
    }

    /// Returns the employee roster.
    pub fn roster(&self) -> &EmployeeRoster {
        &self.roster
    }
}
