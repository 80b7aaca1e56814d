//! Configuration loading and management for the Incentive Engine.
//!
//! This module provides the threshold tables the engine consumes, the tenant
//! settings that may override them, and the employee roster used to resolve
//! an employee's compensation terms by name.
//!
//! # Example
//!
//! ```no_run
//! use incentive_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/service_center").unwrap();
//! println!("{} employees on the roster", config.config().roster().employees.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EmployeeRoster, IncentiveConfig, IncentiveSettings, ThresholdTable, ThresholdTriple,
};
