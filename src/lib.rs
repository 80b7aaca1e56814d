//! Sales Incentive Engine for service-center staff
//!
//! This crate calculates monthly sales incentives from per-employee sales rows:
//! tiered bands above position thresholds, scaled by a profit-margin
//! multiplier, floored to a whole currency unit and added to base salary.
//! It also ships the YAML configuration loader, a batch operation with
//! monthly totals and an HTTP API around them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
