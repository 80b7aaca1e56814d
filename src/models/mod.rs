//! Core data models for the Incentive Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod batch_result;
mod calculation_result;
mod employee;
mod period;
mod sales_record;

pub use batch_result::{BatchResult, BatchRow, BatchTotals, UNASSIGNED_STORE};
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, IncentiveOutcome, IncentiveResult, IneligibleReason,
    ThresholdSource,
};
pub use employee::{CompensationMode, EmploymentClassification, RosterEmployee};
pub use period::MonthlyPeriod;
pub use sales_record::SalesRecord;
