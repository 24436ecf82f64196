//! Companion dashboard assembled around a scored compliance result.

mod insights;
pub mod views;

pub use views::{
    ComplianceDashboard, IndustryExpectation, MetricBreakdownEntry, QuickStat, Trend,
    INDUSTRY_EXPECTATIONS,
};
