//! Overall Compliance Level (OCL) scoring: weighted composite, status bands,
//! role-personalized labels and the independent risk axis.

mod labels;
mod metrics;
mod result;
mod risk;
mod status;

pub use labels::{role_label, RoleLabel, DIVISION_DIRECTOR_OFFSET, LINE_MANAGER_OFFSET};
pub use metrics::{
    compute_ocl, ComplianceMetrics, Dimension, InvalidMetricsError, OclWeights, OCL_WEIGHTS,
};
pub use result::ComplianceResult;
pub use risk::{RiskBand, RiskLevel, MOCK_RISK_SCORE};
pub use status::{ComplianceStatus, AT_RISK_FLOOR, EXCELLENT_FLOOR, GOOD_FLOOR};
