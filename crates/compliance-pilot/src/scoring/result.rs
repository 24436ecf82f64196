use super::labels::{role_label, RoleLabel};
use super::metrics::{compute_ocl, ComplianceMetrics};
use super::status::ComplianceStatus;
use crate::roles::Role;
use serde::Serialize;

/// Scored view of a metrics snapshot for one viewer. Rebuilt whenever the
/// metrics or role change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceResult {
    pub level: i32,
    pub metrics: ComplianceMetrics,
    pub status: ComplianceStatus,
    pub status_label: &'static str,
    pub tone: &'static str,
    pub role_specific_label: String,
    pub role_specific_subtext: String,
}

impl ComplianceResult {
    pub fn evaluate(
        metrics: ComplianceMetrics,
        role: Option<Role>,
        risk_concentration: Option<&str>,
    ) -> Self {
        let level = compute_ocl(&metrics);
        let status = ComplianceStatus::from_level(level);
        let RoleLabel { label, subtext } = match role {
            Some(role) => role_label(role, level, risk_concentration),
            None => RoleLabel::generic(level),
        };

        Self {
            level,
            metrics,
            status,
            status_label: status.label(),
            tone: status.tone(),
            role_specific_label: label,
            role_specific_subtext: subtext,
        }
    }

    pub fn mock(role: Role) -> Self {
        Self::evaluate(ComplianceMetrics::mock(), Some(role), None)
    }

    pub fn headline(&self) -> &str {
        self.role_specific_label
            .split_once(':')
            .map(|(head, _)| head)
            .unwrap_or(&self.role_specific_label)
    }
}
